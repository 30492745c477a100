use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};
use studyhall_core::state::AppState;

use crate::theme::Theme;

pub const OPTIONS: &[&str] = &["Member", "Non-member"];

pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let popup = super::centered_fixed_rect(40, OPTIONS.len() as u16 + 2, area);
    f.render_widget(Clear, popup);

    let items: Vec<ListItem> = OPTIONS.iter().map(|label| ListItem::new(*label)).collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Who is buying? ")
                .border_style(Style::default().fg(theme.accent)),
        )
        .highlight_style(
            Style::default()
                .bg(theme.accent)
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.menu_index));
    f.render_stateful_widget(list, popup, &mut list_state);
}
