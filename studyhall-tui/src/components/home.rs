use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use studyhall_core::state::AppState;

use crate::theme::Theme;

pub const MENU: &[&str] = &["Buy a ticket", "Check in", "Check out", "Seat status"];

pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let chunks = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(1),
    ])
    .split(area);

    let banner = Paragraph::new(vec![
        Line::from("studyhall"),
        Line::from("스터디카페 무인 키오스크"),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    );
    f.render_widget(banner, chunks[0]);

    let items: Vec<ListItem> = MENU.iter().map(|label| ListItem::new(*label)).collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Welcome - pick an option ")
                .border_style(Style::default().fg(theme.border)),
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
    f.render_stateful_widget(list, chunks[1], &mut list_state);
}
