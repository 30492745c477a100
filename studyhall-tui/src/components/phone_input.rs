use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use studyhall_core::state::AppState;

use crate::theme::Theme;

/// Single-value entry box, used for the non-member phone screen and the
/// check-out credential screen.
pub fn draw(
    f: &mut Frame,
    area: Rect,
    state: &AppState,
    theme: &Theme,
    title: &str,
    label: &str,
    mask: bool,
) {
    let popup = super::centered_fixed_rect(46, 6, area);
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(Style::default().fg(theme.accent));
    let inner = outer.inner(popup);
    f.render_widget(outer, popup);

    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).split(inner);

    let shown = if mask {
        "*".repeat(state.phone_entry.len())
    } else {
        state.phone_entry.clone()
    };
    let field = Paragraph::new(shown).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {label} "))
            .border_style(Style::default().fg(theme.accent)),
    );
    f.render_widget(field, chunks[0]);

    let hint = match &state.status_line {
        Some(message) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(theme.warning),
        )),
        None => Line::from(Span::styled(
            "Enter: confirm  Esc: back",
            Style::default().fg(theme.muted),
        )),
    };
    f.render_widget(Paragraph::new(hint), chunks[1]);
}
