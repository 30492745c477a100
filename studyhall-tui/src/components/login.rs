use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use studyhall_core::state::{AppState, LoginField};

use crate::theme::Theme;

/// Phone + PIN entry, shared by the purchase login and the standalone
/// check-in login.
pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme, title: &str) {
    let popup = super::centered_fixed_rect(46, 9, area);
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(Style::default().fg(theme.accent));
    let inner = outer.inner(popup);
    f.render_widget(outer, popup);

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .split(inner);

    draw_field(
        f,
        chunks[0],
        "Phone (010-XXXX-XXXX)",
        &state.phone_entry,
        state.active_field == LoginField::Phone,
        false,
        theme,
    );
    draw_field(
        f,
        chunks[1],
        "PIN (4 digits)",
        &state.pin_entry,
        state.active_field == LoginField::Pin,
        true,
        theme,
    );

    let hint = Line::from(Span::styled(
        "Tab: switch field  Enter: sign in  Esc: back",
        Style::default().fg(theme.muted),
    ));
    f.render_widget(Paragraph::new(hint), chunks[2]);
}

fn draw_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    active: bool,
    mask: bool,
    theme: &Theme,
) {
    let border = if active { theme.accent } else { theme.border };
    let shown = if mask {
        "*".repeat(value.len())
    } else {
        value.to_string()
    };
    let field = Paragraph::new(shown).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {label} "))
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(field, area);
}
