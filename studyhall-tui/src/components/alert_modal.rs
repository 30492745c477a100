use ratatui::{Frame, layout::Rect, style::Style, text::{Line, Span}};
use studyhall_core::modal::{AlertKind, AlertModal};

use super::dialog::Dialog;
use crate::theme::Theme;

pub fn draw(f: &mut Frame, area: Rect, alerts: &AlertModal, theme: &Theme) {
    let Some(alert) = alerts.current() else {
        return;
    };
    let border = match alert.kind {
        AlertKind::Warning => theme.warning,
        AlertKind::Error => theme.error,
        AlertKind::Success => theme.success,
    };
    let lines = vec![
        Line::raw(alert.message.clone()),
        Line::raw(""),
        Line::from(Span::styled(
            "Enter: OK",
            Style::default().fg(theme.muted),
        )),
    ];
    Dialog::new(lines)
        .title(&alert.title)
        .border_color(border)
        .render(f, area);
}
