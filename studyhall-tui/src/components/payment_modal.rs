use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
};
use studyhall_core::modal::{PaymentModal, PaymentPhase};

use super::dialog::Dialog;
use super::ticket_list::format_price;
use crate::theme::Theme;

pub fn draw(
    f: &mut Frame,
    area: Rect,
    modal: &PaymentModal,
    theme: &Theme,
    spinner_frame: &str,
) {
    let price = format_price(modal.ticket.price);
    let (border, lines) = match modal.phase() {
        PaymentPhase::Ready => (
            theme.accent,
            vec![
                Line::from(Span::styled(
                    format!("{} - {price}원", modal.ticket.name),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::raw(""),
                Line::raw("Please insert your card."),
                Line::from(Span::styled(
                    "Enter: card inserted  Esc: cancel",
                    Style::default().fg(theme.muted),
                )),
            ],
        ),
        PaymentPhase::Processing { .. } => (
            theme.accent,
            vec![
                Line::from(vec![
                    Span::styled(
                        format!("{spinner_frame} "),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("Processing payment..."),
                ]),
                Line::from(Span::styled(
                    "Do not remove your card.",
                    Style::default().fg(theme.muted),
                )),
            ],
        ),
        PaymentPhase::Done { countdown } => (
            theme.success,
            vec![
                Line::from(Span::styled(
                    "Payment complete",
                    Style::default()
                        .fg(theme.success)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::raw(format!("{} - {price}원", modal.ticket.name)),
                Line::raw(""),
                Line::from(Span::styled(
                    format!("Returning home in {countdown}s (Enter: now)"),
                    Style::default().fg(theme.muted),
                )),
            ],
        ),
        PaymentPhase::Failed { message } => (
            theme.error,
            vec![
                Line::from(Span::styled(
                    "Payment failed",
                    Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
                )),
                Line::raw(message.clone()),
                Line::raw(""),
                Line::from(Span::styled(
                    "Enter: try again  Esc: cancel",
                    Style::default().fg(theme.muted),
                )),
            ],
        ),
    };

    Dialog::new(lines)
        .title(" Card payment ")
        .border_color(border)
        .render(f, area);
}
