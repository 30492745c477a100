use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use studyhall_core::{state::AppState, ticket::TicketKind};

use crate::theme::Theme;

pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let title = match state.session.selected_seat {
        Some(seat_id) => format!(" Tickets - seat {seat_id} selected "),
        None => " Tickets ".to_string(),
    };

    let items: Vec<ListItem> = state
        .tickets
        .iter()
        .map(|ticket| {
            let kind = match ticket.kind {
                TicketKind::Time => "시간제",
                TicketKind::Period => "기간제",
            };
            ListItem::new(Line::from(vec![
                Span::raw(ticket.name.clone()),
                Span::styled(
                    format!("  {}원", format_price(ticket.price)),
                    Style::default().fg(theme.success),
                ),
                Span::styled(format!("  [{kind}]"), Style::default().fg(theme.muted)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
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
    list_state.select(Some(state.ticket_index));
    f.render_stateful_widget(list, area, &mut list_state);
}

/// Thousands separators, Korean price style: 99000 -> "99,000".
pub fn format_price(price: u32) -> String {
    let digits = price.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0), "0");
        assert_eq!(format_price(900), "900");
        assert_eq!(format_price(8000), "8,000");
        assert_eq!(format_price(99000), "99,000");
        assert_eq!(format_price(1234567), "1,234,567");
    }
}
