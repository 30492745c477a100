use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use studyhall_core::{
    grid::Cell,
    seat::{Seat, SeatKind, SeatStatus},
    state::AppState,
};

use crate::theme::Theme;

pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme, title: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(2),
    ])
    .split(area);

    draw_header(f, chunks[0], state, theme, title);
    draw_grid(f, chunks[1], state, theme);
    draw_footer(f, chunks[2], state, theme);
}

fn draw_header(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme, title: &str) {
    let mut spans = vec![Span::raw(title.to_string())];
    if let Some(member) = &state.session.member {
        spans.push(Span::styled(
            format!("  |  {} ({}분 남음)", member.name, member.saved_time_minute),
            Style::default().fg(theme.success),
        ));
    }
    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    );
    f.render_widget(header, area);
}

fn draw_grid(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let now = Utc::now();
    let mut lines = Vec::new();
    for (r, row) in state.grid.rows().iter().enumerate() {
        let mut spans = Vec::new();
        for (c, cell) in row.iter().enumerate() {
            let under_cursor = state.cursor == (r, c);
            spans.push(cell_span(cell, under_cursor, theme));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::raw(""));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Seats ")
        .border_style(Style::default().fg(theme.border));
    f.render_widget(Paragraph::new(lines).block(block), area);

    // Detail line for the seat under the cursor.
    if let Some(seat) = state.seat_under_cursor() {
        let detail = seat_detail(seat, now);
        let detail_area = Rect::new(
            area.x + 2,
            area.y + area.height.saturating_sub(1),
            area.width.saturating_sub(4),
            1,
        );
        f.render_widget(
            Paragraph::new(Span::styled(detail, Style::default().fg(theme.muted))),
            detail_area,
        );
    }
}

fn cell_span<'a>(cell: &Cell<'a>, under_cursor: bool, theme: &Theme) -> Span<'a> {
    let (text, mut style) = match cell {
        Cell::Gap => ("      ".to_string(), Style::default()),
        Cell::Door => (" DOOR ".to_string(), Style::default().fg(theme.hint)),
        Cell::Unknown(id) => (format!(" ?{id:>3} "), Style::default().fg(theme.muted)),
        Cell::Seat(seat) => {
            let text = format!(" {:>4} ", seat.seat_id);
            let style = match &seat.status {
                SeatStatus::Available => Style::default().fg(theme.success),
                SeatStatus::Occupied { .. } => Style::default().fg(theme.error),
                SeatStatus::Maintenance => Style::default().fg(theme.warning),
            };
            (text, style)
        }
    };
    if under_cursor {
        style = style
            .bg(theme.accent)
            .fg(theme.highlight_fg)
            .add_modifier(Modifier::BOLD);
    }
    Span::styled(text, style)
}

fn seat_detail(seat: &Seat, now: chrono::DateTime<Utc>) -> String {
    let kind = match seat.kind {
        SeatKind::Free => "자유석",
        SeatKind::Fixed => "고정석",
    };
    match &seat.status {
        SeatStatus::Available => format!("Seat {} ({kind}) - available", seat.seat_id),
        SeatStatus::Maintenance => format!("Seat {} ({kind}) - under maintenance", seat.seat_id),
        SeatStatus::Occupied { user_name, .. } => {
            let remaining = seat.remaining_seconds(now);
            if remaining > 0 {
                format!(
                    "Seat {} ({kind}) - {} ({} left)",
                    seat.seat_id,
                    masked(user_name),
                    format_remaining(remaining)
                )
            } else {
                format!("Seat {} ({kind}) - {}", seat.seat_id, masked(user_name))
            }
        }
    }
}

/// Show only the first character of the occupant name on the shared screen.
fn masked(name: &str) -> String {
    match name.chars().next() {
        Some(first) => format!("{first}**"),
        None => "***".to_string(),
    }
}

/// `h:mm:ss`, or `m:ss` under an hour.
pub fn format_remaining(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

fn draw_footer(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let legend = Line::from(vec![
        Span::styled("■ available  ", Style::default().fg(theme.success)),
        Span::styled("■ in use  ", Style::default().fg(theme.error)),
        Span::styled("■ maintenance  ", Style::default().fg(theme.warning)),
        Span::styled(
            "arrows: move  Enter: select  Esc: back",
            Style::default().fg(theme.muted),
        ),
    ]);
    let mut lines = vec![legend];
    if let Some(status) = &state.status_line {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(theme.warning),
        )));
    }
    f.render_widget(Paragraph::new(lines), area);
}
