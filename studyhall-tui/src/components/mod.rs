use ratatui::layout::{Constraint, Layout, Rect};

pub mod alert_modal;
pub mod dialog;
pub mod home;
pub mod login;
pub mod payment_modal;
pub mod phone_input;
pub mod seat_grid;
pub mod select_user;
pub mod ticket_list;

/// Helper function to center a rect within another rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Percentage(percent_y.min(100)),
        Constraint::Fill(1),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Percentage(percent_x.min(100)),
        Constraint::Fill(1),
    ])
    .split(popup_layout[1])[1]
}

/// Center a fixed-size rect within another rect, clamped to fit.
pub fn centered_fixed_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let x = r.x + (r.width - width) / 2;
    let y = r.y + (r.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Dialogs take 80% of the terminal width.
pub fn dialog_width(terminal_width: u16) -> u16 {
    (terminal_width / 5 * 4).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fixed_rect_is_centered() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_fixed_rect(20, 10, outer);
        assert_eq!(inner, Rect::new(40, 15, 20, 10));
    }

    #[test]
    fn test_centered_fixed_rect_clamps_to_outer() {
        let outer = Rect::new(0, 0, 10, 5);
        let inner = centered_fixed_rect(20, 10, outer);
        assert_eq!(inner, outer);
    }

    #[test]
    fn test_dialog_width_scales() {
        assert_eq!(dialog_width(100), 80);
        assert_eq!(dialog_width(20), 16);
        assert!(dialog_width(1) >= 1);
    }
}
