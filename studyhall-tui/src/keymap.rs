use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use studyhall_core::action::Action;
use studyhall_core::modal::PaymentPhase;
use studyhall_core::session::{CheckInStep, CheckOutStep, Screen};
use studyhall_core::state::AppState;

/// Resolve a key event into an Action based on the current screen.
pub fn resolve_action(key: KeyEvent, state: &AppState) -> Option<Action> {
    // Global quit
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    // Open modals swallow all other input.
    if let Some(modal) = &state.payment_modal {
        return resolve_payment_key(key.code, modal.phase());
    }
    if state.alert.is_open() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Action::Acknowledge),
            _ => None,
        };
    }

    match state.session.screen {
        Screen::Home => resolve_home_key(key.code),
        Screen::SelectUser | Screen::TicketList => resolve_menu_key(key.code),
        Screen::MemberLogin | Screen::CheckIn(CheckInStep::Login) => resolve_login_key(key.code),
        Screen::SeatStatus
        | Screen::SeatView
        | Screen::CheckIn(CheckInStep::Seat)
        | Screen::CheckOut(CheckOutStep::Seat) => resolve_grid_key(key.code),
        Screen::PhoneInput | Screen::CheckOut(CheckOutStep::Auth) => resolve_entry_key(key.code),
    }
}

fn resolve_payment_key(key: KeyCode, phase: &PaymentPhase) -> Option<Action> {
    match phase {
        PaymentPhase::Ready => match key {
            KeyCode::Enter => Some(Action::InsertCard),
            KeyCode::Esc => Some(Action::GoBack),
            _ => None,
        },
        // No escape while the card is being charged.
        PaymentPhase::Processing { .. } => None,
        PaymentPhase::Done { .. } => match key {
            KeyCode::Enter => Some(Action::PaymentGoHome),
            _ => None,
        },
        PaymentPhase::Failed { .. } => match key {
            KeyCode::Enter => Some(Action::RetryPayment),
            KeyCode::Esc => Some(Action::GoBack),
            _ => None,
        },
    }
}

fn resolve_home_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Up => Some(Action::MoveSelection(-1)),
        KeyCode::Down => Some(Action::MoveSelection(1)),
        KeyCode::Enter => Some(Action::Confirm),
        _ => None,
    }
}

fn resolve_menu_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Esc => Some(Action::GoBack),
        KeyCode::Up => Some(Action::MoveSelection(-1)),
        KeyCode::Down => Some(Action::MoveSelection(1)),
        KeyCode::Enter => Some(Action::Confirm),
        _ => None,
    }
}

fn resolve_login_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Esc => Some(Action::GoBack),
        KeyCode::Tab => Some(Action::NextField),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Backspace => Some(Action::InputPop),
        KeyCode::Char(c) => Some(Action::InputPush(c)),
        _ => None,
    }
}

fn resolve_grid_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Esc => Some(Action::GoBack),
        KeyCode::Up => Some(Action::MoveCursor(-1, 0)),
        KeyCode::Down => Some(Action::MoveCursor(1, 0)),
        KeyCode::Left => Some(Action::MoveCursor(0, -1)),
        KeyCode::Right => Some(Action::MoveCursor(0, 1)),
        KeyCode::Enter => Some(Action::Confirm),
        _ => None,
    }
}

fn resolve_entry_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Esc => Some(Action::GoBack),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Backspace => Some(Action::InputPop),
        KeyCode::Char(c) => Some(Action::InputPush(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use studyhall_core::modal::{Alert, PaymentModal};
    use studyhall_core::ticket::{Ticket, TicketKind};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ticket() -> Ticket {
        Ticket {
            product_id: 1,
            name: "2시간권".to_string(),
            price: 4000,
            kind: TicketKind::Time,
        }
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut state = AppState::new();
        state.alert.open(Alert::warning("t", "m"));
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(resolve_action(event, &state), Some(Action::Quit));
    }

    #[test]
    fn test_alert_swallows_everything_but_acknowledge() {
        let mut state = AppState::new();
        state.alert.open(Alert::error("t", "m"));
        assert_eq!(
            resolve_action(key(KeyCode::Enter), &state),
            Some(Action::Acknowledge)
        );
        assert_eq!(resolve_action(key(KeyCode::Up), &state), None);
        assert_eq!(resolve_action(key(KeyCode::Char('x')), &state), None);
    }

    #[test]
    fn test_payment_processing_ignores_escape() {
        let mut state = AppState::new();
        let mut modal = PaymentModal::new(ticket());
        modal.insert_card();
        state.payment_modal = Some(modal);
        assert_eq!(resolve_action(key(KeyCode::Esc), &state), None);
        assert_eq!(resolve_action(key(KeyCode::Enter), &state), None);
    }

    #[test]
    fn test_payment_ready_inserts_card_on_enter() {
        let mut state = AppState::new();
        state.payment_modal = Some(PaymentModal::new(ticket()));
        assert_eq!(
            resolve_action(key(KeyCode::Enter), &state),
            Some(Action::InsertCard)
        );
    }

    #[test]
    fn test_grid_screen_moves_cursor() {
        let mut state = AppState::new();
        state.session.view_seats();
        assert_eq!(
            resolve_action(key(KeyCode::Right), &state),
            Some(Action::MoveCursor(0, 1))
        );
        assert_eq!(
            resolve_action(key(KeyCode::Esc), &state),
            Some(Action::GoBack)
        );
    }

    #[test]
    fn test_home_quits_on_escape() {
        let state = AppState::new();
        assert_eq!(resolve_action(key(KeyCode::Esc), &state), Some(Action::Quit));
    }
}
