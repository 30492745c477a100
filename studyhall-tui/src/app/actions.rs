use std::sync::Arc;

use studyhall_core::{
    action::Action,
    api::{CafeApi, CheckInRequest, PurchaseRequest},
    event::{AppEvent, EventSender},
    grid::{ClickOutcome, click_outcome},
    modal::{AfterAck, Alert, PaymentModal},
    session::{
        CheckInStep, CheckOutAuth, CheckOutStep, PaymentRoute, PhoneRoute, Screen, SeatPick,
        TicketRoute, UserType,
    },
    state::{AppState, LoginField},
    ticket::PaymentResult,
    validate,
};

use super::spawn::{
    spawn_check_in, spawn_check_out, spawn_login, spawn_purchase, spawn_seat_fetch,
    spawn_ticket_fetch,
};
use crate::components::{home, select_user};

const PHONE_PREFILL: &str = "010-";

/// Apply one Action. Returns true when the app should exit.
pub(super) fn process_action(
    action: Action,
    state: &mut AppState,
    api: &Arc<dyn CafeApi>,
    sender: &EventSender,
) -> bool {
    match action {
        Action::Quit => return true,

        Action::StartPurchase => {
            state.session.start_purchase();
            state.clear_inputs();
        }
        Action::StartCheckIn => {
            state.session.start_check_in();
            state.clear_inputs();
        }
        Action::StartCheckOut => {
            state.session.start_check_out();
            enter_seat_screen(state, api, sender);
        }
        Action::ViewSeats => {
            state.session.view_seats();
            enter_seat_screen(state, api, sender);
        }

        Action::ChooseMember => {
            state.session.choose_user_type(UserType::Member);
            state.clear_inputs();
        }
        Action::ChooseNonMember => {
            state.session.choose_user_type(UserType::NonMember);
            enter_seat_screen(state, api, sender);
        }

        Action::MoveSelection(delta) => match state.session.screen {
            Screen::Home => state.move_menu(delta, home::MENU.len()),
            Screen::SelectUser => state.move_menu(delta, select_user::OPTIONS.len()),
            Screen::TicketList => state.move_ticket_selection(delta),
            _ => {}
        },
        Action::MoveCursor(d_row, d_col) => state.move_cursor(d_row, d_col),

        Action::Confirm => return handle_confirm(state, api, sender),

        Action::InputPush(c) => {
            state.status_line = None;
            state.active_entry_mut().push(c);
        }
        Action::InputPop => {
            state.status_line = None;
            state.active_entry_mut().pop();
        }
        Action::NextField => {
            state.active_field = match state.active_field {
                LoginField::Phone => LoginField::Pin,
                LoginField::Pin => LoginField::Phone,
            };
        }

        Action::Acknowledge => {
            if state.alert.acknowledge() == AfterAck::GoHome {
                state.session.reset();
                state.clear_inputs();
            }
        }
        Action::InsertCard => handle_insert_card(state, api, sender),
        Action::RetryPayment => {
            if let Some(modal) = &mut state.payment_modal {
                modal.retry();
            }
        }
        Action::PaymentGoHome => {
            let completion = state
                .payment_modal
                .as_mut()
                .and_then(PaymentModal::go_home);
            if let Some(result) = completion {
                handle_payment_completion(result, state, api, sender);
            }
        }

        Action::GoBack => handle_go_back(state),
    }
    false
}

fn handle_confirm(state: &mut AppState, api: &Arc<dyn CafeApi>, sender: &EventSender) -> bool {
    match state.session.screen {
        Screen::Home => {
            let action = match state.menu_index {
                0 => Action::StartPurchase,
                1 => Action::StartCheckIn,
                2 => Action::StartCheckOut,
                _ => Action::ViewSeats,
            };
            return process_action(action, state, api, sender);
        }
        Screen::SelectUser => {
            let action = if state.menu_index == 0 {
                Action::ChooseMember
            } else {
                Action::ChooseNonMember
            };
            return process_action(action, state, api, sender);
        }
        Screen::MemberLogin | Screen::CheckIn(CheckInStep::Login) => {
            handle_login_submit(state, api, sender);
        }
        Screen::TicketList => handle_ticket_submit(state),
        Screen::SeatStatus
        | Screen::CheckIn(CheckInStep::Seat)
        | Screen::CheckOut(CheckOutStep::Seat)
        | Screen::SeatView => handle_seat_submit(state, api, sender),
        Screen::PhoneInput => handle_phone_submit(state),
        Screen::CheckOut(CheckOutStep::Auth) => handle_check_out_submit(state, api, sender),
    }
    false
}

fn handle_login_submit(state: &mut AppState, api: &Arc<dyn CafeApi>, sender: &EventSender) {
    if !validate::is_valid_phone(&state.phone_entry) {
        state.status_line = Some("Enter a phone number like 010-1234-5678".to_string());
        return;
    }
    if !validate::is_valid_pin(&state.pin_entry) {
        state.status_line = Some("PIN must be 4 digits".to_string());
        return;
    }
    state.loading = Some("Signing in...");
    spawn_login(
        api,
        sender,
        state.phone_entry.clone(),
        state.pin_entry.clone(),
    );
}

fn handle_ticket_submit(state: &mut AppState) {
    let Some(ticket) = state.selected_ticket().cloned() else {
        return;
    };
    match state.session.select_ticket(ticket.clone()) {
        TicketRoute::Pay => {
            state.payment_modal = Some(PaymentModal::with_timings(ticket, state.payment_timings));
        }
        TicketRoute::EnterPhone => {
            state.clear_inputs();
            state.phone_entry = PHONE_PREFILL.to_string();
        }
    }
}

fn handle_seat_submit(state: &mut AppState, api: &Arc<dyn CafeApi>, sender: &EventSender) {
    let Some(seat) = state.seat_under_cursor().cloned() else {
        return;
    };
    let outcome = click_outcome(&seat, state.grid_mode(), state.session.member.as_ref());
    match outcome {
        ClickOutcome::Ignored => {}
        ClickOutcome::Blocked { title, message } => {
            state.alert.open(Alert::warning(title, message));
        }
        ClickOutcome::Select => match state.session.pick_seat(&seat) {
            SeatPick::CheckInNow(request) => start_check_in(state, api, sender, request),
            SeatPick::ReturnToTickets => enter_ticket_list(state, api, sender),
            SeatPick::AuthRequired(auth) => {
                state.clear_inputs();
                if auth == CheckOutAuth::Phone {
                    state.phone_entry = PHONE_PREFILL.to_string();
                }
            }
            SeatPick::Ignored => {}
        },
    }
}

fn handle_phone_submit(state: &mut AppState) {
    if !validate::is_valid_phone(&state.phone_entry) {
        state.status_line = Some("Enter a phone number like 010-1234-5678".to_string());
        return;
    }
    let phone = state.phone_entry.clone();
    match state.session.phone_submitted(phone) {
        PhoneRoute::Pay => {
            if let Some(ticket) = state.session.selected_ticket.clone() {
                state.payment_modal =
                    Some(PaymentModal::with_timings(ticket, state.payment_timings));
            }
        }
        PhoneRoute::GoHome => state.clear_inputs(),
    }
}

fn handle_check_out_submit(state: &mut AppState, api: &Arc<dyn CafeApi>, sender: &EventSender) {
    let valid = match state.session.check_out_auth {
        Some(CheckOutAuth::Phone) => validate::is_valid_phone(&state.phone_entry),
        Some(CheckOutAuth::Pin) => validate::is_valid_pin(&state.phone_entry),
        None => false,
    };
    if !valid {
        state.status_line = Some("Check the number and try again".to_string());
        return;
    }
    if let Some(request) = state.session.check_out_request(&state.phone_entry) {
        state.loading = Some("Checking out...");
        spawn_check_out(api, sender, request);
    }
}

fn handle_insert_card(state: &mut AppState, api: &Arc<dyn CafeApi>, sender: &EventSender) {
    let started = state
        .payment_modal
        .as_mut()
        .is_some_and(PaymentModal::insert_card);
    if !started {
        return;
    }
    let Some(modal) = &state.payment_modal else {
        return;
    };
    let request = PurchaseRequest {
        product_id: modal.ticket.product_id,
        phone: state.session.phone.clone(),
        member_id: state.session.member.as_ref().map(|m| m.member_id),
    };
    spawn_purchase(api, sender, request);
}

fn handle_go_back(state: &mut AppState) {
    // Esc in the payment modal abandons the payment, not the screen.
    if state.payment_modal.is_some() {
        state.payment_modal = None;
        return;
    }
    state.session.go_back();
    state.clear_inputs();
    if state.session.screen == Screen::PhoneInput {
        state.phone_entry = PHONE_PREFILL.to_string();
    }
}

/// Payment modal handed over its result (countdown expiry or manual
/// dismissal); route the session onward.
pub(super) fn handle_payment_completion(
    result: PaymentResult,
    state: &mut AppState,
    api: &Arc<dyn CafeApi>,
    sender: &EventSender,
) {
    state.payment_modal = None;
    match state.session.payment_completed(result) {
        PaymentRoute::PickSeat => enter_seat_screen(state, api, sender),
        PaymentRoute::CheckInNow(request) => start_check_in(state, api, sender, request),
        PaymentRoute::GoHome => state.clear_inputs(),
    }
}

fn start_check_in(
    state: &mut AppState,
    api: &Arc<dyn CafeApi>,
    sender: &EventSender,
    request: CheckInRequest,
) {
    state.loading = Some("Checking in...");
    spawn_check_in(api, sender, request);
}

fn enter_seat_screen(state: &mut AppState, api: &Arc<dyn CafeApi>, sender: &EventSender) {
    state.clear_inputs();
    state.loading = Some("Loading seats...");
    spawn_seat_fetch(api, sender);
}

fn enter_ticket_list(state: &mut AppState, api: &Arc<dyn CafeApi>, sender: &EventSender) {
    state.clear_inputs();
    state.loading = Some("Loading tickets...");
    spawn_ticket_fetch(api, sender);
}

/// Fold a background result into the state.
pub(super) fn process_app_event(
    event: AppEvent,
    state: &mut AppState,
    api: &Arc<dyn CafeApi>,
    sender: &EventSender,
) {
    match event {
        AppEvent::SeatsLoaded(seats) => {
            state.loading = None;
            state.grid.replace(seats);
        }
        AppEvent::SeatsLoadFailed(message) => {
            state.loading = None;
            state
                .alert
                .open(Alert::error("Could not load seats", message).then_home());
        }
        AppEvent::SeatsRefreshed(seats) => state.grid.replace(seats),
        AppEvent::SeatsRefreshFailed(message) => {
            // Stale seats stay visible; just flag the connection.
            log::warn!("seat refresh failed: {message}");
            state.status_line = Some("Connection lost - seat map may be stale".to_string());
        }
        AppEvent::TicketsLoaded(tickets) => {
            state.loading = None;
            state.tickets = tickets;
            state.ticket_index = 0;
        }
        AppEvent::TicketsLoadFailed(message) => {
            state.loading = None;
            state
                .alert
                .open(Alert::error("Could not load tickets", message).then_home());
        }
        AppEvent::LoginSucceeded(member) => {
            state.loading = None;
            state.session.login_succeeded(member);
            state.clear_inputs();
            match state.session.screen {
                Screen::TicketList => enter_ticket_list(state, api, sender),
                Screen::CheckIn(CheckInStep::Seat) => enter_seat_screen(state, api, sender),
                _ => {}
            }
        }
        AppEvent::LoginFailed(message) => {
            state.loading = None;
            state.alert.open(Alert::error("Sign-in failed", message));
        }
        AppEvent::PurchaseCompleted(result) => {
            if let Some(modal) = &mut state.payment_modal {
                modal.purchase_succeeded(result);
            } else {
                log::warn!("purchase result {} arrived with no modal open", result.order_id);
            }
        }
        AppEvent::PurchaseFailed(message) => {
            if let Some(modal) = &mut state.payment_modal {
                modal.purchase_failed(message);
            }
        }
        AppEvent::CheckInCompleted(receipt) => {
            state.loading = None;
            state.alert.open(
                Alert::success(
                    "Checked in",
                    format!("Seat {} is yours. Enjoy your study!", receipt.seat_id),
                )
                .then_home(),
            );
        }
        AppEvent::CheckInFailed(message) => {
            state.loading = None;
            state
                .alert
                .open(Alert::error("Check-in failed", message).then_home());
        }
        AppEvent::CheckOutCompleted(receipt) => {
            state.loading = None;
            let message = if receipt.remaining_time_minutes > 0 {
                format!(
                    "Used {} minutes; {} minutes saved for next time.",
                    receipt.time_used_minutes, receipt.remaining_time_minutes
                )
            } else {
                format!("Used {} minutes. See you again!", receipt.time_used_minutes)
            };
            state
                .alert
                .open(Alert::success("Checked out", message).then_home());
        }
        AppEvent::CheckOutFailed(message) => {
            state.loading = None;
            state
                .alert
                .open(Alert::error("Check-out failed", message).then_home());
        }
    }
}
