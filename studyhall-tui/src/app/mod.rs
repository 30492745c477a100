mod actions;
mod spawn;

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    time::{Duration, Instant},
};

use actions::{handle_payment_completion, process_action, process_app_event};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
};
use studyhall_core::{
    api::CafeApi,
    event::{AppEvent, EventSender},
    poller::SeatPoller,
    session::{CheckInStep, CheckOutAuth, CheckOutStep, Screen},
    state::AppState,
};

use crate::{components, keymap};

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn run(
    terminal: &mut DefaultTerminal,
    state: &mut AppState,
    api: &Arc<dyn CafeApi>,
    theme: &crate::theme::Theme,
    seat_refresh: Duration,
) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel::<AppEvent>();
    let cancel = Arc::new(AtomicBool::new(false));
    let event_sender = EventSender::new(tx, Arc::clone(&cancel));
    let spinner_start = Instant::now();
    let mut last_tick = Instant::now();
    let mut poller: Option<SeatPoller> = None;

    loop {
        terminal.draw(|f| draw(f, state, theme, &spinner_start))?;

        // The background poller only runs while a seat screen is up.
        let wants_poller = on_seat_screen(state.session.screen);
        if wants_poller && poller.is_none() {
            poller = Some(SeatPoller::spawn(
                Arc::clone(api),
                seat_refresh,
                event_sender.clone(),
            ));
        } else if !wants_poller && poller.is_some() {
            poller = None; // Drop stops the thread.
        }

        // 1 Hz tick drives the payment modal; seat countdowns recompute
        // from the wall clock on every draw.
        if last_tick.elapsed() >= Duration::from_secs(1) {
            last_tick = Instant::now();
            let completion = state
                .payment_modal
                .as_mut()
                .and_then(studyhall_core::modal::PaymentModal::tick);
            if let Some(result) = completion {
                handle_payment_completion(result, state, api, &event_sender);
            }
        }

        // Check background channel (non-blocking)
        if let Ok(app_event) = rx.try_recv() {
            process_app_event(app_event, state, api, &event_sender);
            continue;
        }

        // Poll terminal events with a timeout so we can update the
        // spinner and countdowns between keypresses.
        if event::poll(Duration::from_millis(80))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // While a blocking fetch is in flight, only Ctrl+C works.
            if state.loading.is_some() {
                if key.code == crossterm::event::KeyCode::Char('c')
                    && key
                        .modifiers
                        .contains(crossterm::event::KeyModifiers::CONTROL)
                {
                    cancel.store(true, Ordering::Relaxed);
                    return Ok(());
                }
                continue;
            }

            if let Some(action) = keymap::resolve_action(key, state)
                && process_action(action, state, api, &event_sender)
            {
                cancel.store(true, Ordering::Relaxed);
                return Ok(());
            }
        }
    }
}

fn on_seat_screen(screen: Screen) -> bool {
    matches!(
        screen,
        Screen::SeatStatus
            | Screen::SeatView
            | Screen::CheckIn(CheckInStep::Seat)
            | Screen::CheckOut(CheckOutStep::Seat | CheckOutStep::Auth)
    )
}

fn draw(f: &mut Frame, state: &AppState, theme: &crate::theme::Theme, spinner_start: &Instant) {
    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(f.area());
    let main_area = chunks[0];

    match state.session.screen {
        Screen::Home => components::home::draw(f, main_area, state, theme),
        Screen::SelectUser => {
            components::home::draw(f, main_area, state, theme);
            components::select_user::draw(f, main_area, state, theme);
        }
        Screen::MemberLogin => {
            components::login::draw(f, main_area, state, theme, "Member sign-in");
        }
        Screen::CheckIn(CheckInStep::Login) => {
            components::login::draw(f, main_area, state, theme, "Check in - sign in");
        }
        Screen::TicketList => components::ticket_list::draw(f, main_area, state, theme),
        Screen::SeatStatus => {
            components::seat_grid::draw(f, main_area, state, theme, "Pick a seat");
        }
        Screen::CheckIn(CheckInStep::Seat) => {
            components::seat_grid::draw(f, main_area, state, theme, "Pick your seat");
        }
        Screen::CheckOut(CheckOutStep::Seat) => {
            components::seat_grid::draw(f, main_area, state, theme, "Which seat is leaving?");
        }
        Screen::CheckOut(CheckOutStep::Auth) => {
            components::seat_grid::draw(f, main_area, state, theme, "Which seat is leaving?");
            match state.session.check_out_auth {
                Some(CheckOutAuth::Pin) => components::phone_input::draw(
                    f,
                    main_area,
                    state,
                    theme,
                    "Confirm check-out",
                    "Member PIN",
                    true,
                ),
                _ => components::phone_input::draw(
                    f,
                    main_area,
                    state,
                    theme,
                    "Confirm check-out",
                    "Phone used at check-in",
                    false,
                ),
            }
        }
        Screen::PhoneInput => {
            components::ticket_list::draw(f, main_area, state, theme);
            components::phone_input::draw(
                f,
                main_area,
                state,
                theme,
                "Almost there",
                "Phone (010-XXXX-XXXX)",
                false,
            );
        }
        Screen::SeatView => {
            components::seat_grid::draw(f, main_area, state, theme, "Seat status");
        }
    }

    draw_status_bar(f, chunks[1], state, theme);

    let spinner = spinner_frame(spinner_start);
    if let Some(message) = state.loading {
        components::dialog::Dialog::new(vec![Line::from(vec![
            Span::styled(
                format!("{spinner} "),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(message),
        ])])
        .border_color(theme.accent)
        .render(f, main_area);
    }

    if let Some(modal) = &state.payment_modal {
        components::payment_modal::draw(f, main_area, modal, theme, spinner);
    }

    // Alerts sit above everything else.
    components::alert_modal::draw(f, main_area, &state.alert, theme);
}

fn spinner_frame(start: &Instant) -> &'static str {
    let elapsed = start.elapsed().as_millis() as usize;
    SPINNER_FRAMES[(elapsed / 80) % SPINNER_FRAMES.len()]
}

fn draw_status_bar(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    state: &AppState,
    theme: &crate::theme::Theme,
) {
    let text = match &state.status_line {
        Some(message) => Span::styled(message.clone(), Style::default().fg(theme.warning)),
        None => Span::styled(
            match state.session.screen {
                Screen::Home => "Up/Down: choose  Enter: select  q: quit",
                _ => "Enter: select  Esc: back  Ctrl+C: quit",
            },
            Style::default().fg(theme.muted),
        ),
    };
    f.render_widget(ratatui::widgets::Paragraph::new(Line::from(text)), area);
}
