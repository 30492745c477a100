use crate::grid::{FLOOR_PLAN, GridMode, SeatGrid};
use crate::modal::{AlertModal, PaymentModal, PaymentTimings};
use crate::seat::Seat;
use crate::session::{CheckInStep, CheckOutStep, KioskSession, Screen};
use crate::ticket::Ticket;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LoginField {
    #[default]
    Phone,
    Pin,
}

/// Everything the terminal renders from. Mutated only by the app loop,
/// in response to Actions and AppEvents.
pub struct AppState {
    pub session: KioskSession,
    pub grid: SeatGrid,
    pub tickets: Vec<Ticket>,
    pub alert: AlertModal,
    pub payment_modal: Option<PaymentModal>,
    pub payment_timings: PaymentTimings,
    /// Label shown while the first fetch for a screen is in flight.
    pub loading: Option<&'static str>,
    pub menu_index: usize,
    pub ticket_index: usize,
    pub cursor: (usize, usize),
    pub phone_entry: String,
    pub pin_entry: String,
    pub active_field: LoginField,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: KioskSession::new(),
            grid: SeatGrid::default(),
            tickets: Vec::new(),
            alert: AlertModal::default(),
            payment_modal: None,
            payment_timings: PaymentTimings::default(),
            loading: None,
            menu_index: 0,
            ticket_index: 0,
            cursor: first_seat_position(),
            phone_entry: String::new(),
            pin_entry: String::new(),
            active_field: LoginField::Phone,
            status_line: None,
        }
    }

    /// Drop per-screen scratch state when the screen changes.
    pub fn clear_inputs(&mut self) {
        self.menu_index = 0;
        self.ticket_index = 0;
        self.cursor = first_seat_position();
        self.phone_entry.clear();
        self.pin_entry.clear();
        self.active_field = LoginField::Phone;
        self.status_line = None;
    }

    /// Which click policy the grid is under on the current screen.
    pub fn grid_mode(&self) -> GridMode {
        match self.session.screen {
            Screen::CheckOut(CheckOutStep::Seat) => GridMode::CheckOut,
            Screen::SeatStatus | Screen::CheckIn(CheckInStep::Seat) => GridMode::Purchase,
            _ => GridMode::ViewOnly,
        }
    }

    pub fn seat_under_cursor(&self) -> Option<&Seat> {
        let (row, col) = self.cursor;
        let code = *FLOOR_PLAN.get(row)?.get(col)?;
        let seat_id = u32::try_from(code).ok().filter(|&id| id > 0)?;
        self.grid.seat(seat_id)
    }

    pub fn selected_ticket(&self) -> Option<&Ticket> {
        self.tickets.get(self.ticket_index)
    }

    pub fn move_menu(&mut self, delta: i32, len: usize) {
        if len == 0 {
            return;
        }
        let len = i32::try_from(len).unwrap_or(i32::MAX);
        let current = i32::try_from(self.menu_index).unwrap_or(0);
        self.menu_index = usize::try_from((current + delta).rem_euclid(len)).unwrap_or(0);
    }

    pub fn move_ticket_selection(&mut self, delta: i32) {
        if self.tickets.is_empty() {
            return;
        }
        let len = i32::try_from(self.tickets.len()).unwrap_or(i32::MAX);
        let current = i32::try_from(self.ticket_index).unwrap_or(0);
        self.ticket_index = usize::try_from((current + delta).rem_euclid(len)).unwrap_or(0);
    }

    /// Step the grid cursor, skipping gaps and the door. Stays put when
    /// there is no seat in that direction.
    pub fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let (mut row, mut col) = (
            i32::try_from(self.cursor.0).unwrap_or(0),
            i32::try_from(self.cursor.1).unwrap_or(0),
        );
        let rows = i32::try_from(FLOOR_PLAN.len()).unwrap_or(0);
        let cols = i32::try_from(FLOOR_PLAN[0].len()).unwrap_or(0);
        loop {
            row += d_row;
            col += d_col;
            if row < 0 || row >= rows || col < 0 || col >= cols {
                return;
            }
            let (r, c) = (
                usize::try_from(row).unwrap_or(0),
                usize::try_from(col).unwrap_or(0),
            );
            if FLOOR_PLAN[r][c] > 0 {
                self.cursor = (r, c);
                return;
            }
        }
    }

    pub fn active_entry_mut(&mut self) -> &mut String {
        match self.active_field {
            LoginField::Phone => &mut self.phone_entry,
            LoginField::Pin => &mut self.pin_entry,
        }
    }
}

fn first_seat_position() -> (usize, usize) {
    for (r, row) in FLOOR_PLAN.iter().enumerate() {
        for (c, &code) in row.iter().enumerate() {
            if code > 0 {
                return (r, c);
            }
        }
    }
    (0, 0)
}
