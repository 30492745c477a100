use crate::seat::{OccupantRole, Seat, SeatKind, SeatStatus};
use crate::ticket::MemberInfo;

/// Floor plan of the cafe. `0` is walkway, `-1` is the entrance door,
/// positive numbers are seat ids. Layout changes mean a new build.
pub const FLOOR_PLAN: [[i32; 8]; 5] = [
    [1, 2, 3, 4, 0, 5, 6, 7],
    [8, 9, 10, 11, 0, 12, 13, 14],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [15, 16, 17, 18, 0, 19, 20, 21],
    [-1, 0, 0, 0, 0, 22, 23, 24],
];

pub const DOOR_MARKER: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell<'a> {
    Gap,
    Door,
    Seat(&'a Seat),
    /// Seat id present in the floor plan but missing from the fetched
    /// list. Rendered as a placeholder, never an error.
    Unknown(u32),
}

/// What the grid is being used for; drives which seats accept a click.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GridMode {
    Purchase,
    CheckOut,
    ViewOnly,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    Select,
    Blocked { title: &'static str, message: String },
    Ignored,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeatGrid {
    seats: Vec<Seat>,
}

impl SeatGrid {
    pub fn new(seats: Vec<Seat>) -> Self {
        Self { seats }
    }

    /// Swap in a fresh seat list from a poll without touching anything
    /// derived; countdowns recompute from expiry on the next render.
    pub fn replace(&mut self, seats: Vec<Seat>) {
        self.seats = seats;
    }

    pub fn seat(&self, seat_id: u32) -> Option<&Seat> {
        self.seats.iter().find(|s| s.seat_id == seat_id)
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Resolve the floor plan against the fetched seats, row by row.
    pub fn rows(&self) -> Vec<Vec<Cell<'_>>> {
        FLOOR_PLAN
            .iter()
            .map(|row| row.iter().map(|&code| self.cell(code)).collect())
            .collect()
    }

    fn cell(&self, code: i32) -> Cell<'_> {
        match code {
            0 => Cell::Gap,
            DOOR_MARKER => Cell::Door,
            id => {
                let id = u32::try_from(id).unwrap_or(0);
                self.seat(id).map_or(Cell::Unknown(id), Cell::Seat)
            }
        }
    }
}

/// Decide what a click on `seat` does. Maintenance wins over everything;
/// after that the mode decides.
pub fn click_outcome(seat: &Seat, mode: GridMode, member: Option<&MemberInfo>) -> ClickOutcome {
    if seat.status == SeatStatus::Maintenance {
        return match mode {
            GridMode::ViewOnly => ClickOutcome::Ignored,
            _ => ClickOutcome::Blocked {
                title: "Unavailable",
                message: format!("Seat {} is under maintenance.", seat.seat_id),
            },
        };
    }
    match mode {
        GridMode::ViewOnly => ClickOutcome::Ignored,
        GridMode::Purchase => match &seat.status {
            SeatStatus::Available => {
                if seat.kind == SeatKind::Fixed && !is_full_member(member) {
                    ClickOutcome::Blocked {
                        title: "Members only",
                        message: "Fixed desks require a signed-in member account.".to_string(),
                    }
                } else {
                    ClickOutcome::Select
                }
            }
            SeatStatus::Occupied { .. } => ClickOutcome::Blocked {
                title: "In use",
                message: format!("Seat {} is currently in use.", seat.seat_id),
            },
            SeatStatus::Maintenance => unreachable!("handled above"),
        },
        GridMode::CheckOut => {
            if seat.is_occupied() {
                ClickOutcome::Select
            } else {
                ClickOutcome::Blocked {
                    title: "Empty seat",
                    message: format!("Seat {} has no one to check out.", seat.seat_id),
                }
            }
        }
    }
}

fn is_full_member(member: Option<&MemberInfo>) -> bool {
    member.is_some_and(|m| m.role == OccupantRole::Member)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seat::SeatStatus;

    fn seat(seat_id: u32, kind: SeatKind, status: SeatStatus) -> Seat {
        Seat {
            seat_id,
            kind,
            status,
        }
    }

    fn occupied() -> SeatStatus {
        SeatStatus::Occupied {
            user_name: "Juno".to_string(),
            role: OccupantRole::Guest,
            expires_at: None,
        }
    }

    fn member(role: OccupantRole) -> MemberInfo {
        MemberInfo {
            member_id: 1,
            name: "Hana".to_string(),
            phone: "010-1234-5678".to_string(),
            role,
            saved_time_minute: 0,
            has_period_pass: false,
        }
    }

    #[test]
    fn test_rows_resolve_plan_markers() {
        let grid = SeatGrid::new(vec![seat(1, SeatKind::Free, SeatStatus::Available)]);
        let rows = grid.rows();
        assert_eq!(rows.len(), FLOOR_PLAN.len());
        assert!(matches!(rows[0][0], Cell::Seat(s) if s.seat_id == 1));
        assert_eq!(rows[0][4], Cell::Gap);
        assert_eq!(rows[4][0], Cell::Door);
        // Seat 2 exists in the plan but not in the fetched list.
        assert_eq!(rows[0][1], Cell::Unknown(2));
    }

    #[test]
    fn test_maintenance_blocked_in_every_mode() {
        let s = seat(3, SeatKind::Free, SeatStatus::Maintenance);
        for mode in [GridMode::Purchase, GridMode::CheckOut] {
            assert!(matches!(
                click_outcome(&s, mode, None),
                ClickOutcome::Blocked { .. }
            ));
        }
        assert_eq!(
            click_outcome(&s, GridMode::ViewOnly, None),
            ClickOutcome::Ignored
        );
    }

    #[test]
    fn test_purchase_fixed_seat_requires_member() {
        let s = seat(19, SeatKind::Fixed, SeatStatus::Available);
        assert!(matches!(
            click_outcome(&s, GridMode::Purchase, None),
            ClickOutcome::Blocked { .. }
        ));
        let guest = member(OccupantRole::Guest);
        assert!(matches!(
            click_outcome(&s, GridMode::Purchase, Some(&guest)),
            ClickOutcome::Blocked { .. }
        ));
        let full = member(OccupantRole::Member);
        assert_eq!(
            click_outcome(&s, GridMode::Purchase, Some(&full)),
            ClickOutcome::Select
        );
    }

    #[test]
    fn test_purchase_free_seat_open_to_anyone() {
        let s = seat(2, SeatKind::Free, SeatStatus::Available);
        assert_eq!(click_outcome(&s, GridMode::Purchase, None), ClickOutcome::Select);
    }

    #[test]
    fn test_purchase_occupied_seat_blocked() {
        let s = seat(2, SeatKind::Free, occupied());
        assert!(matches!(
            click_outcome(&s, GridMode::Purchase, None),
            ClickOutcome::Blocked { .. }
        ));
    }

    #[test]
    fn test_check_out_only_occupied() {
        let empty = seat(5, SeatKind::Free, SeatStatus::Available);
        assert!(matches!(
            click_outcome(&empty, GridMode::CheckOut, None),
            ClickOutcome::Blocked { .. }
        ));
        let taken = seat(5, SeatKind::Free, occupied());
        assert_eq!(click_outcome(&taken, GridMode::CheckOut, None), ClickOutcome::Select);
    }

    #[test]
    fn test_view_only_ignores_clicks() {
        let taken = seat(5, SeatKind::Free, occupied());
        assert_eq!(
            click_outcome(&taken, GridMode::ViewOnly, None),
            ClickOutcome::Ignored
        );
    }

    #[test]
    fn test_replace_keeps_plan_stable() {
        let mut grid = SeatGrid::new(vec![seat(1, SeatKind::Free, SeatStatus::Available)]);
        grid.replace(vec![seat(1, SeatKind::Free, occupied())]);
        assert!(grid.seat(1).unwrap().is_occupied());
    }
}
