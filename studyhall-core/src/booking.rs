use serde::{Deserialize, Serialize};

use crate::api::PaymentRequest;
use crate::seat::{Seat, SeatKind};
use crate::ticket::{Profile, Ticket, TicketKind};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum BookingStep {
    TicketSelect,
    SeatSelect,
    Payment,
    Done,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SeatRejection {
    NotFixed,
    NotAvailable,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PointExceeded {
    /// Largest deduction this draft allows, `min(balance, price)`.
    pub limit: u32,
}

/// One web booking in progress. The whole draft serializes, so it can be
/// stashed and resumed without any navigation state to replay.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BookingDraft {
    pub draft_id: String,
    step: BookingStep,
    pub ticket: Option<Ticket>,
    pub seat_id: Option<u32>,
    pub profile: Option<Profile>,
    pub point_used: u32,
    pub order_id: Option<u32>,
}

impl BookingDraft {
    pub fn new(draft_id: impl Into<String>) -> Self {
        Self {
            draft_id: draft_id.into(),
            step: BookingStep::TicketSelect,
            ticket: None,
            seat_id: None,
            profile: None,
            point_used: 0,
            order_id: None,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    /// Period passes go on to seat selection; hourly tickets straight to
    /// payment.
    pub fn select_ticket(&mut self, ticket: Ticket) {
        let next = match ticket.kind {
            TicketKind::Period => BookingStep::SeatSelect,
            TicketKind::Time => BookingStep::Payment,
        };
        if self.ticket.as_ref() != Some(&ticket) {
            self.seat_id = None;
            self.point_used = 0;
        }
        self.ticket = Some(ticket);
        self.step = next;
    }

    pub fn select_seat(&mut self, seat: &Seat) -> Result<(), SeatRejection> {
        if seat.kind != SeatKind::Fixed {
            return Err(SeatRejection::NotFixed);
        }
        if !seat.is_available() {
            return Err(SeatRejection::NotAvailable);
        }
        self.seat_id = Some(seat.seat_id);
        self.step = BookingStep::Payment;
        Ok(())
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }

    /// Apply a mileage deduction. A request beyond `min(balance, price)`
    /// leaves the draft unchanged.
    pub fn apply_point(&mut self, requested: u32) -> Result<(), PointExceeded> {
        let balance = self.profile.as_ref().map_or(0, |p| p.total_mileage);
        let price = self.ticket.as_ref().map_or(0, |t| t.price);
        let limit = balance.min(price);
        if requested > limit {
            log::warn!(
                "draft {}: point request {requested} exceeds limit {limit}",
                self.draft_id
            );
            return Err(PointExceeded { limit });
        }
        self.point_used = requested;
        Ok(())
    }

    pub fn total_due(&self) -> u32 {
        let price = self.ticket.as_ref().map_or(0, |t| t.price);
        price.saturating_sub(self.point_used)
    }

    /// Try to show `requested`; lands on the earliest step whose
    /// prerequisites the draft actually satisfies. Deep links into a
    /// half-empty draft degrade instead of failing.
    pub fn enter_step(&mut self, requested: BookingStep) -> BookingStep {
        let entered = match requested {
            BookingStep::TicketSelect => BookingStep::TicketSelect,
            BookingStep::SeatSelect => {
                if self.needs_seat() {
                    BookingStep::SeatSelect
                } else {
                    BookingStep::TicketSelect
                }
            }
            BookingStep::Payment => {
                if self.ticket.is_none() {
                    BookingStep::TicketSelect
                } else if self.needs_seat() && self.seat_id.is_none() {
                    BookingStep::SeatSelect
                } else {
                    BookingStep::Payment
                }
            }
            BookingStep::Done => {
                if self.order_id.is_some() {
                    BookingStep::Done
                } else if self.ticket.is_none() {
                    BookingStep::TicketSelect
                } else {
                    BookingStep::Payment
                }
            }
        };
        self.step = entered;
        entered
    }

    fn needs_seat(&self) -> bool {
        self.ticket
            .as_ref()
            .is_some_and(|t| t.kind == TicketKind::Period)
    }

    /// Ready-to-send payment body, once the draft has everything.
    pub fn payment_request(&self) -> Option<PaymentRequest> {
        let ticket = self.ticket.as_ref()?;
        let profile = self.profile.clone()?;
        if self.needs_seat() && self.seat_id.is_none() {
            return None;
        }
        Some(PaymentRequest {
            product_id: ticket.product_id,
            seat_id: self.seat_id,
            profile,
            point_used: self.point_used,
        })
    }

    pub fn complete(&mut self, order_id: u32) {
        self.order_id = Some(order_id);
        self.step = BookingStep::Done;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seat::SeatStatus;

    fn time_ticket() -> Ticket {
        Ticket {
            product_id: 1,
            name: "4시간권".to_string(),
            price: 7000,
            kind: TicketKind::Time,
        }
    }

    fn period_ticket() -> Ticket {
        Ticket {
            product_id: 9,
            name: "4주 고정석".to_string(),
            price: 99000,
            kind: TicketKind::Period,
        }
    }

    fn profile(mileage: u32) -> Profile {
        Profile {
            name: "Hana".to_string(),
            phone: "010-1234-5678".to_string(),
            email: "hana@example.com".to_string(),
            total_mileage: mileage,
        }
    }

    fn fixed_seat(seat_id: u32, status: SeatStatus) -> Seat {
        Seat {
            seat_id,
            kind: SeatKind::Fixed,
            status,
        }
    }

    #[test]
    fn test_time_ticket_skips_seat_selection() {
        let mut draft = BookingDraft::new("d1");
        draft.select_ticket(time_ticket());
        assert_eq!(draft.step(), BookingStep::Payment);
    }

    #[test]
    fn test_period_ticket_requires_fixed_available_seat() {
        let mut draft = BookingDraft::new("d1");
        draft.select_ticket(period_ticket());
        assert_eq!(draft.step(), BookingStep::SeatSelect);

        let free = Seat::available(2, SeatKind::Free);
        assert_eq!(draft.select_seat(&free), Err(SeatRejection::NotFixed));

        let taken = fixed_seat(
            19,
            SeatStatus::Occupied {
                user_name: "Juno".to_string(),
                role: crate::seat::OccupantRole::Member,
                expires_at: None,
            },
        );
        assert_eq!(draft.select_seat(&taken), Err(SeatRejection::NotAvailable));

        let open = fixed_seat(20, SeatStatus::Available);
        assert_eq!(draft.select_seat(&open), Ok(()));
        assert_eq!(draft.step(), BookingStep::Payment);
    }

    #[test]
    fn test_point_clamped_to_min_of_balance_and_price() {
        let mut draft = BookingDraft::new("d1");
        draft.select_ticket(time_ticket()); // price 7000
        draft.set_profile(profile(5000));

        assert_eq!(draft.apply_point(5000), Ok(()));
        assert_eq!(draft.total_due(), 2000);

        // Balance exceeds price: limit is the price.
        draft.set_profile(profile(20000));
        assert_eq!(draft.apply_point(7001), Err(PointExceeded { limit: 7000 }));
        // Rejected request leaves the previous value in place.
        assert_eq!(draft.point_used, 5000);
        assert_eq!(draft.apply_point(7000), Ok(()));
        assert_eq!(draft.total_due(), 0);
    }

    #[test]
    fn test_enter_step_falls_back_to_satisfiable() {
        let mut draft = BookingDraft::new("d1");
        assert_eq!(draft.enter_step(BookingStep::Payment), BookingStep::TicketSelect);
        assert_eq!(draft.enter_step(BookingStep::Done), BookingStep::TicketSelect);

        draft.select_ticket(period_ticket());
        // No seat yet: payment degrades to seat selection.
        assert_eq!(draft.enter_step(BookingStep::Payment), BookingStep::SeatSelect);

        draft
            .select_seat(&fixed_seat(20, SeatStatus::Available))
            .unwrap();
        assert_eq!(draft.enter_step(BookingStep::Payment), BookingStep::Payment);
        assert_eq!(draft.enter_step(BookingStep::Done), BookingStep::Payment);

        draft.complete(9);
        assert_eq!(draft.enter_step(BookingStep::Done), BookingStep::Done);
    }

    #[test]
    fn test_seat_select_unreachable_for_time_ticket() {
        let mut draft = BookingDraft::new("d1");
        draft.select_ticket(time_ticket());
        assert_eq!(
            draft.enter_step(BookingStep::SeatSelect),
            BookingStep::TicketSelect
        );
    }

    #[test]
    fn test_draft_round_trips_through_json() {
        let mut draft = BookingDraft::new("d7");
        draft.select_ticket(period_ticket());
        draft
            .select_seat(&fixed_seat(19, SeatStatus::Available))
            .unwrap();
        draft.set_profile(profile(1000));
        draft.apply_point(500).unwrap();

        let json = serde_json::to_string(&draft).unwrap();
        let restored: BookingDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, draft);
        assert_eq!(restored.step(), BookingStep::Payment);
    }

    #[test]
    fn test_payment_request_requires_profile_and_seat() {
        let mut draft = BookingDraft::new("d1");
        draft.select_ticket(period_ticket());
        assert!(draft.payment_request().is_none());
        draft.set_profile(profile(0));
        assert!(draft.payment_request().is_none());
        draft
            .select_seat(&fixed_seat(19, SeatStatus::Available))
            .unwrap();
        let request = draft.payment_request().unwrap();
        assert_eq!(request.product_id, 9);
        assert_eq!(request.seat_id, Some(19));
    }
}
