use crate::constants::{PAYMENT_DONE_COUNTDOWN_SECS, PAYMENT_PROCESSING_SECS};
use crate::ticket::{PaymentResult, Ticket};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AlertKind {
    Warning,
    Error,
    Success,
}

/// Where acknowledging an alert sends the kiosk.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AfterAck {
    #[default]
    Stay,
    GoHome,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    pub after_ack: AfterAck,
}

impl Alert {
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Warning,
            title: title.into(),
            message: message.into(),
            after_ack: AfterAck::Stay,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: title.into(),
            message: message.into(),
            after_ack: AfterAck::Stay,
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            title: title.into(),
            message: message.into(),
            after_ack: AfterAck::Stay,
        }
    }

    pub fn then_home(mut self) -> Self {
        self.after_ack = AfterAck::GoHome;
        self
    }
}

/// Single alert slot. Opening while an alert is showing replaces it;
/// acknowledging takes the follow-up out so it runs at most once.
#[derive(Clone, Debug, Default)]
pub struct AlertModal {
    current: Option<Alert>,
}

impl AlertModal {
    pub fn open(&mut self, alert: Alert) {
        self.current = Some(alert);
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Alert> {
        self.current.as_ref()
    }

    pub fn acknowledge(&mut self) -> AfterAck {
        self.current
            .take()
            .map(|alert| alert.after_ack)
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PaymentPhase {
    /// Waiting for the card.
    Ready,
    Processing { ticks_left: u8 },
    Done { countdown: u8 },
    Failed { message: String },
}

/// Modal timings in whole seconds, one tick each.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PaymentTimings {
    pub processing_secs: u8,
    pub done_countdown_secs: u8,
}

impl Default for PaymentTimings {
    fn default() -> Self {
        Self {
            processing_secs: PAYMENT_PROCESSING_SECS,
            done_countdown_secs: PAYMENT_DONE_COUNTDOWN_SECS,
        }
    }
}

/// Card payment dialog state machine. Ticks arrive at 1 Hz from the app
/// loop; completion is latched so the countdown expiring and the user
/// pressing "home" in the same tick still hand over exactly one result.
#[derive(Clone, Debug)]
pub struct PaymentModal {
    pub ticket: Ticket,
    timings: PaymentTimings,
    phase: PaymentPhase,
    result: Option<PaymentResult>,
    completed: bool,
}

impl PaymentModal {
    pub fn new(ticket: Ticket) -> Self {
        Self::with_timings(ticket, PaymentTimings::default())
    }

    pub fn with_timings(ticket: Ticket, timings: PaymentTimings) -> Self {
        Self {
            ticket,
            timings,
            phase: PaymentPhase::Ready,
            result: None,
            completed: false,
        }
    }

    pub fn phase(&self) -> &PaymentPhase {
        &self.phase
    }

    /// Card inserted. Returns true when this actually starts processing,
    /// which is the caller's cue to fire the purchase request.
    pub fn insert_card(&mut self) -> bool {
        match self.phase {
            PaymentPhase::Ready => {
                self.phase = PaymentPhase::Processing {
                    ticks_left: self.timings.processing_secs,
                };
                true
            }
            _ => false,
        }
    }

    /// Failed phase offers retry in place rather than tearing down.
    pub fn retry(&mut self) -> bool {
        if matches!(self.phase, PaymentPhase::Failed { .. }) {
            self.phase = PaymentPhase::Ready;
            self.result = None;
            true
        } else {
            false
        }
    }

    pub fn purchase_succeeded(&mut self, result: PaymentResult) {
        if matches!(self.phase, PaymentPhase::Processing { .. }) {
            self.result = Some(result);
        }
    }

    pub fn purchase_failed(&mut self, message: String) {
        if matches!(self.phase, PaymentPhase::Processing { .. }) {
            self.phase = PaymentPhase::Failed { message };
            self.result = None;
        }
    }

    /// Advance one second. Yields the payment result exactly once, when
    /// the done countdown reaches zero.
    pub fn tick(&mut self) -> Option<PaymentResult> {
        match self.phase.clone() {
            PaymentPhase::Processing { ticks_left } => {
                let ticks_left = ticks_left.saturating_sub(1);
                if ticks_left == 0 && self.result.is_some() {
                    self.phase = PaymentPhase::Done {
                        countdown: self.timings.done_countdown_secs,
                    };
                } else {
                    self.phase = PaymentPhase::Processing { ticks_left };
                }
                None
            }
            PaymentPhase::Done { countdown } => {
                let countdown = countdown.saturating_sub(1);
                self.phase = PaymentPhase::Done { countdown };
                if countdown == 0 { self.finish() } else { None }
            }
            PaymentPhase::Ready | PaymentPhase::Failed { .. } => None,
        }
    }

    /// Manual "go home" from the done screen. Same latch as the
    /// countdown path.
    pub fn go_home(&mut self) -> Option<PaymentResult> {
        if matches!(self.phase, PaymentPhase::Done { .. }) {
            self.finish()
        } else {
            None
        }
    }

    fn finish(&mut self) -> Option<PaymentResult> {
        if self.completed {
            return None;
        }
        self.completed = true;
        self.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::TicketKind;

    fn ticket() -> Ticket {
        Ticket {
            product_id: 4,
            name: "2시간권".to_string(),
            price: 4000,
            kind: TicketKind::Time,
        }
    }

    fn result() -> PaymentResult {
        PaymentResult {
            product_name: "2시간권".to_string(),
            price: 4000,
            order_id: 119,
        }
    }

    fn modal_in_done(countdown_ticks: u8) -> PaymentModal {
        let mut modal = PaymentModal::new(ticket());
        assert!(modal.insert_card());
        modal.purchase_succeeded(result());
        for _ in 0..crate::constants::PAYMENT_PROCESSING_SECS {
            assert_eq!(modal.tick(), None);
        }
        assert!(matches!(modal.phase(), PaymentPhase::Done { .. }));
        for _ in 0..countdown_ticks {
            modal.tick();
        }
        modal
    }

    #[test]
    fn test_alert_replace_on_open() {
        let mut alerts = AlertModal::default();
        alerts.open(Alert::warning("first", "a"));
        alerts.open(Alert::error("second", "b").then_home());
        assert_eq!(alerts.current().unwrap().title, "second");
        assert_eq!(alerts.acknowledge(), AfterAck::GoHome);
        assert!(!alerts.is_open());
    }

    #[test]
    fn test_alert_acknowledge_at_most_once() {
        let mut alerts = AlertModal::default();
        alerts.open(Alert::success("done", "ok").then_home());
        assert_eq!(alerts.acknowledge(), AfterAck::GoHome);
        // Second acknowledge finds an empty slot.
        assert_eq!(alerts.acknowledge(), AfterAck::Stay);
    }

    #[test]
    fn test_payment_happy_path_sequences_phases() {
        let mut modal = PaymentModal::new(ticket());
        assert!(modal.insert_card());
        assert!(!modal.insert_card());
        modal.purchase_succeeded(result());
        assert_eq!(modal.tick(), None);
        assert_eq!(modal.tick(), None);
        assert_eq!(modal.phase(), &PaymentPhase::Done { countdown: 5 });
        for _ in 0..4 {
            assert_eq!(modal.tick(), None);
        }
        assert_eq!(modal.tick(), Some(result()));
    }

    #[test]
    fn test_payment_waits_for_result_before_done() {
        let mut modal = PaymentModal::new(ticket());
        modal.insert_card();
        // Processing ticks elapse but no approval yet.
        modal.tick();
        modal.tick();
        assert!(matches!(modal.phase(), PaymentPhase::Processing { .. }));
        modal.purchase_succeeded(result());
        modal.tick();
        assert!(matches!(modal.phase(), PaymentPhase::Done { .. }));
    }

    #[test]
    fn test_completion_fires_once_when_countdown_and_home_race() {
        let mut modal = modal_in_done(4);
        // Countdown hits zero and the user presses home in the same tick.
        let from_tick = modal.tick();
        let from_home = modal.go_home();
        assert_eq!(
            u8::from(from_tick.is_some()) + u8::from(from_home.is_some()),
            1
        );
    }

    #[test]
    fn test_manual_home_before_countdown_fires_once() {
        let mut modal = modal_in_done(1);
        assert_eq!(modal.go_home(), Some(result()));
        assert_eq!(modal.go_home(), None);
        assert_eq!(modal.tick(), None);
    }

    #[test]
    fn test_custom_timings_respected() {
        let timings = PaymentTimings {
            processing_secs: 1,
            done_countdown_secs: 2,
        };
        let mut modal = PaymentModal::with_timings(ticket(), timings);
        modal.insert_card();
        modal.purchase_succeeded(result());
        assert_eq!(modal.tick(), None);
        assert_eq!(modal.phase(), &PaymentPhase::Done { countdown: 2 });
        assert_eq!(modal.tick(), None);
        assert_eq!(modal.tick(), Some(result()));
    }

    #[test]
    fn test_failed_purchase_offers_retry() {
        let mut modal = PaymentModal::new(ticket());
        modal.insert_card();
        modal.purchase_failed("card declined".to_string());
        assert!(matches!(modal.phase(), PaymentPhase::Failed { .. }));
        assert_eq!(modal.tick(), None);
        assert!(modal.retry());
        assert_eq!(modal.phase(), &PaymentPhase::Ready);
        assert!(modal.insert_card());
    }
}
