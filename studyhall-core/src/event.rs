use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use crate::api::{CheckInReceipt, CheckOutReceipt};
use crate::seat::Seat;
use crate::ticket::{MemberInfo, PaymentResult, Ticket};

/// Results of background work, delivered to the UI loop over mpsc.
#[derive(Debug)]
pub enum AppEvent {
    SeatsLoaded(Vec<Seat>),
    SeatsLoadFailed(String),
    /// Background refresh; stale data stays on screen on failure.
    SeatsRefreshed(Vec<Seat>),
    SeatsRefreshFailed(String),
    TicketsLoaded(Vec<Ticket>),
    TicketsLoadFailed(String),
    LoginSucceeded(MemberInfo),
    LoginFailed(String),
    PurchaseCompleted(PaymentResult),
    PurchaseFailed(String),
    CheckInCompleted(CheckInReceipt),
    CheckInFailed(String),
    CheckOutCompleted(CheckOutReceipt),
    CheckOutFailed(String),
}

/// Handle given to worker threads: a channel plus the shared cancel
/// flag. Sends after the UI is gone are dropped silently.
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<AppEvent>,
    cancel: Arc<AtomicBool>,
}

impl EventSender {
    pub fn new(tx: mpsc::Sender<AppEvent>, cancel: Arc<AtomicBool>) -> Self {
        Self { tx, cancel }
    }

    pub fn send(&self, event: AppEvent) {
        if !self.is_cancelled() {
            let _ = self.tx.send(event);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}
