use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::api::CafeApi;
use crate::event::{AppEvent, EventSender};

const POLL_STEP: Duration = Duration::from_millis(50);

/// Background seat refresher. One fetch every `interval`, results
/// delivered as `SeatsRefreshed`; the caller does the initial blocking
/// fetch itself so the loading state is only shown once.
pub struct SeatPoller {
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SeatPoller {
    pub fn spawn(api: Arc<dyn CafeApi>, interval: Duration, sender: EventSender) -> Self {
        let cancel = Arc::new(AtomicBool::new(false));
        let thread_cancel = Arc::clone(&cancel);
        let handle = thread::spawn(move || {
            let mut next_fetch = Instant::now() + interval;
            loop {
                if thread_cancel.load(Ordering::Relaxed) || sender.is_cancelled() {
                    return;
                }
                if Instant::now() >= next_fetch {
                    next_fetch = Instant::now() + interval;
                    match api.kiosk_seats() {
                        Ok(seats) => sender.send(AppEvent::SeatsRefreshed(seats)),
                        Err(e) => {
                            log::warn!("seat refresh failed: {e}");
                            sender.send(AppEvent::SeatsRefreshFailed(e.to_string()));
                        }
                    }
                }
                thread::sleep(POLL_STEP.min(interval));
            }
        });
        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Stop polling and wait for the worker to exit. An in-flight fetch
    /// finishes first; its result is discarded by the sender's cancel
    /// flag if the UI is gone.
    pub fn stop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SeatPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockCafeApi;
    use crate::seat::{Seat, SeatKind};
    use std::sync::mpsc;

    #[test]
    fn test_poller_delivers_refreshes() {
        let api = Arc::new(MockCafeApi::with_seats(vec![Seat::available(
            1,
            SeatKind::Free,
        )]));
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let sender = EventSender::new(tx, cancel);

        let api_dyn: Arc<dyn CafeApi> = api.clone();
        let mut poller = SeatPoller::spawn(api_dyn, Duration::from_millis(10), sender);

        let event = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(matches!(event, AppEvent::SeatsRefreshed(seats) if seats.len() == 1));
        poller.stop();
    }

    #[test]
    fn test_stop_halts_fetching() {
        let api = Arc::new(MockCafeApi::default());
        let (tx, rx) = mpsc::channel();
        let sender = EventSender::new(tx, Arc::new(AtomicBool::new(false)));

        let api_dyn: Arc<dyn CafeApi> = api.clone();
        let mut poller = SeatPoller::spawn(api_dyn, Duration::from_millis(10), sender);
        let _ = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        poller.stop();

        let after_stop = *api.seat_fetches.lock().unwrap();
        thread::sleep(Duration::from_millis(50));
        assert_eq!(*api.seat_fetches.lock().unwrap(), after_stop);
    }
}
