/// Occupant name the backend stores on a seat that is out of service.
/// Only ever seen on the wire; decoded into `SeatStatus::Maintenance`.
pub const MAINTENANCE_SENTINEL: &str = "점검중";

/// Wire string the kiosk endpoints use for period-pass seats; the web
/// endpoints say "fix" for the same thing.
pub const TICKET_KIND_PERIOD: &str = "기간제";

/// Seconds between background refetches of the seat map.
pub const SEAT_REFRESH_SECS: u64 = 5;

/// Seconds the payment modal spends in the processing phase before it can
/// show the result.
pub const PAYMENT_PROCESSING_SECS: u8 = 2;

/// Countdown shown on the payment done screen before auto-returning home.
pub const PAYMENT_DONE_COUNTDOWN_SECS: u8 = 5;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
