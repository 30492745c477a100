use anyhow::Result;
use chrono::{DateTime, Utc};

use super::{
    CheckInReceipt, CheckInRequest, CheckOutReceipt, CheckOutRequest, PaymentReceipt,
    PaymentRequest, PurchaseRequest,
};
use crate::seat::Seat;
use crate::ticket::{MemberInfo, PaymentResult, Profile, Ticket};

/// Everything the kiosk and web flows ask of the backend. Implemented by
/// `HttpCafeApi` in production and `MockCafeApi` in tests.
pub trait CafeApi: Send + Sync {
    fn kiosk_seats(&self) -> Result<Vec<Seat>>;

    fn check_in(&self, request: &CheckInRequest) -> Result<CheckInReceipt>;

    fn check_out(&self, request: &CheckOutRequest) -> Result<CheckOutReceipt>;

    fn purchase(&self, request: &PurchaseRequest) -> Result<PaymentResult>;

    fn member_login(&self, phone: &str, pin: &str) -> Result<MemberInfo>;

    fn web_seats(&self) -> Result<Vec<Seat>>;

    fn seat_end_time(&self, seat_id: u32) -> Result<Option<DateTime<Utc>>>;

    fn tickets(&self) -> Result<Vec<Ticket>>;

    fn submit_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt>;

    fn me(&self) -> Result<Profile>;
}
