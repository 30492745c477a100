use std::sync::Mutex;

use anyhow::Result;
use chrono::{DateTime, Utc};

use super::provider::CafeApi;
use super::{
    CheckInReceipt, CheckInRequest, CheckOutReceipt, CheckOutRequest, PaymentReceipt,
    PaymentRequest, PurchaseRequest,
};
use crate::seat::Seat;
use crate::ticket::{MemberInfo, PaymentResult, Profile, Ticket};

/// Scriptable `CafeApi` for tests. Each `*_result` slot is consumed on
/// first use and falls back to an empty success; requests are recorded
/// for assertions.
#[derive(Default)]
pub struct MockCafeApi {
    pub seats: Mutex<Vec<Seat>>,
    pub ticket_list: Mutex<Vec<Ticket>>,

    pub check_in_result: Mutex<Option<Result<CheckInReceipt>>>,
    pub check_out_result: Mutex<Option<Result<CheckOutReceipt>>>,
    pub purchase_result: Mutex<Option<Result<PaymentResult>>>,
    pub login_result: Mutex<Option<Result<MemberInfo>>>,
    pub payment_result: Mutex<Option<Result<PaymentReceipt>>>,
    pub me_result: Mutex<Option<Result<Profile>>>,
    pub end_time_result: Mutex<Option<Result<Option<DateTime<Utc>>>>>,

    pub check_in_requests: Mutex<Vec<CheckInRequest>>,
    pub check_out_requests: Mutex<Vec<CheckOutRequest>>,
    pub purchase_requests: Mutex<Vec<PurchaseRequest>>,
    pub payment_requests: Mutex<Vec<PaymentRequest>>,
    pub login_attempts: Mutex<Vec<(String, String)>>,
    pub seat_fetches: Mutex<u32>,
}

impl MockCafeApi {
    pub fn with_seats(seats: Vec<Seat>) -> Self {
        let mock = Self::default();
        *mock.seats.lock().unwrap() = seats;
        mock
    }
}

impl CafeApi for MockCafeApi {
    fn kiosk_seats(&self) -> Result<Vec<Seat>> {
        *self.seat_fetches.lock().unwrap() += 1;
        Ok(self.seats.lock().unwrap().clone())
    }

    fn check_in(&self, request: &CheckInRequest) -> Result<CheckInReceipt> {
        self.check_in_requests.lock().unwrap().push(request.clone());
        self.check_in_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| {
                Ok(CheckInReceipt {
                    seat_id: request.seat_id,
                    ticket_expired_time: None,
                })
            })
    }

    fn check_out(&self, request: &CheckOutRequest) -> Result<CheckOutReceipt> {
        self.check_out_requests.lock().unwrap().push(request.clone());
        self.check_out_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| {
                Ok(CheckOutReceipt {
                    time_used_minutes: 0,
                    remaining_time_minutes: 0,
                })
            })
    }

    fn purchase(&self, request: &PurchaseRequest) -> Result<PaymentResult> {
        self.purchase_requests.lock().unwrap().push(request.clone());
        self.purchase_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| {
                Ok(PaymentResult {
                    product_name: "mock".to_string(),
                    price: 0,
                    order_id: 0,
                })
            })
    }

    fn member_login(&self, phone: &str, pin: &str) -> Result<MemberInfo> {
        self.login_attempts
            .lock()
            .unwrap()
            .push((phone.to_string(), pin.to_string()));
        self.login_result.lock().unwrap().take().unwrap_or_else(|| {
            Ok(MemberInfo {
                member_id: 1,
                name: "mock".to_string(),
                phone: phone.to_string(),
                role: crate::seat::OccupantRole::Member,
                saved_time_minute: 0,
                has_period_pass: false,
            })
        })
    }

    fn web_seats(&self) -> Result<Vec<Seat>> {
        Ok(self.seats.lock().unwrap().clone())
    }

    fn seat_end_time(&self, _seat_id: u32) -> Result<Option<DateTime<Utc>>> {
        self.end_time_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Ok(None))
    }

    fn tickets(&self) -> Result<Vec<Ticket>> {
        Ok(self.ticket_list.lock().unwrap().clone())
    }

    fn submit_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt> {
        self.payment_requests.lock().unwrap().push(request.clone());
        self.payment_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| {
                Ok(PaymentReceipt {
                    order_id: 0,
                    payment_amount: 0,
                })
            })
    }

    fn me(&self) -> Result<Profile> {
        self.me_result.lock().unwrap().take().unwrap_or_else(|| {
            Ok(Profile {
                name: "mock".to_string(),
                phone: "010-0000-0000".to_string(),
                email: "mock@example.com".to_string(),
                total_mileage: 0,
            })
        })
    }
}
