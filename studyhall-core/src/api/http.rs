use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::provider::CafeApi;
use super::{
    ApiError, CheckInReceipt, CheckInRequest, CheckOutReceipt, CheckOutRequest, PaymentReceipt,
    PaymentRequest, PurchaseRequest, parse_detail,
};
use crate::seat::Seat;
use crate::ticket::{MemberInfo, PaymentResult, Profile, Ticket};

pub struct HttpCafeApi {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpCafeApi {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        log::debug!("GET {path}");
        let response = self.agent.get(&self.url(path)).call();
        Self::decode(path, response)
    }

    fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        log::debug!("POST {path}");
        let response = self.agent.post(&self.url(path)).send_json(body);
        Self::decode(path, response)
    }

    fn decode<T: DeserializeOwned>(
        path: &str,
        response: Result<ureq::Response, ureq::Error>,
    ) -> Result<T, ApiError> {
        match response {
            Ok(response) => response
                .into_json::<T>()
                .map_err(|e| ApiError::Decode(e.to_string())),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                let detail = parse_detail(&body);
                log::warn!("{path} failed with status {status}: {detail}");
                Err(ApiError::Server { status, detail })
            }
            Err(ureq::Error::Transport(transport)) => {
                log::warn!("{path} transport error: {transport}");
                Err(ApiError::Transport(transport.to_string()))
            }
        }
    }
}

impl CafeApi for HttpCafeApi {
    fn kiosk_seats(&self) -> Result<Vec<Seat>> {
        Ok(self.get("/api/kiosk/seats")?)
    }

    fn check_in(&self, request: &CheckInRequest) -> Result<CheckInReceipt> {
        Ok(self.post("/api/kiosk/check-in", request)?)
    }

    fn check_out(&self, request: &CheckOutRequest) -> Result<CheckOutReceipt> {
        Ok(self.post("/api/kiosk/check-out", request)?)
    }

    fn purchase(&self, request: &PurchaseRequest) -> Result<PaymentResult> {
        Ok(self.post("/api/kiosk/purchase", request)?)
    }

    fn member_login(&self, phone: &str, pin: &str) -> Result<MemberInfo> {
        Ok(self.post("/api/kiosk/login", &json!({"phone": phone, "pin": pin}))?)
    }

    fn web_seats(&self) -> Result<Vec<Seat>> {
        Ok(self.get("/api/web/seat")?)
    }

    fn seat_end_time(&self, seat_id: u32) -> Result<Option<DateTime<Utc>>> {
        #[derive(serde::Deserialize)]
        struct EndTime {
            end_time: Option<DateTime<Utc>>,
        }
        let end: EndTime = self.get(&format!("/api/web/seat/endtime/{seat_id}"))?;
        Ok(end.end_time)
    }

    fn tickets(&self) -> Result<Vec<Ticket>> {
        Ok(self.get("/api/web/tickets")?)
    }

    fn submit_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt> {
        Ok(self.post("/api/web/payments", request)?)
    }

    fn me(&self) -> Result<Profile> {
        Ok(self.get("/api/web/me")?)
    }
}
