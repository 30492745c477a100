use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ticket::Profile;

mod http;
mod mock;
mod provider;

pub use http::HttpCafeApi;
pub use mock::MockCafeApi;
pub use provider::CafeApi;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CheckInRequest {
    pub phone: String,
    pub seat_id: u32,
    /// Present when check-in is combined with a just-finished purchase.
    pub order_id: Option<u32>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CheckInReceipt {
    pub seat_id: u32,
    /// When the ticket backing this check-in runs out; null for seats on
    /// a period pass.
    pub ticket_expired_time: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CheckOutRequest {
    pub seat_id: u32,
    /// Guest occupants authenticate with the phone that checked in.
    pub phone: Option<String>,
    /// Members authenticate with their PIN.
    pub pin: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CheckOutReceipt {
    pub time_used_minutes: u32,
    /// Unused minutes banked back onto a member's account.
    pub remaining_time_minutes: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PurchaseRequest {
    pub product_id: u32,
    pub phone: Option<String>,
    pub member_id: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaymentRequest {
    pub product_id: u32,
    pub seat_id: Option<u32>,
    pub profile: Profile,
    pub point_used: u32,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PaymentReceipt {
    pub order_id: u32,
    pub payment_amount: u32,
}

#[derive(Debug)]
pub enum ApiError {
    /// Non-success HTTP status; `detail` is the server's message after
    /// parsing the `{"detail": ...}` body, or a generic fallback.
    Server { status: u16, detail: String },
    Transport(String),
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server { detail, .. } => write!(f, "{detail}"),
            Self::Transport(msg) => write!(f, "Could not reach the server: {msg}"),
            Self::Decode(msg) => write!(f, "Unexpected response from the server: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

pub const GENERIC_SERVER_ERROR: &str = "Something went wrong. Please try again.";

/// Pull a human-readable message out of an error body. The backend sends
/// either `{"detail": "msg"}` or `{"detail": {"code": ..., "message": ...}}`.
pub fn parse_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return GENERIC_SERVER_ERROR.to_string();
    };
    match value.get("detail") {
        Some(Value::String(msg)) => msg.clone(),
        Some(Value::Object(obj)) => obj
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| GENERIC_SERVER_ERROR.to_string(), ToString::to_string),
        _ => GENERIC_SERVER_ERROR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_in_receipt_decodes_backend_shape() {
        let receipt: CheckInReceipt = serde_json::from_str(
            r#"{"usage_id": 31, "check_in_time": "2026-08-30T10:00:00Z", "seat_id": 4, "ticket_expired_time": "2026-08-30T14:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(receipt.seat_id, 4);
        assert!(receipt.ticket_expired_time.is_some());

        let receipt: CheckInReceipt =
            serde_json::from_str(r#"{"seat_id": 4, "ticket_expired_time": null}"#).unwrap();
        assert_eq!(receipt.ticket_expired_time, None);
    }

    #[test]
    fn test_check_out_receipt_decodes_backend_field_names() {
        let receipt: CheckOutReceipt = serde_json::from_str(
            r#"{"seat_id": 5, "time_used_minutes": 120, "remaining_time_minutes": 30}"#,
        )
        .unwrap();
        assert_eq!(receipt.time_used_minutes, 120);
        assert_eq!(receipt.remaining_time_minutes, 30);
    }

    #[test]
    fn test_payment_receipt_decodes_numeric_order_id() {
        let receipt: PaymentReceipt =
            serde_json::from_str(r#"{"order_id": 7, "payment_amount": 96000}"#).unwrap();
        assert_eq!(receipt.order_id, 7);
    }

    #[test]
    fn test_parse_detail_string_form() {
        assert_eq!(
            parse_detail(r#"{"detail": "이미 사용중인 좌석입니다."}"#),
            "이미 사용중인 좌석입니다."
        );
    }

    #[test]
    fn test_parse_detail_object_form() {
        let body = r#"{"detail": {"code": "LUGGAGE_DETECTED", "message": "Belongings detected on the seat."}}"#;
        assert_eq!(parse_detail(body), "Belongings detected on the seat.");
    }

    #[test]
    fn test_parse_detail_falls_back_on_garbage() {
        assert_eq!(parse_detail("<html>502</html>"), GENERIC_SERVER_ERROR);
        assert_eq!(parse_detail(r#"{"error": "nope"}"#), GENERIC_SERVER_ERROR);
        assert_eq!(parse_detail(r#"{"detail": {"code": 1}}"#), GENERIC_SERVER_ERROR);
    }
}
