use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TicketKind {
    /// Hourly pass, any free seat.
    #[serde(rename = "시간제")]
    Time,
    /// Period pass, bound to a fixed desk.
    #[serde(rename = "기간제")]
    Period,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Ticket {
    pub product_id: u32,
    pub name: String,
    pub price: u32,
    #[serde(rename = "type")]
    pub kind: TicketKind,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MemberInfo {
    pub member_id: u32,
    pub name: String,
    pub phone: String,
    pub role: crate::seat::OccupantRole,
    #[serde(default)]
    pub saved_time_minute: u32,
    #[serde(default)]
    pub has_period_pass: bool,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PaymentResult {
    pub product_name: String,
    pub price: u32,
    /// Numeric order id assigned by the backend; echoed on a combined
    /// purchase-and-check-in.
    pub order_id: u32,
}

/// Account details backing the web payment step.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Profile {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub total_mileage: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_kind_wire_strings() {
        let ticket: Ticket = serde_json::from_str(
            r#"{"product_id": 4, "name": "1일권", "price": 8000, "type": "시간제"}"#,
        )
        .unwrap();
        assert_eq!(ticket.kind, TicketKind::Time);

        let ticket: Ticket = serde_json::from_str(
            r#"{"product_id": 9, "name": "4주 고정석", "price": 99000, "type": "기간제"}"#,
        )
        .unwrap();
        assert_eq!(ticket.kind, TicketKind::Period);
    }

    #[test]
    fn test_payment_result_decodes_numeric_order_id() {
        let result: PaymentResult = serde_json::from_str(
            r#"{"product_name": "4시간권", "price": 5000, "order_id": 42}"#,
        )
        .unwrap();
        assert_eq!(result.order_id, 42);
        assert_eq!(result.price, 5000);
    }

    #[test]
    fn test_member_info_defaults() {
        let member: MemberInfo = serde_json::from_str(
            r#"{"member_id": 1, "name": "Hana", "phone": "010-1234-5678", "role": "member"}"#,
        )
        .unwrap();
        assert_eq!(member.saved_time_minute, 0);
        assert!(!member.has_period_pass);
    }
}
