use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::constants::MAINTENANCE_SENTINEL;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SeatKind {
    /// Open seating, hourly tickets.
    Free,
    /// Reserved desk, period passes only.
    Fixed,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OccupantRole {
    Member,
    Guest,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SeatStatus {
    Available,
    Occupied {
        user_name: String,
        role: OccupantRole,
        expires_at: Option<DateTime<Utc>>,
    },
    Maintenance,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(from = "SeatWire")]
pub struct Seat {
    pub seat_id: u32,
    pub kind: SeatKind,
    pub status: SeatStatus,
}

impl Seat {
    pub fn available(seat_id: u32, kind: SeatKind) -> Self {
        Self {
            seat_id,
            kind,
            status: SeatStatus::Available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == SeatStatus::Available
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self.status, SeatStatus::Occupied { .. })
    }

    pub fn occupant_role(&self) -> Option<OccupantRole> {
        match &self.status {
            SeatStatus::Occupied { role, .. } => Some(*role),
            _ => None,
        }
    }

    /// Seconds left on the occupant's ticket, clamped at zero. Derived
    /// locally from the cached expiry; never asked of the server.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        match &self.status {
            SeatStatus::Occupied {
                expires_at: Some(expiry),
                ..
            } => (*expiry - now).num_seconds().max(0),
            _ => 0,
        }
    }
}

/// Seat row as the backend sends it. `is_status=false` with the
/// maintenance occupant name means the seat is out of service, not in use.
#[derive(Deserialize)]
struct SeatWire {
    seat_id: u32,
    #[serde(rename = "type", default)]
    seat_type: Option<String>,
    #[serde(default = "default_true")]
    is_status: bool,
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    role: Option<OccupantRole>,
    #[serde(default)]
    ticket_expired_time: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl From<SeatWire> for Seat {
    fn from(wire: SeatWire) -> Self {
        let kind = match wire.seat_type.as_deref() {
            Some("fix" | crate::constants::TICKET_KIND_PERIOD) => SeatKind::Fixed,
            _ => SeatKind::Free,
        };
        let status = if wire.is_status {
            SeatStatus::Available
        } else {
            match wire.user_name {
                Some(name) if name == MAINTENANCE_SENTINEL => SeatStatus::Maintenance,
                name => SeatStatus::Occupied {
                    user_name: name.unwrap_or_default(),
                    role: wire.role.unwrap_or(OccupantRole::Guest),
                    expires_at: wire.ticket_expired_time,
                },
            }
        };
        Self {
            seat_id: wire.seat_id,
            kind,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn occupied(expires_at: Option<DateTime<Utc>>) -> Seat {
        Seat {
            seat_id: 1,
            kind: SeatKind::Free,
            status: SeatStatus::Occupied {
                user_name: "Jimin".to_string(),
                role: OccupantRole::Member,
                expires_at,
            },
        }
    }

    #[test]
    fn test_maintenance_sentinel_decodes_to_status() {
        let seat: Seat = serde_json::from_str(
            r#"{"seat_id": 3, "type": "free", "is_status": false, "user_name": "점검중"}"#,
        )
        .unwrap();
        assert_eq!(seat.status, SeatStatus::Maintenance);
    }

    #[test]
    fn test_occupied_seat_decodes_role_and_expiry() {
        let seat: Seat = serde_json::from_str(
            r#"{
                "seat_id": 7,
                "type": "fix",
                "is_status": false,
                "user_name": "Suji",
                "role": "guest",
                "ticket_expired_time": "2026-08-30T12:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(seat.kind, SeatKind::Fixed);
        assert_eq!(seat.occupant_role(), Some(OccupantRole::Guest));
        assert!(seat.is_occupied());
    }

    #[test]
    fn test_available_seat_defaults() {
        let seat: Seat = serde_json::from_str(r#"{"seat_id": 2}"#).unwrap();
        assert!(seat.is_available());
        assert_eq!(seat.kind, SeatKind::Free);
    }

    #[test]
    fn test_remaining_seconds_floors_and_clamps() {
        let expiry = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let seat = occupied(Some(expiry));

        let now = Utc.with_ymd_and_hms(2026, 8, 30, 11, 59, 0).unwrap();
        assert_eq!(seat.remaining_seconds(now), 60);

        // Sub-second remainder is floored, not rounded.
        let now = expiry - chrono::Duration::milliseconds(1500);
        assert_eq!(seat.remaining_seconds(now), 1);

        let past = Utc.with_ymd_and_hms(2026, 8, 30, 13, 0, 0).unwrap();
        assert_eq!(seat.remaining_seconds(past), 0);
    }

    #[test]
    fn test_remaining_seconds_monotonic_under_ticks() {
        let expiry = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let seat = occupied(Some(expiry));
        let start = Utc.with_ymd_and_hms(2026, 8, 30, 11, 58, 0).unwrap();
        let mut last = seat.remaining_seconds(start);
        for tick in 1..=180 {
            let now = start + chrono::Duration::seconds(tick);
            let remaining = seat.remaining_seconds(now);
            assert!(remaining <= last);
            assert!(remaining >= 0);
            last = remaining;
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn test_no_expiry_means_zero_remaining() {
        let seat = occupied(None);
        assert_eq!(seat.remaining_seconds(Utc::now()), 0);
    }
}
