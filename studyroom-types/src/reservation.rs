//! Reservations, their lifecycle states and per-partition booking summaries.
//!
//! Date-times travel as strings; the client parses them where it needs
//! wall-clock arithmetic.

use serde::{Deserialize, Serialize};

use crate::{PartitionId, ReservationId, RoomId, UserId};

/// Reservation lifecycle state
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationState {
    #[default]
    Reserved,
    Visited,
    NotVisited,
    Processed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl ReservationState {
    /// Wire name, as sent in `PATCH /reservations/admin/{id}`
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Reserved => "RESERVED",
            Self::Visited => "VISITED",
            Self::NotVisited => "NOT_VISITED",
            Self::Processed => "PROCESSED",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ReservationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reserved => write!(f, "Reserved"),
            Self::Visited => write!(f, "Visited"),
            Self::NotVisited => write!(f, "No-show"),
            Self::Processed => write!(f, "Processed"),
            Self::Cancelled => write!(f, "Cancelled"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// `POST /reservations` request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub room_partition_id: PartitionId,
    pub start_date_time: String,
    pub end_date_time: String,
}

/// One reservation as listed by the reservation endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationInfo {
    pub reservation_id: ReservationId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub room_id: Option<RoomId>,
    #[serde(default)]
    pub room_name: String,
    #[serde(default)]
    pub partition_number: Option<String>,
    pub start_date_time: String,
    pub end_date_time: String,
    #[serde(default)]
    pub state: ReservationState,
}

/// Payload of the list endpoints (`/reservations/me`, admin lookups, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationListResponse {
    #[serde(default)]
    pub reservation_info_responses: Vec<ReservationInfo>,
}

/// A booked interval inside a partition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReservedInterval {
    pub start_date_time: String,
    pub end_date_time: String,
}

/// Booking summary for one partition on one date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PartitionReservationInfo {
    pub room_partition_id: PartitionId,
    #[serde(default)]
    pub room_name: String,
    #[serde(default)]
    pub partition_number: String,
    #[serde(default)]
    pub reservations: Vec<ReservedInterval>,
}

/// `GET /reservations/by-date/{departmentId}` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PartitionReservationsResponse {
    #[serde(default)]
    pub partition_reservation_infos: Vec<PartitionReservationInfo>,
}

/// `PATCH /reservations/admin/{id}` request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateChangeRequest {
    pub state: ReservationState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_wire_names() {
        let body = StateChangeRequest {
            state: ReservationState::NotVisited,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"state":"NOT_VISITED"}"#
        );
        assert_eq!(ReservationState::Processed.as_wire(), "PROCESSED");
    }

    #[test]
    fn test_unknown_state_does_not_fail() {
        let info: ReservationInfo = serde_json::from_str(
            r#"{"reservationId":1,"startDateTime":"2024-05-23T09:00:00","endDateTime":"2024-05-23T10:00:00","state":"EXPIRED"}"#,
        )
        .unwrap();
        assert_eq!(info.state, ReservationState::Unknown);
    }

    #[test]
    fn test_new_reservation_is_camel_case() {
        let body = NewReservation {
            room_partition_id: 3,
            start_date_time: "2024-05-23T09:00:00.000Z".to_string(),
            end_date_time: "2024-05-23T10:00:00.000Z".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["roomPartitionId"], 3);
        assert!(json.get("startDateTime").is_some());
    }
}
