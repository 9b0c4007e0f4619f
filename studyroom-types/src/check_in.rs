//! Check-in by verification code and OTP retrieval.

use serde::{Deserialize, Serialize};

use crate::{ReservationId, RoomId};

/// Rooms a check-in desk is responsible for.
///
/// A single room goes over the wire as a bare number, several as a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RoomSelector {
    One(RoomId),
    Many(Vec<RoomId>),
}

impl From<Vec<RoomId>> for RoomSelector {
    fn from(mut ids: Vec<RoomId>) -> Self {
        if ids.len() == 1 {
            Self::One(ids.remove(0))
        } else {
            Self::Many(ids)
        }
    }
}

/// `POST /check-in` request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub verification_code: String,
    pub room_id: RoomSelector,
}

/// A reservation that was marked visited by a check-in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckedInReservation {
    pub reservation_id: ReservationId,
    #[serde(default)]
    pub name: String,
}

/// `POST /check-in` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponse {
    #[serde(default)]
    pub check_in_reservations: Vec<CheckedInReservation>,
}

/// `POST /check-in/otp` payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OtpResponse {
    pub verification_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_room_serializes_as_number() {
        let req = CheckInRequest {
            verification_code: "abc".to_string(),
            room_id: vec![306].into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["roomId"], 306);
    }

    #[test]
    fn test_several_rooms_serialize_as_list() {
        let req = CheckInRequest {
            verification_code: "abc".to_string(),
            room_id: vec![306, 428].into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["roomId"], serde_json::json!([306, 428]));
    }
}
