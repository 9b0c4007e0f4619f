//! Schedules: reservable dates and room operation policies.

use serde::{Deserialize, Serialize};

use crate::RoomId;

/// `GET /schedules/available-dates/{departmentId}` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailableDates {
    /// ISO dates (`YYYY-MM-DD`), ascending
    #[serde(default)]
    pub available_dates: Vec<String>,
}

/// Operating hours policy that can be applied to rooms on given dates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperationPolicy {
    pub room_operation_policy_id: i64,
    #[serde(default)]
    pub operation_start_time: Option<String>,
    #[serde(default)]
    pub operation_end_time: Option<String>,
    #[serde(default)]
    pub each_max_minute: Option<u32>,
}

/// `GET /policies` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PoliciesResponse {
    #[serde(default)]
    pub policies: Vec<OperationPolicy>,
}

/// `POST /schedules` request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub room_ids: Vec<RoomId>,
    pub room_operation_policy_id: i64,
    pub policy_application_dates: Vec<String>,
}
