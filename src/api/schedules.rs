//! `/schedules` and `/policies` endpoints

use chrono::NaiveDate;
use reqwest::Method;
use studyroom_types::{
    AvailableDates, DepartmentId, OperationPolicy, PoliciesResponse, RoomId, ScheduleRequest,
};

use super::{ApiClient, ApiError};

/// GET /schedules/available-dates/{departmentId}, ascending.
///
/// Dates that fail to parse are dropped.
pub async fn available_dates(client: &ApiClient, department_id: DepartmentId) -> Result<Vec<NaiveDate>, ApiError> {
    let resp: AvailableDates = client
        .get(&format!("/schedules/available-dates/{}", department_id))
        .await?;
    let mut dates: Vec<NaiveDate> = resp
        .available_dates
        .iter()
        .filter_map(|d| parse_date(d))
        .collect();
    dates.sort_unstable();
    dates.dedup();
    Ok(dates)
}

/// Accepts `YYYY-MM-DD` with an optional time suffix
fn parse_date(s: &str) -> Option<NaiveDate> {
    let day = s.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// GET /policies
pub async fn policies(client: &ApiClient) -> Result<Vec<OperationPolicy>, ApiError> {
    let resp: PoliciesResponse = client.get("/policies").await?;
    Ok(resp.policies)
}

/// POST /schedules - apply an operation policy to rooms on the given dates
pub async fn apply_policy(
    client: &ApiClient,
    room_ids: &[RoomId],
    policy_id: i64,
    dates: &[NaiveDate],
) -> Result<(), ApiError> {
    let body = ScheduleRequest {
        room_ids: room_ids.to_vec(),
        room_operation_policy_id: policy_id,
        policy_application_dates: dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect(),
    };
    client.send_unit(Method::POST, "/schedules", Some(&body)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock;
    use axum::{routing::get, Json, Router};
    use serde_json::json;

    #[tokio::test]
    async fn test_available_dates_sorted_and_filtered() {
        let router = Router::new().route(
            "/schedules/available-dates/{id}",
            get(|| async {
                Json(json!({ "data": { "availableDates": [
                    "2024-05-24", "2024-05-23T00:00:00", "bogus", "2024-05-23"
                ] } }))
            }),
        );
        let client = ApiClient::new(&mock::serve(router).await).unwrap();
        let dates = available_dates(&client, 1).await.unwrap();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 5, 23).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 24).unwrap(),
            ]
        );
    }
}
