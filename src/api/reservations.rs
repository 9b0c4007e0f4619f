//! `/reservations` endpoints

use chrono::NaiveDate;
use reqwest::Method;
use studyroom_types::{
    DepartmentId, NoShowCount, PartitionId, PartitionReservationInfo,
    PartitionReservationsResponse, ReservationId, ReservationInfo, ReservationListResponse,
    ReservationState, StateChangeRequest, UserId,
};

use super::{ApiClient, ApiError};
use crate::selection::ReservationRequest;

/// POST /reservations
pub async fn create(client: &ApiClient, request: &ReservationRequest) -> Result<(), ApiError> {
    client
        .send_unit(Method::POST, "/reservations", Some(&request.to_wire()))
        .await
}

/// DELETE /reservations/me/{id} - cancel one of my reservations
pub async fn delete_mine(client: &ApiClient, reservation_id: ReservationId) -> Result<(), ApiError> {
    client
        .delete(&format!("/reservations/me/{}", reservation_id))
        .await
}

/// DELETE /reservations/admin/{id}
pub async fn admin_delete(client: &ApiClient, reservation_id: ReservationId) -> Result<(), ApiError> {
    client
        .delete(&format!("/reservations/admin/{}", reservation_id))
        .await
}

/// GET /reservations/me, newest first
pub async fn mine(client: &ApiClient) -> Result<Vec<ReservationInfo>, ApiError> {
    let resp: ReservationListResponse = client.get("/reservations/me").await?;
    let mut list = resp.reservation_info_responses;
    list.reverse();
    Ok(list)
}

/// GET /reservations/me/no-show
pub async fn no_show(client: &ApiClient) -> Result<NoShowCount, ApiError> {
    client.get("/reservations/me/no-show").await
}

/// GET /reservations/by-date/{departmentId}?date=YYYY-MM-DD
pub async fn by_department_date(
    client: &ApiClient,
    department_id: DepartmentId,
    date: NaiveDate,
) -> Result<Vec<PartitionReservationInfo>, ApiError> {
    let path = format!(
        "/reservations/by-date/{}?date={}",
        department_id,
        date.format("%Y-%m-%d")
    );
    let resp: PartitionReservationsResponse = client.get(&path).await?;
    Ok(resp.partition_reservation_infos)
}

/// GET /reservations/partitions/by-date?date=...&partitionIds=...
pub async fn by_partitions_date(
    client: &ApiClient,
    date: NaiveDate,
    partition_ids: &[PartitionId],
) -> Result<Vec<ReservationInfo>, ApiError> {
    let mut path = format!("/reservations/partitions/by-date?date={}", date.format("%Y-%m-%d"));
    for id in partition_ids {
        path.push_str(&format!("&partitionIds={}", id));
    }
    let resp: ReservationListResponse = client.get(&path).await?;
    Ok(resp.reservation_info_responses)
}

/// GET /reservations/admin/users/{userId}
pub async fn by_user(client: &ApiClient, user_id: UserId) -> Result<Vec<ReservationInfo>, ApiError> {
    let resp: ReservationListResponse = client
        .get(&format!("/reservations/admin/users/{}", user_id))
        .await?;
    Ok(resp.reservation_info_responses)
}

/// PATCH /reservations/admin/{id} - mark visited / not visited / processed
pub async fn set_state(
    client: &ApiClient,
    reservation_id: ReservationId,
    state: ReservationState,
) -> Result<(), ApiError> {
    client
        .patch(
            &format!("/reservations/admin/{}", reservation_id),
            &StateChangeRequest { state },
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock;
    use axum::{extract::RawQuery, routing::{get, patch}, Json, Router};
    use serde_json::json;

    #[tokio::test]
    async fn test_mine_is_newest_first() {
        let router = Router::new().route(
            "/reservations/me",
            get(|| async {
                Json(json!({ "data": { "reservationInfoResponses": [
                    { "reservationId": 1, "startDateTime": "2024-05-01T09:00:00", "endDateTime": "2024-05-01T10:00:00" },
                    { "reservationId": 2, "startDateTime": "2024-05-02T09:00:00", "endDateTime": "2024-05-02T10:00:00" },
                ] } }))
            }),
        );
        let client = ApiClient::new(&mock::serve(router).await).unwrap();
        let ids: Vec<_> = mine(&client).await.unwrap().iter().map(|r| r.reservation_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_by_partitions_repeats_partition_param() {
        let router = Router::new().route(
            "/reservations/partitions/by-date",
            get(|RawQuery(q): RawQuery| async move {
                Json(json!({ "data": { "reservationInfoResponses": [
                    { "reservationId": 9, "roomName": q.unwrap_or_default(),
                      "startDateTime": "2024-05-23T09:00:00", "endDateTime": "2024-05-23T10:00:00" }
                ] } }))
            }),
        );
        let client = ApiClient::new(&mock::serve(router).await).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 5, 23).unwrap();

        let list = by_partitions_date(&client, date, &[3, 4]).await.unwrap();
        assert_eq!(list[0].room_name, "date=2024-05-23&partitionIds=3&partitionIds=4");
    }

    #[tokio::test]
    async fn test_set_state_sends_wire_name() {
        let router = Router::new().route(
            "/reservations/admin/{id}",
            patch(|Json(body): Json<serde_json::Value>| async move {
                if body["state"] == "VISITED" {
                    axum::http::StatusCode::OK
                } else {
                    axum::http::StatusCode::BAD_REQUEST
                }
            }),
        );
        let client = ApiClient::new(&mock::serve(router).await).unwrap();
        set_state(&client, 5, ReservationState::Visited).await.unwrap();
        assert!(set_state(&client, 5, ReservationState::Processed).await.is_err());
    }
}
