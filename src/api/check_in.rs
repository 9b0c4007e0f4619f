//! `/check-in` endpoints

use studyroom_types::{CheckInRequest, CheckInResponse, OtpResponse, RoomId};

use super::{ApiClient, ApiError};

/// POST /check-in - mark the reservation behind `code` as visited
pub async fn check_in(client: &ApiClient, code: &str, room_ids: &[RoomId]) -> Result<CheckInResponse, ApiError> {
    let body = CheckInRequest {
        verification_code: code.to_string(),
        room_id: room_ids.to_vec().into(),
    };
    client.post("/check-in", &body).await
}

/// POST /check-in/otp - current one-time code for my reservation
pub async fn otp(client: &ApiClient) -> Result<String, ApiError> {
    let resp: OtpResponse = client.post_empty("/check-in/otp").await?;
    Ok(resp.verification_code)
}
