//! `/users` endpoints: profile, account management and blocking

use reqwest::Method;
use studyroom_types::{
    BlockedPeriod, BlockedUser, BlockedUsersResponse, EmailChangeRequest, MailVerifyRequest,
    PasswordChangeRequest, PasswordResetRequest, SignUpRequest, UserId, UserInfo,
    UserSearchResponse,
};

use super::{ApiClient, ApiError};

/// GET /users/me
pub async fn me(client: &ApiClient) -> Result<UserInfo, ApiError> {
    client.get("/users/me").await
}

/// GET /users/search - every account (admin)
pub async fn all(client: &ApiClient) -> Result<Vec<UserInfo>, ApiError> {
    let resp: UserSearchResponse = client.get("/users/search").await?;
    Ok(resp.items)
}

/// GET /users/search/by-serial (admin)
pub async fn by_serial(client: &ApiClient, serial: &str) -> Result<Vec<UserInfo>, ApiError> {
    let path = format!("/users/search/by-serial?serial={}", urlencoding::encode(serial.trim()));
    let resp: UserSearchResponse = client.get(&path).await?;
    Ok(resp.items)
}

/// GET /users/search/by-name (admin)
pub async fn by_name(client: &ApiClient, name: &str) -> Result<Vec<UserInfo>, ApiError> {
    let path = format!("/users/search/by-name?name={}", urlencoding::encode(name.trim()));
    let resp: UserSearchResponse = client.get(&path).await?;
    Ok(resp.items)
}

/// GET /users/blocked (admin)
pub async fn blocked(client: &ApiClient) -> Result<Vec<BlockedUser>, ApiError> {
    let resp: BlockedUsersResponse = client.get("/users/blocked").await?;
    Ok(resp.users)
}

/// POST /users/unblocked/{userId} (admin)
pub async fn unblock(client: &ApiClient, user_id: UserId) -> Result<(), ApiError> {
    client
        .send_unit::<()>(Method::POST, &format!("/users/unblocked/{}", user_id), None)
        .await
}

/// GET /users/me/blocked-period
///
/// The server answers 400 when the user is not blocked; that is reported as
/// `Ok(None)`.
pub async fn blocked_period(client: &ApiClient) -> Result<Option<BlockedPeriod>, ApiError> {
    match client.get("/users/me/blocked-period").await {
        Ok(period) => Ok(Some(period)),
        Err(e) if e.is_expected_absence() => {
            tracing::debug!(message = ?e.server_message(), "User is not blocked");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// PUT /users/me/password
pub async fn change_password(client: &ApiClient, current: &str, new_password: &str) -> Result<(), ApiError> {
    let body = PasswordChangeRequest {
        pre_password: current.to_string(),
        new_password: new_password.to_string(),
    };
    client.put("/users/me/password", &body).await
}

/// POST /users/reset-password - logged-out reset with a mailed token
pub async fn reset_password(client: &ApiClient, token: &str, new_password: &str) -> Result<(), ApiError> {
    let body = PasswordResetRequest {
        token: token.trim().to_string(),
        new_password: new_password.to_string(),
    };
    client
        .send_unit(Method::POST, "/users/reset-password", Some(&body))
        .await
}

/// POST /users/sign-up
pub async fn sign_up(client: &ApiClient, request: &SignUpRequest) -> Result<(), ApiError> {
    client
        .send_unit(Method::POST, "/users/sign-up", Some(request))
        .await
}

/// POST /users/me/mail/send - start an email change
pub async fn send_new_email_code(client: &ApiClient, password: &str, new_email: &str) -> Result<(), ApiError> {
    let body = EmailChangeRequest {
        password: password.to_string(),
        new_email: new_email.trim().to_string(),
    };
    client
        .send_unit(Method::POST, "/users/me/mail/send", Some(&body))
        .await
}

/// POST /users/me/mail/verify - confirm an email change
pub async fn verify_new_email(client: &ApiClient, email: &str, code: &str) -> Result<(), ApiError> {
    let body = MailVerifyRequest {
        email: email.trim().to_string(),
        verify_code: code.trim().to_string(),
    };
    client
        .send_unit(Method::POST, "/users/me/mail/verify", Some(&body))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock;
    use axum::{
        http::StatusCode,
        routing::{get, put},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_blocked_period_absent_on_bad_request() {
        let router = Router::new().route(
            "/users/me/blocked-period",
            get(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "User is not blocked" })),
                )
            }),
        );
        let client = ApiClient::new(&mock::serve(router).await).unwrap();
        assert_eq!(blocked_period(&client).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_blocked_period_present() {
        let router = Router::new().route(
            "/users/me/blocked-period",
            get(|| async {
                Json(json!({ "data": { "blockStartTime": "2024-05-01", "blockEndTime": "2024-05-08" } }))
            }),
        );
        let client = ApiClient::new(&mock::serve(router).await).unwrap();
        let period = blocked_period(&client).await.unwrap().unwrap();
        assert_eq!(period.block_end_time.as_deref(), Some("2024-05-08"));
    }

    #[tokio::test]
    async fn test_blocked_period_other_errors_propagate() {
        let router = Router::new().route(
            "/users/me/blocked-period",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let client = ApiClient::new(&mock::serve(router).await).unwrap();
        assert!(blocked_period(&client).await.is_err());
    }

    #[tokio::test]
    async fn test_search_by_name_encodes_query() {
        let router = Router::new().route(
            "/users/search/by-name",
            get(|axum::extract::RawQuery(q): axum::extract::RawQuery| async move {
                Json(json!({ "data": { "items": [{ "username": q.unwrap_or_default() }] } }))
            }),
        );
        let client = ApiClient::new(&mock::serve(router).await).unwrap();
        let users = by_name(&client, " 김 민수 ").await.unwrap();
        assert_eq!(users[0].username, "name=%EA%B9%80%20%EB%AF%BC%EC%88%98");
    }

    #[tokio::test]
    async fn test_change_password_puts_both_passwords() {
        let received = Arc::new(Mutex::new(None));
        let sink = received.clone();
        let router = Router::new().route(
            "/users/me/password",
            put(move |Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    *sink.lock().unwrap() = Some(body);
                    StatusCode::OK
                }
            }),
        );
        let client = ApiClient::new(&mock::serve(router).await).unwrap();
        change_password(&client, "old-pw", "new-pw").await.unwrap();

        let body = received.lock().unwrap().take().unwrap();
        assert_eq!(body, json!({ "prePassword": "old-pw", "newPassword": "new-pw" }));
    }

    #[tokio::test]
    async fn test_change_password_rejection_keeps_server_message() {
        let router = Router::new().route(
            "/users/me/password",
            put(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "Current password is wrong", "errorMessage": "" })),
                )
            }),
        );
        let client = ApiClient::new(&mock::serve(router).await).unwrap();
        let err = change_password(&client, "bad", "new-pw").await.unwrap_err();
        assert_eq!(err.user_message(), "Current password is wrong");
    }
}
