//! `/auth` endpoints: login and mail verification codes

use studyroom_types::{LoginRequest, MailSendResponse, MailVerifyRequest, TokenResponse};

use super::{ApiClient, ApiError};

/// POST /auth/login - exchange credentials for tokens (unvalidated)
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
    let body = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };
    client.post("/auth/login", &body).await
}

/// POST /auth/mail/send - email a verification code to the account owner
pub async fn send_mail_code(client: &ApiClient, username: &str) -> Result<MailSendResponse, ApiError> {
    let path = format!("/auth/mail/send?username={}", urlencoding::encode(username));
    client.post_empty(&path).await
}

/// POST /auth/mail/verify
pub async fn verify_mail_code(client: &ApiClient, email: &str, code: &str) -> Result<(), ApiError> {
    let body = MailVerifyRequest {
        email: email.to_string(),
        verify_code: code.trim().to_string(),
    };
    client
        .send_unit(reqwest::Method::POST, "/auth/mail/verify", Some(&body))
        .await
}
