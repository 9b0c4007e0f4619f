//! Authentication and mail verification bodies.

use serde::{Deserialize, Serialize};

/// `POST /auth/login` request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /auth/login` response payload.
///
/// Tokens are optional here; the client rejects a response unless both are
/// present and usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// `POST /auth/mail/send` response payload: the address the code went to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MailSendResponse {
    pub email: String,
}

/// `POST /auth/mail/verify` and `POST /users/me/mail/verify` request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MailVerifyRequest {
    pub email: String,
    pub verify_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_uses_snake_case() {
        let tokens: TokenResponse =
            serde_json::from_str(r#"{"access_token":"a","refresh_token":"r"}"#).unwrap();
        assert_eq!(tokens.access_token.as_deref(), Some("a"));
        assert_eq!(tokens.refresh_token.as_deref(), Some("r"));
    }

    #[test]
    fn test_token_response_missing_fields() {
        let tokens: TokenResponse = serde_json::from_str(r#"{"access_token":"a"}"#).unwrap();
        assert!(tokens.refresh_token.is_none());
    }

    #[test]
    fn test_mail_verify_is_camel_case() {
        let body = MailVerifyRequest {
            email: "s@hufs.ac.kr".to_string(),
            verify_code: "123456".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["verifyCode"], "123456");
    }
}
