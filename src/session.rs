//! Authentication session
//!
//! The session is either fully authenticated (both tokens) or empty. It is
//! changed only through [`AuthSession::commit_session`] and
//! [`AuthSession::clear_session`].

use thiserror::Error;
use tracing::{info, warn};

use crate::api::{self, ApiClient};

/// Message used when the server rejects a login without explaining why
pub const LOGIN_FAILED: &str = "Login failed.";

/// Token values some servers emit instead of omitting the field
const PLACEHOLDER_TOKENS: [&str; 2] = ["undefined", "null"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("The server returned an invalid token")]
    InvalidToken,

    #[error("{0}")]
    Rejected(String),
}

/// A usable access/refresh token pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    access: String,
    refresh: String,
}

impl TokenPair {
    /// Accept only when both tokens are present, non-empty and not a placeholder
    pub fn validate(access: Option<String>, refresh: Option<String>) -> Option<Self> {
        let usable = |t: &String| {
            let t = t.trim();
            !t.is_empty() && !PLACEHOLDER_TOKENS.contains(&t)
        };
        match (access, refresh) {
            (Some(access), Some(refresh)) if usable(&access) && usable(&refresh) => {
                Some(Self { access, refresh })
            }
            _ => None,
        }
    }

    pub fn access(&self) -> &str {
        &self.access
    }

    pub fn refresh(&self) -> &str {
        &self.refresh
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    is_authenticated: bool,
    access_token: Option<String>,
    refresh_token: Option<String>,
}

impl AuthSession {
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Replace the whole session with an authenticated one
    pub fn commit_session(&mut self, tokens: TokenPair) {
        *self = Self {
            is_authenticated: true,
            access_token: Some(tokens.access),
            refresh_token: Some(tokens.refresh),
        };
        info!("Session committed");
    }

    /// Drop all credentials
    pub fn clear_session(&mut self) {
        *self = Self::default();
        info!("Session cleared");
    }

    /// Log out: local only, no request is sent
    pub fn logout(&mut self) {
        self.clear_session();
    }

    /// Client authenticated with this session's access token
    pub fn client(&self, base: &ApiClient) -> ApiClient {
        base.with_token(self.access_token.clone())
    }
}

/// Send credentials and validate the returned tokens.
///
/// The caller commits the pair; on error the session must stay untouched.
pub async fn login(client: &ApiClient, id: &str, password: &str) -> Result<TokenPair, LoginError> {
    let tokens = api::auth::login(client, id.trim(), password)
        .await
        .map_err(|e| {
            warn!(error = %e, "Login request failed");
            LoginError::Rejected(
                e.server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| LOGIN_FAILED.to_string()),
            )
        })?;

    TokenPair::validate(tokens.access_token, tokens.refresh_token).ok_or_else(|| {
        warn!("Login response carried unusable tokens");
        LoginError::InvalidToken
    })
}

/// Browser persistence so a reload keeps the user logged in
pub mod storage {
    use super::AuthSession;
    #[cfg(target_arch = "wasm32")]
    use super::TokenPair;

    #[cfg(target_arch = "wasm32")]
    const ACCESS_KEY: &str = "studyroom-access-token";
    #[cfg(target_arch = "wasm32")]
    const REFRESH_KEY: &str = "studyroom-refresh-token";

    #[cfg(target_arch = "wasm32")]
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    /// Restore a previously saved session, re-validating the tokens
    pub fn load() -> AuthSession {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(storage) = local_storage() {
                let access = storage.get_item(ACCESS_KEY).ok().flatten();
                let refresh = storage.get_item(REFRESH_KEY).ok().flatten();
                if let Some(tokens) = TokenPair::validate(access, refresh) {
                    let mut session = AuthSession::default();
                    session.commit_session(tokens);
                    return session;
                }
            }
        }

        AuthSession::default()
    }

    /// Mirror `session` into storage (clears storage for an empty session)
    pub fn save(session: &AuthSession) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            match (session.access_token(), session.refresh_token()) {
                (Some(access), Some(refresh)) => {
                    let _ = storage.set_item(ACCESS_KEY, access);
                    let _ = storage.set_item(REFRESH_KEY, refresh);
                }
                _ => {
                    let _ = storage.remove_item(ACCESS_KEY);
                    let _ = storage.remove_item(REFRESH_KEY);
                }
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        tracing::trace!(authenticated = session.is_authenticated(), "No session storage on this target");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    fn pair(a: &str, r: &str) -> TokenPair {
        TokenPair::validate(Some(a.into()), Some(r.into())).unwrap()
    }

    #[test]
    fn test_token_validation() {
        assert!(TokenPair::validate(Some("a".into()), Some("r".into())).is_some());
        assert!(TokenPair::validate(Some("undefined".into()), Some("r".into())).is_none());
        assert!(TokenPair::validate(Some("a".into()), Some("null".into())).is_none());
        assert!(TokenPair::validate(Some("a".into()), None).is_none());
        assert!(TokenPair::validate(None, Some("r".into())).is_none());
        assert!(TokenPair::validate(Some(" ".into()), Some("r".into())).is_none());
    }

    #[test]
    fn test_commit_and_clear_are_whole() {
        let mut session = AuthSession::default();
        session.commit_session(pair("a", "r"));
        assert!(session.is_authenticated());
        assert_eq!(session.access_token(), Some("a"));
        assert_eq!(session.refresh_token(), Some("r"));

        session.logout();
        assert_eq!(session, AuthSession::default());
    }

    async fn login_server(response: Value, status: StatusCode) -> ApiClient {
        let router = Router::new().route(
            "/auth/login",
            post(move || {
                let response = response.clone();
                async move { (status, Json(response)) }
            }),
        );
        ApiClient::new(&mock::serve(router).await).unwrap()
    }

    #[tokio::test]
    async fn test_login_success_commits_both_tokens() {
        let client = login_server(
            json!({ "data": { "access_token": "acc", "refresh_token": "ref" } }),
            StatusCode::OK,
        )
        .await;

        let mut session = AuthSession::default();
        let tokens = login(&client, "student", "pw").await.unwrap();
        session.commit_session(tokens);
        assert_eq!(session.access_token(), Some("acc"));
        assert_eq!(session.refresh_token(), Some("ref"));
    }

    #[tokio::test]
    async fn test_login_placeholder_token_leaves_session_unchanged() {
        let client = login_server(
            json!({ "data": { "access_token": "undefined", "refresh_token": "ref" } }),
            StatusCode::OK,
        )
        .await;

        let mut session = AuthSession::default();
        session.commit_session(pair("old", "old-refresh"));
        let before = session.clone();

        match login(&client, "student", "pw").await {
            Ok(tokens) => session.commit_session(tokens),
            Err(e) => assert_eq!(e, LoginError::InvalidToken),
        }
        assert_eq!(session, before);
    }

    #[tokio::test]
    async fn test_login_rejection_uses_server_message() {
        let client = login_server(
            json!({ "errorMessage": "Wrong password" }),
            StatusCode::UNAUTHORIZED,
        )
        .await;
        let err = login(&client, "student", "bad").await.unwrap_err();
        assert_eq!(err, LoginError::Rejected("Wrong password".to_string()));

        let client = login_server(json!({}), StatusCode::INTERNAL_SERVER_ERROR).await;
        let err = login(&client, "student", "bad").await.unwrap_err();
        assert_eq!(err.to_string(), LOGIN_FAILED);
    }
}
