//! JSON-over-HTTPS client for the reservation API
//!
//! Wraps reqwest with the base URL, bearer token, the `{ data }` envelope and
//! error normalization. Requests are never retried.

use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use studyroom_types::{ApiEnvelope, ErrorBody};
use tracing::{debug, warn};
use url::Url;

use super::ApiError;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url` without credentials
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)?;
        // Url::join drops the last path segment unless it ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            http: build_http_client(),
            base,
            token: None,
        })
    }

    /// Same client, authenticating with `token`
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            http: self.http.clone(),
            base: self.base.clone(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    async fn send(&self, method: Method, path: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        debug!(%method, path, "API request");
        let response = request.send().await?;
        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "API response");

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let message = body.text().map(str::to_string);
        warn!(%method, path, status = status.as_u16(), ?message, "API request failed");

        if status == reqwest::StatusCode::UNAUTHORIZED {
            Err(ApiError::Unauthorized { message })
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn data<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let text = response.text().await?;
        let envelope: ApiEnvelope<T> = serde_json::from_str(&text)?;
        Ok(envelope.data)
    }

    /// GET `path` and unwrap the envelope
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path)?;
        let response = self.send(Method::GET, path, request).await?;
        Self::data(response).await
    }

    /// POST a JSON body and unwrap the envelope
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path)?.json(body);
        let response = self.send(Method::POST, path, request).await?;
        Self::data(response).await
    }

    /// POST without a body and unwrap the envelope
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::POST, path)?;
        let response = self.send(Method::POST, path, request).await?;
        Self::data(response).await
    }

    /// Send a JSON body, ignoring whatever the server returns
    pub async fn send_unit<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.request(method.clone(), path)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(method, path, request).await?;
        Ok(())
    }

    /// PUT a JSON body, ignoring the response body
    pub async fn put<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send_unit(Method::PUT, path, Some(body)).await
    }

    /// PATCH a JSON body, ignoring the response body
    pub async fn patch<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send_unit(Method::PATCH, path, Some(body)).await
    }

    /// DELETE `path`, ignoring the body
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send_unit::<()>(Method::DELETE, path, None).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .unwrap_or_else(|e| {
            warn!("Failed to build HTTP client with custom config: {}. Using default.", e);
            reqwest::Client::default()
        })
}

// The browser's fetch owns timeouts
#[cfg(target_arch = "wasm32")]
fn build_http_client() -> reqwest::Client {
    reqwest::Client::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let client = ApiClient::new("https://example.com/api").unwrap();
        assert_eq!(
            client.url("/rooms").unwrap().as_str(),
            "https://example.com/api/rooms"
        );
    }

    #[test]
    fn test_with_token_ignores_empty() {
        let client = ApiClient::new("https://example.com").unwrap();
        assert_eq!(client.with_token(Some(String::new())).token(), None);
        assert_eq!(client.with_token(Some("t".into())).token(), Some("t"));
    }

    #[tokio::test]
    async fn test_get_unwraps_envelope_and_sends_bearer() {
        let router = Router::new().route(
            "/whoami",
            get(|headers: axum::http::HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                Json(json!({ "data": { "auth": auth } }))
            }),
        );
        let base = mock::serve(router).await;
        let client = ApiClient::new(&base).unwrap().with_token(Some("abc".into()));

        let value: serde_json::Value = client.get("/whoami").await.unwrap();
        assert_eq!(value["auth"], "Bearer abc");
    }

    #[tokio::test]
    async fn test_error_body_is_normalized() {
        let router = Router::new()
            .route(
                "/conflict",
                get(|| async {
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        Json(json!({ "errorMessage": "Slot already taken" })),
                    )
                }),
            )
            .route(
                "/secret",
                get(|| async { (StatusCode::UNAUTHORIZED, "nope") }),
            );
        let base = mock::serve(router).await;
        let client = ApiClient::new(&base).unwrap();

        let err = client.get::<serde_json::Value>("/conflict").await.unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.user_message(), "Slot already taken");

        let err = client.get::<serde_json::Value>("/secret").await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { message: None }));
    }

    #[tokio::test]
    async fn test_missing_envelope_is_decode_error() {
        let router = Router::new().route("/bare", get(|| async { Json(json!({ "rooms": [] })) }));
        let base = mock::serve(router).await;
        let client = ApiClient::new(&base).unwrap();

        let err = client.get::<serde_json::Value>("/bare").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
