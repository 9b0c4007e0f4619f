//! Response envelope shared by every endpoint.

use serde::{Deserialize, Serialize};

/// Successful response body: the payload always sits under `data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

/// Error response body.
///
/// Endpoints disagree on the field name, so both are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl ErrorBody {
    /// The server-provided message, preferring `errorMessage`
    pub fn text(&self) -> Option<&str> {
        let present = |m: &&str| !m.trim().is_empty();
        self.error_message
            .as_deref()
            .filter(present)
            .or_else(|| self.message.as_deref().filter(present))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_unwraps_data() {
        let json = r#"{"data":{"email":"a@b.c"}}"#;
        let env: ApiEnvelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(env.data["email"], "a@b.c");
    }

    #[test]
    fn test_error_body_prefers_error_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"generic","errorMessage":"specific"}"#).unwrap();
        assert_eq!(body.text(), Some("specific"));

        let body: ErrorBody = serde_json::from_str(r#"{"message":"only"}"#).unwrap();
        assert_eq!(body.text(), Some("only"));
    }

    #[test]
    fn test_error_body_blank_is_none() {
        let body: ErrorBody = serde_json::from_str(r#"{"message":"  "}"#).unwrap();
        assert_eq!(body.text(), None);
        assert_eq!(ErrorBody::default().text(), None);
    }

    #[test]
    fn test_error_body_blank_error_message_falls_back() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"Slot already taken","errorMessage":""}"#).unwrap();
        assert_eq!(body.text(), Some("Slot already taken"));
    }
}
