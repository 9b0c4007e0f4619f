//! Normalized API errors

use thiserror::Error;

/// Fallback shown when the server gives no usable message
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Not authorized")]
    Unauthorized { message: Option<String> },

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// HTTP status, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    /// Message supplied by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } | Self::Unauthorized { message } => message.as_deref(),
            _ => None,
        }
    }

    /// Text for a user-facing notification
    pub fn user_message(&self) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        match self {
            Self::Network(_) => "Could not reach the server. Check your connection.".to_string(),
            Self::Unauthorized { .. } => "Please log in again.".to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    /// The server signals some "nothing here" conditions with a 400
    /// (e.g. asking for the blocked period of a user who is not blocked).
    pub fn is_expected_absence(&self) -> bool {
        self.status() == Some(400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::Status {
            status: 422,
            message: Some("Already checked in".to_string()),
        };
        assert_eq!(err.user_message(), "Already checked in");
        assert_eq!(err.status(), Some(422));
        assert!(!err.is_expected_absence());
    }

    #[test]
    fn test_user_message_fallback() {
        let err = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE);

        let err = ApiError::Unauthorized { message: None };
        assert_eq!(err.user_message(), "Please log in again.");
    }

    #[test]
    fn test_bad_request_is_expected_absence() {
        let err = ApiError::Status {
            status: 400,
            message: Some("not blocked".to_string()),
        };
        assert!(err.is_expected_absence());
    }
}
