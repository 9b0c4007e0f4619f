//! User profile, account management and blocking.

use serde::{Deserialize, Serialize};

use crate::UserId;

/// Role assigned by the service
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceRole {
    Admin,
    #[default]
    User,
    /// Any role this client does not know about
    #[serde(other)]
    Unknown,
}

impl ServiceRole {
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// `GET /users/me` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub service_role: ServiceRole,
}

/// `GET /users/search/by-serial` and `/by-name` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserSearchResponse {
    #[serde(default)]
    pub items: Vec<UserInfo>,
}

/// `POST /users/sign-up` request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    pub serial: String,
    pub name: String,
    pub email: String,
}

/// `PUT /users/me/password` request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub pre_password: String,
    pub new_password: String,
}

/// `POST /users/reset-password` request body (logged-out reset)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    pub token: String,
    pub new_password: String,
}

/// `POST /users/me/mail/send` request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailChangeRequest {
    pub password: String,
    pub new_email: String,
}

/// A user currently blocked from reserving
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockedUser {
    pub user_id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub block_start_time: Option<String>,
    #[serde(default)]
    pub block_end_time: Option<String>,
}

/// `GET /users/blocked` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BlockedUsersResponse {
    #[serde(rename = "UserBlockedInfoResponses", default)]
    pub users: Vec<BlockedUser>,
}

/// `GET /users/me/blocked-period` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockedPeriod {
    #[serde(default)]
    pub block_start_time: Option<String>,
    #[serde(default)]
    pub block_end_time: Option<String>,
}

/// `GET /reservations/me/no-show` payload
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct NoShowCount {
    #[serde(alias = "noShowCount", default)]
    pub count: u32,
}
