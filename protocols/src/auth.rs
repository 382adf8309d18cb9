//! # Authentication service payloads
//!
//! Request bodies, responses and endpoint paths of the GoTrue-style auth API
//! sitting next to the REST endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SIGNUP_PATH: &str = "/auth/v1/signup";
pub const TOKEN_PATH: &str = "/auth/v1/token";
pub const LOGOUT_PATH: &str = "/auth/v1/logout";
pub const USER_PATH: &str = "/auth/v1/user";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    Password,
    RefreshToken,
}

impl GrantType {
    pub fn as_str(self) -> &'static str {
        match self {
            GrantType::Password => "password",
            GrantType::RefreshToken => "refresh_token",
        }
    }

    /// Query pair appended to [`TOKEN_PATH`].
    pub fn query(self) -> [(&'static str, &'static str); 1] {
        [("grant_type", self.as_str())]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordCredentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub data: &'a Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserPayload {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds.
    pub expires_in: i64,
    /// Absolute expiry, unix seconds. Older servers omit it.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: UserPayload,
}

impl TokenResponse {
    /// Absolute expiry, falling back to `issued_at + expires_in`.
    pub fn expiry(&self, issued_at: i64) -> i64 {
        self.expires_at.unwrap_or(issued_at + self.expires_in)
    }
}

/// With e-mail confirmation on, sign-up answers with the bare user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(TokenResponse),
    User(UserPayload),
}

/// Error bodies come in two shapes depending on the endpoint and server version.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuthErrorPayload {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthErrorPayload {
    pub fn message(&self) -> Option<&str> {
        self.error_description
            .as_deref()
            .or(self.msg.as_deref())
            .or(self.message.as_deref())
            .or(self.error.as_deref())
    }
}
