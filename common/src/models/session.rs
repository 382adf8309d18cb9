use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profile::Profile;

/// Sessions this close to expiry are treated as expired.
pub const EXPIRY_MARGIN_SECS: i64 = 30;

/// The authentication identity as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp, seconds.
    pub expires_at: i64,
    pub user: AuthUser,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() + EXPIRY_MARGIN_SECS >= self.expires_at
    }
}

/// The signed-in caller: auth identity plus its profile row, when one exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub user: AuthUser,
    pub profile: Option<Profile>,
}

impl Identity {
    pub fn new(user: AuthUser, profile: Option<Profile>) -> Self {
        Self { user, profile }
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    /// Admin rights come from the profile row only. No profile, no rights.
    pub fn is_admin(&self) -> bool {
        self.profile.as_ref().is_some_and(|p| p.is_admin)
    }

    pub fn owns(&self, user_id: &str) -> bool {
        self.user.id == user_id
    }

    pub fn display_name(&self) -> String {
        self.profile
            .as_ref()
            .map(Profile::full_name)
            .filter(|name| !name.is_empty())
            .or_else(|| self.user.email.clone())
            .unwrap_or_else(|| self.user.id.clone())
    }
}
