use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::booking::join_name;

/// Customer record, keyed by the id of its authentication identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn full_name(&self) -> String {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewProfile {
    /// Row created right after sign-up. New accounts are never admins.
    pub fn customer(
        id: impl Into<String>,
        first_name: Option<String>,
        last_name: Option<String>,
        phone_number: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
            phone_number: phone_number.unwrap_or_default(),
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn touched(mut self, now: DateTime<Utc>) -> Self {
        self.updated_at = Some(now);
        self
    }

    pub fn apply(&self, profile: &mut Profile) {
        if let Some(first) = &self.first_name {
            profile.first_name = Some(first.clone());
        }
        if let Some(last) = &self.last_name {
            profile.last_name = Some(last.clone());
        }
        if let Some(phone) = &self.phone_number {
            profile.phone_number = Some(phone.clone());
        }
        if let Some(admin) = self.is_admin {
            profile.is_admin = admin;
        }
        if let Some(updated) = self.updated_at {
            profile.updated_at = Some(updated);
        }
    }
}
