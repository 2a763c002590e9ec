// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile as returned by the backend profile endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Read-only profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend user ID (UUID string)
    #[serde(default)]
    pub id: Option<String>,
    pub username: String,
    pub email: String,
    /// First name; the backend sends "" when unset
    #[serde(default, deserialize_with = "empty_as_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub last_name: Option<String>,
    /// Account creation time
    pub created_at: DateTime<Utc>,
    /// Most recent login recorded by the backend
    #[serde(default)]
    pub last_logged_in: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Name used to greet the user: first name when set, otherwise username.
    pub fn display_name(&self) -> &str {
        self.first_name.as_deref().unwrap_or(&self.username)
    }
}

/// Envelope of the profile endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    /// Greeting composed by the backend
    #[serde(default)]
    pub message: Option<String>,
    pub user: UserProfile,
}

/// Treat missing, null, and blank strings alike.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
