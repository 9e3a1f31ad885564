// src/models/session.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single active admin session (`adminSession` key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub email: String,
    pub login_time: DateTime<Utc>,
    /// Absolute expiry; the session is valid while `now <= expires_at`.
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now <= self.expires_at
    }
}
