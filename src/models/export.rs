// src/models/export.rs

use serde::{Deserialize, Serialize};

use super::{score::UserScore, user::PublicUser};

/// Personal data bundle handed to the download mechanism.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserExport {
    pub user: PublicUser,
    pub performance: Vec<UserScore>,
    pub export_date: chrono::DateTime<chrono::Utc>,
}

/// A serialized export ready to be offered as a file.
#[derive(Debug, Clone)]
pub struct ExportFile {
    /// `{name}_data_{millis}.json`
    pub file_name: String,
    /// Pretty-printed JSON of a [`UserExport`].
    pub contents: String,
}
