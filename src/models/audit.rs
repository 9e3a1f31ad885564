// src/models/audit.rs

use serde::{Deserialize, Serialize};

/// One entry of the bounded `auditLog` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: u64,
    /// Email of the acting admin.
    pub admin: String,
    pub action: String,
    pub details: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
