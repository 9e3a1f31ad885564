// src/models/analytics.rs

use serde::{Deserialize, Serialize};

/// Admin dashboard summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_users: usize,
    pub school_students: usize,
    pub college_students: usize,
    /// Two-decimal string, "0.00" for an empty group.
    pub average_school_score: String,
    pub average_college_score: String,
    pub total_scores_recorded: usize,
}
