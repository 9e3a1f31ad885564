// src/models/score.rs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

/// A score as stored by the browser app: any JSON number, integral or not.
///
/// `null` reads as 0. Values are written back exactly as they were read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Points(Number);

impl Points {
    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or(0.0)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.0.as_i64()
    }

    /// Integer addition while both sides are integers, float otherwise.
    pub fn plus(&self, points: i64) -> Points {
        match self.0.as_i64().and_then(|total| total.checked_add(points)) {
            Some(sum) => Points::from(sum),
            None => Number::from_f64(self.as_f64() + points as f64)
                .map(Points)
                .unwrap_or_default(),
        }
    }
}

impl Default for Points {
    fn default() -> Self {
        Points(Number::from(0))
    }
}

impl From<i64> for Points {
    fn from(value: i64) -> Self {
        Points(Number::from(value))
    }
}

impl<'de> Deserialize<'de> for Points {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Number>::deserialize(deserializer)?
            .map(Points)
            .unwrap_or_default())
    }
}

/// One quiz attempt (`userScores` collection). Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserScore {
    pub id: u64,
    /// The player's email.
    pub user_id: String,
    pub quiz_id: i64,
    #[serde(default)]
    pub score: Points,
    pub category: String,
    pub total_questions: u32,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
