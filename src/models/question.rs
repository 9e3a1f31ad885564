// src/models/question.rs

use serde::{Deserialize, Serialize};

/// A multiple-choice question embedded in a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique within its quiz only.
    pub id: i64,

    /// The question text.
    pub question: String,

    /// Answer options, four in the shipped content.
    pub options: Vec<String>,

    /// Zero-based index into `options`.
    pub correct_answer: usize,

    /// Seconds allowed to answer.
    pub time_limit: u32,
}

impl Question {
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_answer
    }
}

/// DTO for sending a question to a player (excludes the correct answer).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub time_limit: u32,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            question: q.question.clone(),
            options: q.options.clone(),
            time_limit: q.time_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_question_has_no_answer() {
        let q = Question {
            id: 1,
            question: "What is biodiversity?".to_string(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: 3,
            time_limit: 30,
        };
        assert!(q.is_correct(3));
        assert!(!q.is_correct(0));

        let json = serde_json::to_value(PublicQuestion::from(&q)).unwrap();
        assert!(json.get("correctAnswer").is_none());
        assert_eq!(json["timeLimit"], 30);
    }
}
