// src/models/quiz.rs

use serde::{Deserialize, Serialize};

use super::{
    Audience,
    question::{PublicQuestion, Question},
};

/// One entry of the `schoolQuizzes` / `collegeQuizzes` collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Unique within its list.
    pub id: i64,
    pub title: String,
    pub category: String,
    pub difficulty: String,
    pub questions: Vec<Question>,
    pub created_by: String,
    pub created_date: chrono::DateTime<chrono::Utc>,
    pub target_audience: Audience,
}

/// Quiz as shown to a player.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuiz {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub difficulty: String,
    pub questions: Vec<PublicQuestion>,
    pub target_audience: Audience,
}

impl From<&Quiz> for PublicQuiz {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title.clone(),
            category: quiz.category.clone(),
            difficulty: quiz.difficulty.clone(),
            questions: quiz.questions.iter().map(PublicQuestion::from).collect(),
            target_audience: quiz.target_audience,
        }
    }
}

/// DTO for submitting a quiz attempt.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    /// Selected option index per question, in question order.
    /// `null` marks an unanswered question.
    pub answers: Vec<Option<usize>>,
}

/// Outcome of a graded attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub quiz_id: i64,
    pub score: i64,
    pub total_questions: u32,
    pub category: String,
    /// Per-question correctness, in question order.
    pub correct: Vec<bool>,
}
