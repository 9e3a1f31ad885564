// src/services/quiz.rs

use crate::{
    db::Db,
    error::{AppError, Result},
    models::{
        Audience,
        quiz::{Quiz, QuizResult},
    },
    services::score,
    store::keys,
};

fn quiz_key(level: Audience) -> &'static str {
    match level {
        Audience::School => keys::SCHOOL_QUIZZES,
        Audience::College => keys::COLLEGE_QUIZZES,
    }
}

pub fn get_quizzes(db: &Db, level: Audience) -> Result<Vec<Quiz>> {
    db.read(quiz_key(level))
}

pub fn get_quiz(db: &Db, level: Audience, quiz_id: i64) -> Result<Quiz> {
    get_quizzes(db, level)?
        .into_iter()
        .find(|q| q.id == quiz_id)
        .ok_or(AppError::NotFound(format!("Quiz {} not found", quiz_id)))
}

/// Grades an attempt (one point per correct answer) and records the score.
///
/// `answers[i]` is the chosen option for question `i`; missing or `None`
/// entries count as wrong and extra entries are ignored.
pub fn submit_quiz(
    db: &Db,
    user_id: &str,
    level: Audience,
    quiz_id: i64,
    answers: &[Option<usize>],
) -> Result<QuizResult> {
    let quiz = get_quiz(db, level, quiz_id)?;

    if answers.len() > quiz.questions.len() {
        tracing::debug!(
            "Ignoring {} extra answers for quiz {}",
            answers.len() - quiz.questions.len(),
            quiz_id
        );
    }

    let correct: Vec<bool> = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            answers
                .get(i)
                .copied()
                .flatten()
                .is_some_and(|a| q.is_correct(a))
        })
        .collect();

    let points = correct.iter().filter(|c| **c).count() as i64;
    let total_questions = u32::try_from(quiz.questions.len()).unwrap_or(u32::MAX);

    score::add_user_score(db, user_id, quiz.id, points, &quiz.category, total_questions)?;

    Ok(QuizResult {
        quiz_id: quiz.id,
        score: points,
        total_questions,
        category: quiz.category,
        correct,
    })
}
