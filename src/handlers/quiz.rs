// src/handlers/quiz.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::{
        Audience,
        quiz::{PublicQuiz, SubmitQuizRequest},
        user::{PublicUser, User},
    },
    services::{quiz, score},
    state::AppState,
};

/// Lists the quizzes of one level without their answers.
pub async fn list_quizzes(
    State(state): State<AppState>,
    Path(level): Path<Audience>,
) -> Result<impl IntoResponse, AppError> {
    let quizzes = state.with_db(move |db| quiz::get_quizzes(db, level)).await?;
    Ok(Json(quizzes.iter().map(PublicQuiz::from).collect::<Vec<_>>()))
}

pub async fn get_quiz(
    State(state): State<AppState>,
    Path((level, id)): Path<(Audience, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = state.with_db(move |db| quiz::get_quiz(db, level, id)).await?;
    Ok(Json(PublicQuiz::from(&quiz)))
}

/// Grades the current user's answers and records the score.
pub async fn submit_quiz(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path((level, id)): Path<(Audience, i64)>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .with_db(move |db| quiz::submit_quiz(db, &user.email, level, id, &req.answers))
        .await?;
    Ok(Json(result))
}

/// Top students of one level.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(level): Path<Audience>,
) -> Result<impl IntoResponse, AppError> {
    let board = state.with_db(move |db| score::get_leaderboard(db, level)).await?;
    Ok(Json(board.iter().map(PublicUser::from).collect::<Vec<_>>()))
}
