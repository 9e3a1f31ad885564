// src/handlers/auth.rs

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{LoginRequest, PublicUser, RegisterRequest},
    services::session::{self, NewAccount},
    state::{AppState, run_blocking},
};

/// Registers a new account.
///
/// Returns 201 Created and the public user (no password hash).
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Hashing happens before the store lock is taken
    let account = run_blocking(move || NewAccount::prepare(payload)).await?;
    let user = state.with_db(move |db| session::create_account(db, account)).await?;
    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

/// Checks credentials and makes the account the current user.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let LoginRequest { email, password } = payload;
    let user = state.with_db(move |db| session::find_account(db, &email)).await?;
    let user = run_blocking(move || session::check_password(&user, &password).map(|()| user)).await?;

    let logged_in = user.clone();
    state.with_db(move |db| session::complete_login(db, &logged_in)).await?;
    Ok(Json(PublicUser::from(user)))
}

/// Clears the current user and admin session, then sends the browser back
/// to the index page.
pub async fn logout(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    state.with_db(session::logout).await?;
    Ok(Redirect::to("/"))
}
