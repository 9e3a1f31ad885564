use axum::{Extension, Json, extract::State, response::IntoResponse};

use crate::{
    error::AppError,
    handlers::attachment,
    models::user::{PublicUser, User},
    services::{export, score},
    state::AppState,
};

/// Get the current user's profile.
pub async fn get_me(Extension(user): Extension<User>) -> Json<PublicUser> {
    Json(PublicUser::from(user))
}

/// Every attempt by the current user, oldest first.
pub async fn get_my_performance(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, AppError> {
    let performance = state
        .with_db(move |db| score::get_user_performance(db, &user.email))
        .await?;
    Ok(Json(performance))
}

/// Download of the current user's data.
pub async fn export_me(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, AppError> {
    let file = state
        .with_db(move |db| export::export_user_data(db, &user.email))
        .await?;
    attachment(file)
}
