// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    handlers::attachment,
    models::{
        notification::CreateNotificationRequest,
        session::AdminSession,
        user::{LoginRequest, PublicUser},
    },
    services::{admin, export, notification, session},
    state::{AppState, run_blocking},
};

/// Opens an admin session.
/// Open to anyone; only admin credentials succeed.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let ttl = chrono::Duration::minutes(state.config.admin_session_minutes);
    let LoginRequest { email, password } = payload;

    let user = state.with_db(move |db| session::find_account(db, &email)).await?;
    let user = run_blocking(move || session::check_password(&user, &password).map(|()| user)).await?;
    let session = state
        .with_db(move |db| session::open_admin_session(db, &user, ttl))
        .await?;
    Ok(Json(session))
}

/// Returns the live session (the middleware already checked it).
pub async fn get_session(Extension(session): Extension<AdminSession>) -> Json<AdminSession> {
    Json(session)
}

/// Broadcasts a notification and records it in the audit log.
/// Admin only.
pub async fn create_notification(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Json(payload): Json<CreateNotificationRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let created = state
        .with_db(move |db| {
            let created = notification::add_notification(
                db,
                payload.audience,
                &payload.message,
                payload.kind.as_deref(),
            )?;
            admin::add_audit_log(
                db,
                &session.email,
                "notify",
                &format!("{}: {}", payload.audience.as_str(), created.message),
            )?;
            Ok(created)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Lists all student accounts.
/// Admin only.
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state.with_db(admin::get_all_users).await?;
    Ok(Json(users.iter().map(PublicUser::from).collect::<Vec<_>>()))
}

/// Downloads one user's data.
/// Admin only.
pub async fn export_user(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let file = state
        .with_db(move |db| {
            let file = export::export_user_data(db, &email)?;
            admin::add_audit_log(db, &session.email, "export", &email)?;
            Ok(file)
        })
        .await?;
    attachment(file)
}

/// Admin only.
pub async fn get_analytics(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let analytics = state.with_db(admin::get_analytics).await?;
    Ok(Json(analytics))
}

/// Admin only.
pub async fn get_audit_log(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let log = state.with_db(admin::get_audit_log).await?;
    Ok(Json(log))
}
