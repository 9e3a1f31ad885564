// src/handlers/notification.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::{Audience, notification::NotificationFeed},
    services::notification,
    state::AppState,
};

/// Notifications of an audience plus the unread count.
/// An unknown audience simply has no notifications.
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(audience): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let Ok(audience) = audience.parse::<Audience>() else {
        return Ok(Json(NotificationFeed {
            notifications: Vec::new(),
            unread_count: 0,
        }));
    };

    let feed = state
        .with_db(move |db| {
            Ok(NotificationFeed {
                notifications: notification::get_notifications(db, audience)?,
                unread_count: notification::get_unread_count(db, audience)?,
            })
        })
        .await?;

    Ok(Json(feed))
}

/// Marks one notification as read. Unknown ids are ignored.
pub async fn mark_read(
    State(state): State<AppState>,
    Path((audience, id)): Path<(String, u64)>,
) -> Result<impl IntoResponse, AppError> {
    if let Ok(audience) = audience.parse::<Audience>() {
        state
            .with_db(move |db| notification::mark_notification_as_read(db, audience, id))
            .await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
