// src/services/export.rs

use crate::{
    db::Db,
    error::{AppError, Result},
    models::{
        export::{ExportFile, UserExport},
        user::{PublicUser, User},
    },
    services::score::get_user_performance,
    store::keys,
};

/// Bundles a user's profile and attempt history as a downloadable JSON file.
pub fn export_user_data(db: &Db, user_id: &str) -> Result<ExportFile> {
    let users: Vec<User> = db.read(keys::USERS)?;
    let user = users
        .into_iter()
        .find(|u| u.email == user_id)
        .ok_or(AppError::NotFound(format!("User '{}' not found", user_id)))?;

    let now = db.now();
    let data = UserExport {
        user: PublicUser::from(&user),
        performance: get_user_performance(db, user_id)?,
        export_date: now,
    };

    Ok(ExportFile {
        file_name: format!("{}_data_{}.json", user.name, now.timestamp_millis()),
        contents: serde_json::to_string_pretty(&data)?,
    })
}
