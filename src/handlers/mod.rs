// src/handlers/mod.rs

pub mod admin;
pub mod auth;
pub mod notification;
pub mod profile;
pub mod quiz;

use axum::{
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};

use crate::{error::AppError, models::export::ExportFile};

/// Offers an export as a file download.
pub(crate) fn attachment(file: ExportFile) -> Result<Response, AppError> {
    let safe_name: String = file
        .file_name
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
        .collect();

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", safe_name))
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.contents,
    )
        .into_response())
}
