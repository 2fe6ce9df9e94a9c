//! Attached file downloads

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{error::PageResult, services::uploads::sanitize_filename};

/// Send a stored file as an attachment; unknown names answer 404
pub async fn download_file(
    State(state): State<crate::AppState>,
    Path(filename): Path<String>,
) -> PageResult<Response> {
    let bytes = state.services.uploads.read(&filename).await?;

    let attachment_name = sanitize_filename(&filename).unwrap_or_else(|| "download".to_string());
    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", attachment_name),
        ),
    ];

    Ok((headers, bytes).into_response())
}
