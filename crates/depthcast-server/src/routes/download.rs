//! `GET /download/{fname}`

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use depthcast_api::ExportFormat;

use crate::AppState;
use crate::error::ApiError;

/// Content type for a stored file, by extension.
pub fn content_type(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map_or("", |(_, ext)| ext);
    if let Ok(format) = ext.parse::<ExportFormat>() {
        return format.mime_type();
    }
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Send a stored upload, preview or model as an attachment.
pub async fn download(
    Path(fname): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let path = state.storage.find(&fname).await.ok_or(ApiError::NotFound)?;
    let data = tokio::fs::read(&path)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to read {fname}: {e}")))?;

    tracing::debug!(file = %fname, bytes = data.len(), "download");

    Ok((
        [
            (header::CONTENT_TYPE, content_type(&fname).to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{fname}\""),
            ),
        ],
        data,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types() {
        assert_eq!(content_type("a.stl"), "model/stl");
        assert_eq!(content_type("a.OBJ"), "model/obj");
        assert_eq!(content_type("a.dxf"), "image/vnd.dxf");
        assert_eq!(content_type("a.depth.png"), "image/png");
        assert_eq!(content_type("a.JPG"), "image/jpeg");
        assert_eq!(content_type("README"), "application/octet-stream");
    }
}
