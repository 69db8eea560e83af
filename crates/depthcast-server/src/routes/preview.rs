//! `POST /preview-depthmap`

use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Query, State};
use depthcast_api::{BackgroundColor, PreviewResponse, ToneParams};
use depthcast_pipeline::PreviewConfig;
use serde::Deserialize;

use super::download_url;
use crate::AppState;
use crate::error::ApiError;
use crate::form::UploadForm;
use crate::storage;

/// Query string of the preview endpoint.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PreviewQuery {
    bg_color: BackgroundColor,
    brightness: i32,
    gamma: f32,
    res: u32,
}

impl Default for PreviewQuery {
    fn default() -> Self {
        let tone = ToneParams::default();
        Self {
            bg_color: BackgroundColor::default(),
            brightness: tone.brightness,
            gamma: tone.gamma,
            res: tone.resolution,
        }
    }
}

impl PreviewQuery {
    const fn config(&self) -> PreviewConfig {
        PreviewConfig {
            background: self.bg_color,
            tone: ToneParams {
                brightness: self.brightness,
                gamma: self.gamma,
                resolution: self.res,
            },
        }
    }
}

/// Store the upload, render the grayscale and depth previews next to
/// it, and return their download URLs.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PreviewQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let Query(query) = query?;
    let config = query.config();
    config.tone.validate()?;

    let upload = UploadForm::read(multipart?).await?.into_file()?;

    let source = state
        .storage
        .previews_dir()
        .join(storage::unique_name(&upload.filename));
    let gray_path = source.with_extension("gray.png");
    let depth_path = source.with_extension("depth.png");

    tokio::fs::write(&source, &upload.bytes)
        .await
        .map_err(ApiError::preview)?;

    let size = upload.bytes.len();
    let bytes = upload.bytes;
    let (gray_out, depth_out) = (gray_path.clone(), depth_path.clone());
    tokio::task::spawn_blocking(move || -> Result<(), ApiError> {
        let result = depthcast_pipeline::preview(&bytes, &config).map_err(ApiError::preview)?;
        result.grayscale.save(&gray_out).map_err(ApiError::preview)?;
        result.depth.save(&depth_out).map_err(ApiError::preview)
    })
    .await
    .map_err(ApiError::preview)??;

    tracing::info!(
        file = %upload.filename,
        bytes = size,
        background = %config.background,
        res = config.tone.resolution,
        "preview rendered",
    );

    Ok(Json(PreviewResponse {
        grayscale_url: download_url(&gray_path)?,
        depth_url: download_url(&depth_path)?,
    }))
}
