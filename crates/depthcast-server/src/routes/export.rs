//! `POST /upload-and-export/{format}/`

use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Path, Query, State};
use depthcast_api::{ExportFormat, ExportParams, ExportResponse, ToneParams};
use depthcast_export::ExportMetadata;
use depthcast_pipeline::ReliefConfig;

use super::download_url;
use crate::AppState;
use crate::error::ApiError;
use crate::form::UploadForm;
use crate::storage;

/// Store the upload, build the relief mesh and write it in `format`.
///
/// The format is checked before anything else is read, so an unknown
/// format is always a 400 regardless of the body.
pub async fn export(
    Path(format): Path<String>,
    State(state): State<Arc<AppState>>,
    query: Result<Query<ToneParams>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExportResponse>, ApiError> {
    let format: ExportFormat = format.parse().map_err(|_| ApiError::UnsupportedFormat)?;
    let Query(tone) = query?;
    tone.validate()?;

    let form = UploadForm::read(multipart?).await?;
    let export = form.export_params()?;
    let upload = form.into_file()?;

    let source = state
        .storage
        .uploads_dir()
        .join(storage::unique_name(&upload.filename));
    let output = source.with_extension(format.extension());

    tokio::fs::write(&source, &upload.bytes)
        .await
        .map_err(ApiError::export)?;

    let config = ReliefConfig { export, tone };
    let size = upload.bytes.len();
    let bytes = upload.bytes;
    let title = upload.filename.clone();
    let out = output.clone();
    let faces = tokio::task::spawn_blocking(move || -> Result<usize, ApiError> {
        let mesh = depthcast_pipeline::relief(&bytes, &config).map_err(ApiError::export)?;
        let description = describe(&config.export);
        let metadata = ExportMetadata {
            title: Some(title.as_str()),
            description: Some(description.as_str()),
        };
        let data = depthcast_export::serialize(&mesh, format, &metadata).map_err(ApiError::export)?;
        std::fs::write(&out, data).map_err(ApiError::export)?;
        Ok(mesh.face_count())
    })
    .await
    .map_err(ApiError::export)??;

    tracing::info!(
        file = %upload.filename,
        bytes = size,
        %format,
        faces,
        depth_intensity = config.export.depth_intensity,
        crystal_size = config.export.crystal_size,
        "model exported",
    );

    Ok(Json(ExportResponse {
        message: Some(format!("{} exported", format.label())),
        file: download_url(&output)?,
    }))
}

/// Relief parameters as comment lines for the exported file.
fn describe(params: &ExportParams) -> String {
    format!(
        "depth_intensity = {} mm\nbg_threshold = {}\ncrystal_size = {} mm",
        params.depth_intensity, params.bg_threshold, params.crystal_size
    )
}
