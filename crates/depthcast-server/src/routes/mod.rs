//! Route table and handlers.

mod download;
mod export;
mod index;
mod preview;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::error::ApiError;

/// Build the application router.
///
/// | method | path | |
/// |---|---|---|
/// | GET | `/` | frontend `index.html` |
/// | POST | `/preview-depthmap` | grayscale + depth previews |
/// | POST | `/upload-and-export/{format}/` | relief model |
/// | GET | `/download/{fname}` | stored file as attachment |
/// | GET | `/frontend/*` | frontend directory |
/// | GET | `/static/*` | storage directory |
pub fn router(state: AppState, body_limit: usize) -> Router {
    let frontend = ServeDir::new(&state.frontend_dir).append_index_html_on_directories(true);
    let storage = ServeDir::new(state.storage.root());

    Router::new()
        .route("/", get(index::index))
        .route("/preview-depthmap", post(preview::preview))
        .route("/upload-and-export/{format}/", post(export::export))
        .route("/download/{fname}", get(download::download))
        .nest_service("/frontend", frontend)
        .nest_service("/static", storage)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Backend-relative download URL for a stored file.
fn download_url(path: &Path) -> Result<String, ApiError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ApiError::Internal(format!("invalid stored name {}", path.display())))?;
    Ok(format!("/download/{name}"))
}
