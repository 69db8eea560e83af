//! `GET /`

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use crate::AppState;
use crate::error::ApiError;

/// Serve the frontend's `index.html`.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let path = state.frontend_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::warn!(path = %path.display(), "index unavailable: {e}");
            Err(ApiError::NotFound)
        }
    }
}
