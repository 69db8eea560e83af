//! depthcast-server: HTTP backend for depthcast.
//!
//! Accepts uploaded photos, renders grayscale and depth-map previews,
//! and exports height-field relief models as STL, OBJ or DXF. All
//! image work is delegated to `depthcast-pipeline` and
//! `depthcast-export` and runs on the blocking thread pool.

pub mod config;
pub mod error;
pub mod form;
pub mod routes;
pub mod storage;

use std::path::PathBuf;

use anyhow::Context;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::router;
pub use storage::Storage;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Upload, preview and model storage.
    pub storage: Storage,
    /// Directory holding the frontend `index.html`.
    pub frontend_dir: PathBuf,
}

impl AppState {
    /// State for `config`.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            storage: Storage::new(&config.storage_dir),
            frontend_dir: config.frontend_dir.clone(),
        }
    }
}

/// Prepare storage, bind the listener and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the storage directories cannot be created, the
/// address cannot be bound, or the server fails.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config);
    state.storage.ensure_dirs().await.with_context(|| {
        format!(
            "failed to create storage directories under {}",
            state.storage.root().display()
        )
    })?;

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!(
        addr = %config.bind,
        storage = %config.storage_dir.display(),
        frontend = %config.frontend_dir.display(),
        max_upload_mb = config.max_upload_mb,
        "listening",
    );

    let app = router(state, config.max_upload_bytes());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
