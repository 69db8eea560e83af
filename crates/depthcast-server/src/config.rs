//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Serve depth-map previews and 3D model exports over HTTP.
///
/// Every flag can also be set through the environment variable named
/// in its help text.
#[derive(Debug, Clone, Parser)]
#[command(name = "depthcast-server", version)]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "DEPTHCAST_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// Directory for uploads, previews and exported models.
    ///
    /// Served read-only under `/static`.
    #[arg(long, env = "DEPTHCAST_STORAGE_DIR", default_value = "static")]
    pub storage_dir: PathBuf,

    /// Directory holding the web frontend (`index.html` and assets).
    #[arg(long, env = "DEPTHCAST_FRONTEND_DIR", default_value = "frontend")]
    pub frontend_dir: PathBuf,

    /// Largest accepted request body, in MiB.
    #[arg(
        long,
        env = "DEPTHCAST_MAX_UPLOAD_MB",
        default_value_t = 25,
        value_parser = clap::builder::RangedU64ValueParser::<u32>::new().range(1..=1024),
    )]
    pub max_upload_mb: u32,
}

impl ServerConfig {
    /// Request body limit in bytes.
    #[must_use]
    pub const fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb as usize * 1024 * 1024
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "depthcast-server",
            "--bind",
            "127.0.0.1:9000",
            "--storage-dir",
            "/tmp/depthcast",
            "--frontend-dir",
            "web",
            "--max-upload-mb",
            "2",
        ])
        .unwrap();
        assert_eq!(config.bind, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/depthcast"));
        assert_eq!(config.frontend_dir, PathBuf::from("web"));
        assert_eq!(config.max_upload_bytes(), 2 * 1024 * 1024);
    }

    #[test]
    fn upload_limit_must_be_positive() {
        let result =
            ServerConfig::try_parse_from(["depthcast-server", "--max-upload-mb", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn bind_must_be_socket_address() {
        let result = ServerConfig::try_parse_from(["depthcast-server", "--bind", "localhost"]);
        assert!(result.is_err());
    }
}
