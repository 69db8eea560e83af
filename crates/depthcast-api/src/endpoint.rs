//! Backend URL construction.

use crate::wire::{BackgroundColor, ExportFormat};

/// Backend address used when none is configured at build time.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Base URL of the backend, stored without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(String);

impl ApiBase {
    /// Create a base URL, dropping any trailing slashes.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self(base)
    }

    /// The base URL as given (minus trailing slashes).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL of the depth-map preview endpoint.
    #[must_use]
    pub fn preview_url(&self, background: BackgroundColor) -> String {
        format!("{}/preview-depthmap?bg_color={background}", self.0)
    }

    /// URL of the export endpoint for `format`.
    ///
    /// The trailing slash is part of the route.
    #[must_use]
    pub fn export_url(&self, format: ExportFormat) -> String {
        format!("{}/upload-and-export/{format}/", self.0)
    }

    /// Turn a backend-relative path (e.g. `/download/x.png`) into an
    /// absolute URL. Already-absolute URLs are returned unchanged.
    #[must_use]
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_owned()
        } else if path.starts_with('/') {
            format!("{}{path}", self.0)
        } else {
            format!("{}/{path}", self.0)
        }
    }
}

impl Default for ApiBase {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}
