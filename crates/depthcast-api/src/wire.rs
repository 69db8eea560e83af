//! Request and response shapes shared by the client and the backend.
//!
//! Everything here is serialized exactly as it travels over HTTP, so
//! field names follow the backend's `snake_case` JSON keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Multipart field carrying the uploaded image.
pub const FIELD_FILE: &str = "file";
/// Multipart field carrying the relief height in millimetres.
pub const FIELD_DEPTH_INTENSITY: &str = "depth_intensity";
/// Multipart field carrying the background luminance threshold.
pub const FIELD_BG_THRESHOLD: &str = "bg_threshold";
/// Multipart field carrying the footprint edge length in millimetres.
pub const FIELD_CRYSTAL_SIZE: &str = "crystal_size";

/// Target 3D file format for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Binary STL triangle mesh.
    #[default]
    Stl,
    /// Wavefront OBJ mesh.
    Obj,
    /// DXF point cloud.
    Dxf,
}

impl ExportFormat {
    /// Every supported format, in the order the UI lists them.
    pub const ALL: [Self; 3] = [Self::Stl, Self::Obj, Self::Dxf];

    /// Lowercase identifier used in the export URL path.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Obj => "obj",
            Self::Dxf => "dxf",
        }
    }

    /// Uppercase label used in messages and buttons.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stl => "STL",
            Self::Obj => "OBJ",
            Self::Dxf => "DXF",
        }
    }

    /// File extension (without the dot).
    #[must_use]
    pub const fn extension(self) -> &'static str {
        self.as_str()
    }

    /// MIME type served with the exported file.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Stl => "model/stl",
            Self::Obj => "model/obj",
            Self::Dxf => "image/vnd.dxf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`ExportFormat`] or
/// [`BackgroundColor`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported value: {0}")]
pub struct UnknownValue(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownValue;

    /// Parse a format identifier, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownValue(s.to_owned()))
    }
}

/// Solid background that transparent pixels are composited over
/// before the preview is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundColor {
    /// Composite over white.
    #[default]
    White,
    /// Composite over black.
    Black,
}

impl BackgroundColor {
    /// Both choices, in the order the UI lists them.
    pub const ALL: [Self; 2] = [Self::White, Self::Black];

    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    /// Human-readable name for UI display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }

    /// Opaque RGBA colour of the background.
    #[must_use]
    pub const fn rgba(self) -> [u8; 4] {
        match self {
            Self::White => [255, 255, 255, 255],
            Self::Black => [0, 0, 0, 255],
        }
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackgroundColor {
    type Err = UnknownValue;

    /// Parse a background name. Only the exact lowercase values are
    /// accepted, matching the backend's query validation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| UnknownValue(s.to_owned()))
    }
}

/// Body of a successful `POST /preview-depthmap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResponse {
    /// Backend-relative URL of the composited grayscale image.
    pub grayscale_url: String,
    /// Backend-relative URL of the rendered depth map.
    pub depth_url: String,
}

/// Body of a successful `POST /upload-and-export/{format}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResponse {
    /// Human-readable outcome, e.g. `"STL exported"`.
    #[serde(default)]
    pub message: Option<String>,
    /// Backend-relative URL of the exported model.
    pub file: String,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Description of what went wrong.
    pub detail: String,
}

impl ErrorDetail {
    /// Create an error body from any displayable message.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
