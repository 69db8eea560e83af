//! Shared types for the depthcast pipeline.

use depthcast_api::{BackgroundColor, ExportParams, ToneParams};
use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can encode pipeline
/// rasters without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbaImage` for the decoded source image.
pub use image::RgbaImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Row-major grid of depth samples in `[0.0, 1.0]`.
///
/// `1.0` is nearest to the viewer (tallest relief point).
#[derive(Debug, Clone, PartialEq)]
pub struct DepthMap {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl DepthMap {
    /// Create a depth map from row-major samples.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if `values.len()` does
    /// not equal `width * height`.
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> Result<Self, PipelineError> {
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(PipelineError::InvalidConfig(format!(
                "depth map {width}x{height} needs {expected} samples, got {}",
                values.len()
            )));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Grid width in samples.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in samples.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Grid size as [`Dimensions`].
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// All samples in row-major order.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Sample at column `x`, row `y`.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Render as an 8-bit grayscale image (`0.0` → black, `1.0` → white).
    #[must_use]
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            let v = self.get(x, y).unwrap_or(0.0);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let byte = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
            image::Luma([byte])
        })
    }
}

/// Indexed triangle mesh in millimetres.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions `[x, y, z]`.
    pub vertices: Vec<[f32; 3]>,
    /// Triangles as indices into `vertices`, counter-clockwise when
    /// seen from outside.
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Number of vertices.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[must_use]
    pub const fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(mut lo, mut hi), v| {
            for axis in 0..3 {
                lo[axis] = lo[axis].min(v[axis]);
                hi[axis] = hi[axis].max(v[axis]);
            }
            (lo, hi)
        }))
    }
}

/// Options for the preview endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Colour that transparent pixels are composited over.
    pub background: BackgroundColor,
    /// Tone curve and depth map resolution.
    pub tone: ToneParams,
}

/// Physical sizing of the generated relief.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Edge length of the square footprint in mm.
    pub crystal_size: f32,
    /// Height of a `1.0` depth sample above the base plane in mm.
    pub depth_intensity: f32,
}

impl From<&ExportParams> for MeshConfig {
    fn from(params: &ExportParams) -> Self {
        Self {
            crystal_size: params.crystal_size,
            depth_intensity: params.depth_intensity,
        }
    }
}

/// Options for the export endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReliefConfig {
    /// User-facing relief parameters.
    pub export: ExportParams,
    /// Tone curve and depth map resolution.
    pub tone: ToneParams,
}

/// Rasters produced for the preview endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewResult {
    /// Source image composited over the background, at source size.
    pub grayscale: GrayImage,
    /// Tone-mapped depth map at the configured resolution.
    pub depth: GrayImage,
}

/// Errors that can occur during pipeline processing.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Pipeline configuration is invalid.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}
