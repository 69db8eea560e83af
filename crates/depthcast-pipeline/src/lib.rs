//! depthcast-pipeline: Pure image to relief pipeline (sans-IO).
//!
//! Turns a photo into a depth map and the depth map into a height-field
//! mesh:
//! decode -> composite/grayscale -> background removal -> resize ->
//! blur -> normalize -> tone curve -> mesh.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and returns structured data. File storage and HTTP live
//! in `depthcast-server`; serialization to 3D formats in
//! `depthcast-export`.

pub mod background;
pub mod blur;
pub mod grayscale;
pub mod mesh;
pub mod normalize;
pub mod resize;
pub mod tone;
pub mod types;

use depthcast_api::{BackgroundColor, ToneParams};
use image::GrayImage;

pub use types::{
    DepthMap, Dimensions, Mesh, MeshConfig, PipelineError, PreviewConfig, PreviewResult,
    ReliefConfig,
};

/// Produce the two preview rasters for an uploaded image.
///
/// # Pipeline steps
///
/// 1. Decode and composite over the chosen background colour
/// 2. Resize to the working resolution
/// 3. Gaussian blur
/// 4. Min-max normalize
/// 5. Brightness / gamma tone curve
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `image_bytes` is empty,
/// [`PipelineError::ImageDecode`] if the format is unrecognized, and
/// [`PipelineError::InvalidConfig`] if the tone parameters are out of
/// range.
pub fn preview(image_bytes: &[u8], config: &PreviewConfig) -> Result<PreviewResult, PipelineError> {
    validate_tone(&config.tone)?;

    let rgba = grayscale::decode(image_bytes)?;
    let gray = grayscale::composite_grayscale(&rgba, config.background);
    let depth = depth_map(&gray, config.tone.resolution)?;
    let depth = tone::apply_tone(&depth, config.tone.brightness, config.tone.gamma);

    Ok(PreviewResult {
        grayscale: gray,
        depth,
    })
}

/// Build the relief mesh for an uploaded image.
///
/// # Pipeline steps
///
/// 1. Decode, composite over white and convert to grayscale
/// 2. Flatten pixels brighter than `bg_threshold`
/// 3. Resize, blur and normalize into a depth map
/// 4. Brightness / gamma tone curve, then re-normalize
/// 5. Triangulate into a mesh scaled to `crystal_size` × `depth_intensity`
///
/// # Errors
///
/// Same as [`preview`], plus [`PipelineError::InvalidConfig`] if the
/// export parameters are out of range.
pub fn relief(image_bytes: &[u8], config: &ReliefConfig) -> Result<Mesh, PipelineError> {
    validate_tone(&config.tone)?;
    config
        .export
        .validate()
        .map_err(|e| PipelineError::InvalidConfig(e.to_string()))?;

    let rgba = grayscale::decode(image_bytes)?;
    let gray = grayscale::composite_grayscale(&rgba, BackgroundColor::White);
    let gray = background::remove_background(&gray, config.export.bg_threshold);
    let depth = depth_map(&gray, config.tone.resolution)?;
    let toned = tone::apply_tone(&depth, config.tone.brightness, config.tone.gamma);
    let depth = normalize::normalize(&toned)?;

    mesh::build_mesh(&depth, &MeshConfig::from(&config.export))
}

/// Resize, blur and normalize a grayscale image into a depth map.
fn depth_map(gray: &GrayImage, resolution: u32) -> Result<DepthMap, PipelineError> {
    let resized = resize::resize_square(gray, resolution);
    let blurred = blur::gaussian_blur(&resized, blur::DEPTH_BLUR_SIGMA);
    normalize::normalize(&blurred)
}

fn validate_tone(tone: &ToneParams) -> Result<(), PipelineError> {
    tone.validate()
        .map_err(|e| PipelineError::InvalidConfig(e.to_string()))
}
