//! Brightness offset and gamma curve applied to a normalized depth map.
//!
//! The depth value is first scaled to 0–255, offset by `brightness`
//! and clamped, then raised to `gamma` in unit space. Both steps
//! quantise to 8 bits, so the output is what an 8-bit PNG of the depth
//! map would hold.

use image::GrayImage;

use crate::types::DepthMap;

/// Apply the tone curve and return the result as an 8-bit image.
///
/// `gamma < 1` lifts shallow regions; `gamma > 1` pushes them down.
#[must_use = "returns the tone-mapped depth image"]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn apply_tone(depth: &DepthMap, brightness: i32, gamma: f32) -> GrayImage {
    #[allow(clippy::cast_precision_loss)]
    let offset = brightness as f32;

    GrayImage::from_fn(depth.width(), depth.height(), |x, y| {
        let d = depth.get(x, y).unwrap_or(0.0);
        // Truncate into 8-bit storage between the two steps.
        let shifted = d.mul_add(255.0, offset).clamp(0.0, 255.0) as u8;
        let curved = (f32::from(shifted) / 255.0).powf(gamma) * 255.0;
        image::Luma([curved.clamp(0.0, 255.0) as u8])
    })
}
