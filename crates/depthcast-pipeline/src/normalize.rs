//! Min-max normalization of a grayscale grid into a [`DepthMap`].
//!
//! The darkest pixel maps to `0.0` and the brightest to `1.0`, so the
//! relief always uses the full configured height regardless of the
//! source exposure.

use image::GrayImage;

use crate::types::{DepthMap, PipelineError};

/// Stretch the pixel values of `image` to span `[0.0, 1.0]`.
///
/// A flat image (every pixel equal) has no range to stretch and maps
/// to all zeros.
///
/// # Errors
///
/// Propagates [`DepthMap::new`] errors; cannot fail for a
/// well-formed `GrayImage`.
pub fn normalize(image: &GrayImage) -> Result<DepthMap, PipelineError> {
    let raw = image.as_raw();
    let (lo, hi) = raw
        .iter()
        .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    let values = if hi > lo {
        let range = f32::from(hi - lo);
        raw.iter().map(|&v| f32::from(v - lo) / range).collect()
    } else {
        vec![0.0; raw.len()]
    };

    DepthMap::new(image.width(), image.height(), values)
}
