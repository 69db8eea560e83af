//! Image decoding, background compositing and grayscale conversion.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces a
//! single-channel grayscale image. Transparent regions are first
//! composited over a solid background so they end up a predictable
//! shade instead of whatever colour the encoder stored under alpha 0.

use depthcast_api::BackgroundColor;
use image::{GrayImage, RgbaImage};

use crate::types::PipelineError;

/// Decode raw image bytes into RGBA.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}

/// Alpha-composite `image` over an opaque `background` and convert the
/// result to grayscale.
#[must_use = "returns the composited grayscale image"]
pub fn composite_grayscale(image: &RgbaImage, background: BackgroundColor) -> GrayImage {
    let [br, bg, bb, _] = background.rgba().map(u32::from);

    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0.map(u32::from);
        let blend = |fg: u32, bgc: u32| (fg * a + bgc * (255 - a) + 127) / 255;
        let (r, g, b) = (blend(r, br), blend(g, bg), blend(b, bb));
        image::Luma([luminance(r, g, b)])
    })
}

/// ITU-R BT.601 luma, the same weights `image` uses for `to_luma8`.
fn luminance(r: u32, g: u32, b: u32) -> u8 {
    let l = (r * 299 + g * 587 + b * 114 + 500) / 1000;
    u8::try_from(l).unwrap_or(u8::MAX)
}
