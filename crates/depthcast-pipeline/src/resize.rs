//! Resampling to the square working grid.
//!
//! The depth map is always `resolution × resolution` regardless of the
//! source aspect ratio, so the exported relief has a square footprint
//! matching the crystal face. Sources are stretched, not cropped.

use image::GrayImage;
use image::imageops::FilterType;

/// Resample `image` to exactly `resolution × resolution`.
///
/// Uses a triangle (bilinear) filter, which averages neighbouring
/// pixels when shrinking. Returns a clone if the image is already the
/// target size.
#[must_use = "returns the resized image"]
pub fn resize_square(image: &GrayImage, resolution: u32) -> GrayImage {
    if image.width() == resolution && image.height() == resolution {
        return image.clone();
    }
    image::imageops::resize(image, resolution, resolution, FilterType::Triangle)
}
