//! Background removal by luminance threshold.
//!
//! Product photos for etching are usually shot on a bright backdrop.
//! Every pixel brighter than the threshold is treated as backdrop and
//! flattened to zero so it contributes no relief.

use image::GrayImage;

/// Zero every pixel whose luminance is strictly above `threshold`.
///
/// A threshold of 255 keeps the image unchanged.
#[must_use = "returns the image with the background removed"]
pub fn remove_background(image: &GrayImage, threshold: u8) -> GrayImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        if pixel.0[0] > threshold {
            pixel.0[0] = 0;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bright_pixels_become_zero() {
        let img = GrayImage::from_fn(3, 1, |x, _| image::Luma([[100, 240, 241][x as usize]]));
        let out = remove_background(&img, 240);
        assert_eq!(out.get_pixel(0, 0).0[0], 100);
        assert_eq!(out.get_pixel(1, 0).0[0], 240, "threshold itself is kept");
        assert_eq!(out.get_pixel(2, 0).0[0], 0);
    }

    #[test]
    fn max_threshold_is_identity() {
        let img = GrayImage::from_fn(4, 4, |x, y| {
            image::Luma([u8::try_from(x * 60 + y).unwrap_or(0)])
        });
        assert_eq!(remove_background(&img, 255), img);
    }

    #[test]
    fn zero_threshold_clears_everything_but_black() {
        let img = GrayImage::from_fn(2, 1, |x, _| image::Luma([if x == 0 { 0 } else { 1 }]));
        let out = remove_background(&img, 0);
        assert!(out.pixels().all(|p| p.0[0] == 0));
    }
}
