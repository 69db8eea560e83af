//! User-tunable export and tone parameters with their allowed ranges.
//!
//! The same constants drive the UI slider bounds and the backend's
//! request validation, so the two can never disagree.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// A parameter was outside its allowed range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{name} must be {expected}, got {value}")]
pub struct OutOfRange {
    /// Parameter name as it appears on the wire.
    pub name: &'static str,
    /// Offending value.
    pub value: f64,
    /// The accepted values, e.g. `between 10 and 300`.
    pub expected: String,
}

fn check(name: &'static str, value: f64, range: RangeInclusive<f64>) -> Result<(), OutOfRange> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(OutOfRange {
            name,
            value,
            expected: format!("between {} and {}", range.start(), range.end()),
        })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), OutOfRange> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OutOfRange {
            name,
            value,
            expected: "a finite number above 0".to_owned(),
        })
    }
}

/// Parameters sent as multipart fields alongside the image on export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportParams {
    /// Height of the tallest relief point above the base, in mm.
    pub depth_intensity: f32,
    /// Luminance above which a pixel is treated as background.
    pub bg_threshold: u8,
    /// Edge length of the square model footprint, in mm.
    pub crystal_size: f32,
}

impl ExportParams {
    /// Default relief height in mm.
    pub const DEFAULT_DEPTH_INTENSITY: f32 = 5.0;
    /// Default background threshold.
    pub const DEFAULT_BG_THRESHOLD: u8 = 240;
    /// Default footprint size in mm.
    pub const DEFAULT_CRYSTAL_SIZE: f32 = 50.0;

    /// Allowed relief heights in mm.
    pub const DEPTH_INTENSITY_RANGE: RangeInclusive<f64> = 0.1..=50.0;
    /// Allowed footprint sizes in mm.
    pub const CRYSTAL_SIZE_RANGE: RangeInclusive<f64> = 10.0..=300.0;

    /// Check every field against its allowed range.
    ///
    /// `bg_threshold` is a `u8`, so every value is already valid.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] naming the first offending field.
    pub fn validate(&self) -> Result<(), OutOfRange> {
        check(
            crate::wire::FIELD_DEPTH_INTENSITY,
            f64::from(self.depth_intensity),
            Self::DEPTH_INTENSITY_RANGE,
        )?;
        check(
            crate::wire::FIELD_CRYSTAL_SIZE,
            f64::from(self.crystal_size),
            Self::CRYSTAL_SIZE_RANGE,
        )
    }
}

impl Default for ExportParams {
    fn default() -> Self {
        Self {
            depth_intensity: Self::DEFAULT_DEPTH_INTENSITY,
            bg_threshold: Self::DEFAULT_BG_THRESHOLD,
            crystal_size: Self::DEFAULT_CRYSTAL_SIZE,
        }
    }
}

/// Tone-curve and sampling options accepted as query parameters by
/// both backend endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneParams {
    /// Offset added to the 0–255 depth value before clamping.
    pub brightness: i32,
    /// Exponent applied to the normalized depth value.
    pub gamma: f32,
    /// Side length of the square depth map, in samples.
    #[serde(rename = "res")]
    pub resolution: u32,
}

impl ToneParams {
    /// Default depth map side length.
    pub const DEFAULT_RESOLUTION: u32 = 512;
    /// Allowed depth map side lengths.
    pub const RESOLUTION_RANGE: RangeInclusive<f64> = 128.0..=1024.0;

    /// Check every field against its allowed range. Any finite
    /// positive gamma is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] naming the first offending field.
    pub fn validate(&self) -> Result<(), OutOfRange> {
        check("res", f64::from(self.resolution), Self::RESOLUTION_RANGE)?;
        check_positive("gamma", f64::from(self.gamma))
    }
}

impl Default for ToneParams {
    fn default() -> Self {
        Self {
            brightness: 0,
            gamma: 1.0,
            resolution: Self::DEFAULT_RESOLUTION,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ExportParams::default().validate().is_ok());
        assert!(ToneParams::default().validate().is_ok());
    }

    #[test]
    fn oversized_crystal_is_rejected() {
        let params = ExportParams {
            crystal_size: 1000.0,
            ..ExportParams::default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(err.name, "crystal_size");
        assert!(err.to_string().contains("between 10 and 300"));
    }

    #[test]
    fn resolution_bounds_are_inclusive() {
        let low = ToneParams {
            resolution: 128,
            ..ToneParams::default()
        };
        let high = ToneParams {
            resolution: 1024,
            ..ToneParams::default()
        };
        let over = ToneParams {
            resolution: 1025,
            ..ToneParams::default()
        };
        assert!(low.validate().is_ok());
        assert!(high.validate().is_ok());
        assert_eq!(over.validate().unwrap_err().name, "res");
    }

    #[test]
    fn any_finite_positive_gamma_is_accepted() {
        for gamma in [0.01, 0.5, 12.0, 1000.0] {
            let params = ToneParams {
                gamma,
                ..ToneParams::default()
            };
            assert!(params.validate().is_ok(), "gamma {gamma}");
        }
    }

    #[test]
    fn non_positive_or_non_finite_gamma_is_rejected() {
        for gamma in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let params = ToneParams {
                gamma,
                ..ToneParams::default()
            };
            let err = params.validate().unwrap_err();
            assert_eq!(err.name, "gamma");
            assert!(err.to_string().contains("above 0"), "{err}");
        }
    }

    #[test]
    fn tone_query_uses_res_key() {
        let params: ToneParams = serde_json::from_str(r#"{"res": 256, "gamma": 2.0}"#).unwrap();
        assert_eq!(params.resolution, 256);
        assert_eq!(params.brightness, 0);
        assert!((params.gamma - 2.0).abs() < f32::EPSILON);
    }
}
