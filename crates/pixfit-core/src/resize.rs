//! Aspect-ratio and explicit-pair resizing.
//!
//! The resize mode is an explicit tagged variant rather than being inferred
//! from the shape of the size argument: aspect-preserving callers get a
//! high-quality filter, callers supplying exact dimensions get a cheap one
//! because they are assumed to have already computed the ratio they want.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::RgbBuffer;

/// Errors from resize operations.
#[derive(Debug, Error)]
pub enum ResizeError {
    /// The requested target is non-positive, NaN, or scales a side to zero.
    #[error("Invalid resize target: {0}")]
    InvalidTarget(String),

    /// The source buffer could not be handed to the resampler.
    #[error("Corrupted pixel buffer: {0}")]
    CorruptedBuffer(String),
}

/// Filter type for resampling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// How to resize an image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ResizeSpec {
    /// Scale so the longer side equals the target, preserving aspect ratio.
    /// The shorter side is scaled by the same factor and truncated to whole
    /// pixels.
    FixedLongSide(u32),
    /// Resize directly to `(width, height)`, ignoring aspect ratio.
    ExactDimensions(u32, u32),
    /// Scale both sides by `percentage / 100`, truncating to whole pixels.
    /// Routed through the explicit-pair path.
    Percentage(f32),
}

impl ResizeSpec {
    /// The resampling filter this mode uses.
    ///
    /// Aspect-preserving resizes use Lanczos3 (the antialias-quality
    /// filter); explicit-pair and percentage resizes use nearest neighbor.
    pub fn filter(&self) -> FilterType {
        match self {
            ResizeSpec::FixedLongSide(_) => FilterType::Lanczos3,
            ResizeSpec::ExactDimensions(..) | ResizeSpec::Percentage(_) => FilterType::Nearest,
        }
    }
}

/// Resize an image according to the given spec.
///
/// Invalid targets (zero dimensions, non-positive or non-finite percentage,
/// or an aspect computation that truncates a side to zero) are rejected
/// before the resampling primitive is invoked.
///
/// # Errors
///
/// Returns [`ResizeError::InvalidTarget`] for rejected parameters.
pub fn apply(image: &RgbBuffer, spec: ResizeSpec) -> Result<RgbBuffer, ResizeError> {
    let (width, height) = target_dimensions(image, spec)?;
    resize_to(image, width, height, spec.filter())
}

/// Compute the output dimensions for a spec without resampling.
///
/// Useful for validating a request up front.
pub fn target_dimensions(image: &RgbBuffer, spec: ResizeSpec) -> Result<(u32, u32), ResizeError> {
    match spec {
        ResizeSpec::FixedLongSide(target) => {
            if target == 0 {
                return Err(ResizeError::InvalidTarget(
                    "target long side must be non-zero".to_string(),
                ));
            }
            if image.width == 0 || image.height == 0 {
                return Err(ResizeError::InvalidTarget(
                    "source image has a zero dimension".to_string(),
                ));
            }
            // Scale the longer side to the target; the shorter side gets the
            // same factor, truncated to whole pixels. Ties go to width.
            let (w, h) = if image.height > image.width {
                let factor = target as f64 / image.height as f64;
                ((image.width as f64 * factor) as u32, target)
            } else {
                let factor = target as f64 / image.width as f64;
                (target, (image.height as f64 * factor) as u32)
            };
            if w == 0 || h == 0 {
                return Err(ResizeError::InvalidTarget(format!(
                    "aspect computation for long side {target} truncates a side to zero"
                )));
            }
            Ok((w, h))
        }
        ResizeSpec::ExactDimensions(w, h) => {
            if w == 0 || h == 0 {
                return Err(ResizeError::InvalidTarget(format!(
                    "explicit dimensions {w}x{h} must be non-zero"
                )));
            }
            Ok((w, h))
        }
        ResizeSpec::Percentage(pct) => {
            if !pct.is_finite() || pct <= 0.0 {
                return Err(ResizeError::InvalidTarget(format!(
                    "percentage must be positive and finite, got {pct}"
                )));
            }
            let w = (image.width as f64 * pct as f64 / 100.0) as u32;
            let h = (image.height as f64 * pct as f64 / 100.0) as u32;
            if w == 0 || h == 0 {
                return Err(ResizeError::InvalidTarget(format!(
                    "percentage {pct} truncates a side to zero"
                )));
            }
            Ok((w, h))
        }
    }
}

fn resize_to(
    image: &RgbBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RgbBuffer, ResizeError> {
    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| ResizeError::CorruptedBuffer("pixel length mismatch".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(RgbBuffer::from_rgb_image(resized))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
