//! Pixfit Core - Image resizing and retouching library
//!
//! This crate provides small image-manipulation utilities: resizing to a
//! target dimension, aspect ratio, or byte-size budget, and pixel-level
//! retouching (gamma, brightness/contrast, sharpening, HSV shift, histogram
//! equalization). The centerpiece is the size-constrained encoder in
//! [`budget`], which searches encoder quality or spatial resolution for the
//! best value that keeps the encoded size under a byte budget.

pub mod budget;
pub mod codec;
pub mod luminance;
pub mod pipeline;
pub mod resize;
pub mod retouch;

pub use budget::{fit_quality, shrink_to_fit, BudgetError, BudgetParams, QualityFit, ShrinkOutcome};
pub use codec::{decode, encode_jpeg, CodecError};
pub use pipeline::{run_plan, PipelineError, ResizePlan};
pub use resize::{FilterType, ResizeError, ResizeSpec};

/// An RGB image with 8 bits per channel.
///
/// Pixels are stored in row-major order, 3 bytes per pixel. Every transform
/// in this crate takes a buffer in and produces a new buffer (or mutates one
/// it owns exclusively); nothing is shared across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl RgbBuffer {
    /// Create a new buffer with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a buffer from an `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an `image::RgbImage` for handing to the codec/resampler.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// The longer of width and height.
    pub fn long_side(&self) -> u32 {
        self.width.max(self.height)
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
