//! Pixel-level retouching transforms.
//!
//! Each operation is an independent stateless function over a pixel buffer:
//! gamma correction, brightness/contrast, unsharp masking, HSV shift, and
//! histogram equalization. No shared state, no sequencing; applying one
//! never affects another.

pub mod equalize;
pub mod gamma;
pub mod hsv;
pub mod sharpen;
pub mod tone;

use thiserror::Error;

/// Errors from retouch operations.
#[derive(Debug, Error)]
pub enum RetouchError {
    /// A transform parameter is out of its valid range.
    #[error("Invalid retouch parameter: {0}")]
    InvalidParameter(String),

    /// The source buffer could not be handed to the convolution primitive.
    #[error("Corrupted pixel buffer: {0}")]
    CorruptedBuffer(String),
}
