//! Unsharp masking.
//!
//! Sharpness is edge contrast: the Gaussian-blurred image is subtracted
//! from the original in a weighted way, so flat regions stay put and edges
//! gain contrast. The Gaussian pass comes from the `image` crate; this
//! module only does the weighted combine.

use crate::retouch::RetouchError;
use crate::RgbBuffer;

/// Sharpen an image by unsharp masking.
///
/// `sigma` is the standard deviation of the Gaussian blur, `amount` scales
/// how strongly edges are boosted (`out = (amount + 1) * orig - amount *
/// blurred`, clamped), and `threshold` is a low-contrast gate: pixels whose
/// channel differs from the blurred version by less than `threshold` are
/// left unchanged, protecting smooth areas from noise amplification.
///
/// # Errors
///
/// Returns [`RetouchError::InvalidParameter`] unless `sigma` is positive
/// and finite and `amount` is non-negative and finite.
pub fn unsharp_mask(
    image: &RgbBuffer,
    sigma: f32,
    amount: f32,
    threshold: u8,
) -> Result<RgbBuffer, RetouchError> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(RetouchError::InvalidParameter(format!(
            "sigma must be positive and finite, got {sigma}"
        )));
    }
    if !amount.is_finite() || amount < 0.0 {
        return Err(RetouchError::InvalidParameter(format!(
            "amount must be non-negative and finite, got {amount}"
        )));
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| RetouchError::CorruptedBuffer("pixel length mismatch".to_string()))?;

    let blurred = image::imageops::blur(&rgb_image, sigma);
    let blurred_pixels = blurred.into_raw();

    let mut out = Vec::with_capacity(image.pixels.len());
    for (&orig, &blur) in image.pixels.iter().zip(blurred_pixels.iter()) {
        let diff = (orig as i16 - blur as i16).unsigned_abs();
        if diff < threshold as u16 {
            out.push(orig);
            continue;
        }
        let sharpened = (amount + 1.0) * orig as f32 - amount * blur as f32;
        out.push(sharpened.round().clamp(0.0, 255.0) as u8);
    }

    Ok(RgbBuffer::new(image.width, image.height, out))
}
