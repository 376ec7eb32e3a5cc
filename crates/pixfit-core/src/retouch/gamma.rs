//! Gamma correction.
//!
//! Non-linear per-pixel transform: `out = ((v / 255)^gamma) * 255`. Values
//! below 1.0 brighten, values above 1.0 darken. Applied through a 256-entry
//! lookup table since inputs only take 256 values.

use crate::luminance;
use crate::retouch::hsv;
use crate::retouch::RetouchError;
use crate::RgbBuffer;

/// Build the 256-entry lookup table for a gamma value.
pub fn gamma_lut(gamma: f32) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        let v = (i as f32 / 255.0).powf(gamma) * 255.0;
        *entry = v.clamp(0.0, 255.0).round() as u8;
    }
    lut
}

/// Apply gamma correction to a pixel buffer in place.
///
/// Works per byte, so it applies uniformly to every channel of an RGB
/// buffer as well as to single-channel data.
///
/// # Errors
///
/// Returns [`RetouchError::InvalidParameter`] unless `gamma` is finite and
/// positive.
pub fn correct(pixels: &mut [u8], gamma: f32) -> Result<(), RetouchError> {
    if !gamma.is_finite() || gamma <= 0.0 {
        return Err(RetouchError::InvalidParameter(format!(
            "gamma must be positive and finite, got {gamma}"
        )));
    }

    let lut = gamma_lut(gamma);
    for p in pixels.iter_mut() {
        *p = lut[*p as usize];
    }
    Ok(())
}

/// Auto gamma correction on the HSV value channel.
///
/// Infers `gamma = ln(mid * 255) / ln(mean(V))` from the mean of the value
/// channel, applies `v^gamma` (clamped) to V, and converts back to RGB.
/// `mid` is the midpoint of the output range in 0..1 (0.5 targets a
/// mid-gray average). Near-black images, where the mean gives no usable
/// signal, are left unchanged.
///
/// # Errors
///
/// Returns [`RetouchError::InvalidParameter`] unless `mid` is in (0, 1].
pub fn auto_correct(image: &mut RgbBuffer, mid: f32) -> Result<(), RetouchError> {
    if !mid.is_finite() || mid <= 0.0 || mid > 1.0 {
        return Err(RetouchError::InvalidParameter(format!(
            "mid must be in (0, 1], got {mid}"
        )));
    }
    if image.pixels.is_empty() {
        return Ok(());
    }

    // Mean of the V channel on the 0-255 scale
    let mut sum = 0u64;
    for px in image.pixels.chunks_exact(3) {
        let (_, _, v) = hsv::rgb_to_hsv(px[0], px[1], px[2]);
        sum += (v * 255.0).round() as u64;
    }
    let mean = sum as f64 / (image.pixels.len() / 3) as f64;
    if mean <= 1.0 {
        return Ok(());
    }

    let gamma = ((mid as f64) * 255.0).ln() / mean.ln();

    for px in image.pixels.chunks_exact_mut(3) {
        let (h, s, v) = hsv::rgb_to_hsv(px[0], px[1], px[2]);
        // Power applied on the 0-255 scale, matching the inferred exponent
        let v255 = (v * 255.0) as f64;
        let corrected = v255.powf(gamma).clamp(0.0, 255.0) as f32 / 255.0;
        let (r, g, b) = hsv::hsv_to_rgb(h, s, corrected);
        px[0] = r;
        px[1] = g;
        px[2] = b;
    }
    Ok(())
}

/// Convenience check for whether an image skews dark enough that auto gamma
/// will brighten it: mean luma below the requested midpoint.
pub fn skews_dark(image: &RgbBuffer, mid: f32) -> bool {
    let plane = luminance::luma_plane(image);
    if plane.is_empty() {
        return false;
    }
    let mean = plane.iter().map(|&v| v as u64).sum::<u64>() as f64 / plane.len() as f64;
    mean < (mid as f64) * 255.0
}
