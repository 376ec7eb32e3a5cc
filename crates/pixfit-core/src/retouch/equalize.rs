//! Histogram equalization for single-channel data.
//!
//! The classic CDF remap: bin the values, accumulate the cumulative
//! distribution, and stretch it across the full 0-255 range. Color callers
//! extract a grayscale plane first ([`grayscale`]); equalizing RGB channels
//! independently shifts colors and is deliberately not offered.

use crate::luminance;
use crate::RgbBuffer;

/// Equalize the histogram of a single-channel buffer in place.
///
/// Values are remapped through `lut[v] = (cdf[v] - cdf_min) / (n - cdf_min)
/// * 255`. Constant buffers (a single occupied bin) are left unchanged,
/// since the remap is undefined there.
pub fn equalize(pixels: &mut [u8]) {
    if pixels.is_empty() {
        return;
    }

    let mut hist = [0u32; 256];
    for &p in pixels.iter() {
        hist[p as usize] += 1;
    }

    // Cumulative distribution
    let mut cdf = [0u32; 256];
    let mut running = 0u32;
    for (bin, count) in cdf.iter_mut().zip(hist.iter()) {
        running += count;
        *bin = running;
    }

    let total = pixels.len() as u32;
    let cdf_min = cdf
        .iter()
        .copied()
        .find(|&c| c > 0)
        .unwrap_or(0);
    if cdf_min == total {
        // Single occupied bin
        return;
    }

    let mut lut = [0u8; 256];
    let denom = (total - cdf_min) as f32;
    for (i, entry) in lut.iter_mut().enumerate() {
        let num = cdf[i].saturating_sub(cdf_min) as f32;
        *entry = (num / denom * 255.0).round() as u8;
    }

    for p in pixels.iter_mut() {
        *p = lut[*p as usize];
    }
}

/// Extract the grayscale (BT.709 luma) plane of an RGB image.
///
/// The usual front door for equalizing a color image: take the plane,
/// equalize it, and use it as a single-channel result.
pub fn grayscale(image: &RgbBuffer) -> Vec<u8> {
    luminance::luma_plane(image)
}
