//! Linear brightness/contrast adjustment.
//!
//! Each byte maps through `out = alpha * v + beta`, saturating at the ends
//! of the range. `alpha` is the gain (contrast): values above 1 spread the
//! tonal range, values below 1 compress it. `beta` is the bias
//! (brightness): added uniformly to every channel.

/// Apply gain and bias to a pixel buffer in place.
///
/// Operates per byte, so RGB and single-channel buffers both work. Any
/// finite `alpha`/`beta` pair is accepted; results saturate at 0 and 255.
pub fn brightness_contrast(pixels: &mut [u8], alpha: f32, beta: f32) {
    if alpha == 1.0 && beta == 0.0 {
        return;
    }

    // 256 possible inputs, so go through a table like the gamma path
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = (alpha * i as f32 + beta).round().clamp(0.0, 255.0) as u8;
    }

    for p in pixels.iter_mut() {
        *p = lut[*p as usize];
    }
}
