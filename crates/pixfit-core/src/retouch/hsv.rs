//! HSV color-space conversion and channel shifting.
//!
//! Hue is degrees in [0, 360), saturation and value are fractions in
//! [0, 1]. Shifts rotate hue with wraparound and clamp saturation/value at
//! the range ends.

use crate::RgbBuffer;

/// Convert an RGB pixel to (hue, saturation, value).
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    (h, s, max)
}

/// Convert (hue, saturation, value) back to an RGB pixel.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);
    let hp = h.rem_euclid(360.0) / 60.0;

    let c = v * s;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let m = v - c;

    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (
        ((r1 + m) * 255.0).round() as u8,
        ((g1 + m) * 255.0).round() as u8,
        ((b1 + m) * 255.0).round() as u8,
    )
}

/// Shift hue, saturation, and value across a whole image in place.
///
/// `h_shift` is degrees (wraps around the hue circle); `s_shift` and
/// `v_shift` are added to the [0, 1] channels and clamped.
pub fn shift(image: &mut RgbBuffer, h_shift: f32, s_shift: f32, v_shift: f32) {
    if h_shift == 0.0 && s_shift == 0.0 && v_shift == 0.0 {
        return;
    }

    for px in image.pixels.chunks_exact_mut(3) {
        let (h, s, v) = rgb_to_hsv(px[0], px[1], px[2]);
        let (r, g, b) = hsv_to_rgb(h + h_shift, s + s_shift, v + v_shift);
        px[0] = r;
        px[1] = g;
        px[2] = b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries_to_hsv() {
        assert_eq!(rgb_to_hsv(255, 0, 0), (0.0, 1.0, 1.0));
        assert_eq!(rgb_to_hsv(0, 255, 0), (120.0, 1.0, 1.0));
        assert_eq!(rgb_to_hsv(0, 0, 255), (240.0, 1.0, 1.0));
    }

    #[test]
    fn test_gray_has_no_hue_or_saturation() {
        let (h, s, v) = rgb_to_hsv(128, 128, 128);
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((v - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_hsv_to_rgb_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), (0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), (0, 0, 255));
    }

    #[test]
    fn test_hue_wraps() {
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(-120.0, 1.0, 1.0), (0, 0, 255));
    }

    #[test]
    fn test_hue_rotation_red_to_green() {
        let mut img = RgbBuffer::new(1, 1, vec![255, 0, 0]);
        shift(&mut img, 120.0, 0.0, 0.0);
        assert_eq!(img.pixels, vec![0, 255, 0]);
    }

    #[test]
    fn test_desaturation_moves_toward_gray() {
        let mut img = RgbBuffer::new(1, 1, vec![255, 0, 0]);
        shift(&mut img, 0.0, -1.0, 0.0);
        // Fully desaturated keeps V: pure white at v = 1
        assert_eq!(img.pixels, vec![255, 255, 255]);
    }

    #[test]
    fn test_value_shift_clamps() {
        let mut img = RgbBuffer::new(1, 1, vec![200, 200, 200]);
        shift(&mut img, 0.0, 0.0, 1.0);
        assert_eq!(img.pixels, vec![255, 255, 255]);

        let mut img = RgbBuffer::new(1, 1, vec![50, 50, 50]);
        shift(&mut img, 0.0, 0.0, -1.0);
        assert_eq!(img.pixels, vec![0, 0, 0]);
    }

    #[test]
    fn test_zero_shift_is_identity() {
        let pixels = vec![13, 77, 200, 255, 0, 9];
        let mut img = RgbBuffer::new(2, 1, pixels.clone());
        shift(&mut img, 0.0, 0.0, 0.0);
        assert_eq!(img.pixels, pixels);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
