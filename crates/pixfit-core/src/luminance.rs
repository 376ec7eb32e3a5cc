//! Luminance utilities using ITU-R BT.709 coefficients.

use crate::RgbBuffer;

/// ITU-R BT.709 coefficient for red channel in luminance calculation.
pub const LUMINANCE_R: f32 = 0.2126;

/// ITU-R BT.709 coefficient for green channel in luminance calculation.
pub const LUMINANCE_G: f32 = 0.7152;

/// ITU-R BT.709 coefficient for blue channel in luminance calculation.
pub const LUMINANCE_B: f32 = 0.0722;

/// Calculate luminance from normalized RGB values (0.0 to 1.0).
#[inline]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b
}

/// Calculate luminance from u8 RGB values, returning 0-255.
#[inline]
pub fn luminance_u8(r: u8, g: u8, b: u8) -> u8 {
    let lum = LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32;
    lum.clamp(0.0, 255.0).round() as u8
}

/// Extract the luma plane of an RGB image as a single-channel buffer.
///
/// One byte per pixel, row-major. This is the grayscale view that
/// single-channel operations such as histogram equalization work on.
pub fn luma_plane(image: &RgbBuffer) -> Vec<u8> {
    image
        .pixels
        .chunks_exact(3)
        .map(|px| luminance_u8(px[0], px[1], px[2]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMINANCE_R + LUMINANCE_G + LUMINANCE_B;
        assert!((sum - 1.0).abs() < 1e-6, "Coefficients should sum to 1.0");
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(luminance_u8(255, 255, 255), 255);
        assert_eq!(luminance_u8(0, 0, 0), 0);
    }

    #[test]
    fn test_luminance_gray_preserves_value() {
        // For gray (r=g=b), luminance should equal that gray value
        for v in [0u8, 64, 128, 192, 255] {
            let lum = luminance_u8(v, v, v);
            assert!(
                (lum as i32 - v as i32).abs() <= 1,
                "Gray {v} should produce luminance ~{v}, got {lum}"
            );
        }
    }

    #[test]
    fn test_luminance_primaries() {
        // 0.2126 * 255 ≈ 54, 0.7152 * 255 ≈ 182, 0.0722 * 255 ≈ 18
        assert!((luminance_u8(255, 0, 0) as i32 - 54).abs() <= 1);
        assert!((luminance_u8(0, 255, 0) as i32 - 182).abs() <= 1);
        assert!((luminance_u8(0, 0, 255) as i32 - 18).abs() <= 1);
    }

    #[test]
    fn test_luma_plane() {
        let img = RgbBuffer::new(
            2,
            1,
            vec![
                255, 255, 255, // White
                0, 0, 0, // Black
            ],
        );
        assert_eq!(luma_plane(&img), vec![255, 0]);
    }

    #[test]
    fn test_luma_plane_length() {
        let img = RgbBuffer::new(4, 3, vec![100u8; 4 * 3 * 3]);
        assert_eq!(luma_plane(&img).len(), 12);
    }
}
