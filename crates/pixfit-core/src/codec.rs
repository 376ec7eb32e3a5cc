//! Decode and encode boundary around the `image` crate.
//!
//! The core never reimplements codecs: decoding guesses the container format
//! from the bytes, and encoding goes through the `image` crate's JPEG encoder
//! with a tunable quality parameter. Everything else in this crate only
//! invokes these two functions and inspects the output size.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use image::ImageReader;
use thiserror::Error;

use crate::RgbBuffer;

/// Errors from the codec boundary.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input bytes are not a decodable image (corrupt or unsupported).
    #[error("Unreadable image: {0}")]
    UnreadableImage(String),

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Decode an image from bytes into an RGB buffer.
///
/// The container format is guessed from the bytes, so JPEG and PNG inputs
/// both work. Decode failures are reported immediately and never retried.
///
/// # Errors
///
/// Returns [`CodecError::UnreadableImage`] if the bytes are not a valid
/// image in a supported format.
pub fn decode(bytes: &[u8]) -> Result<RgbBuffer, CodecError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CodecError::UnreadableImage(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| CodecError::UnreadableImage(e.to_string()))?;

    Ok(RgbBuffer::from_rgb_image(img.into_rgb8()))
}

/// Encode an RGB buffer to JPEG bytes at the given quality.
///
/// Quality is clamped to 1..=100. The encoder is deterministic: the same
/// buffer and quality always produce the same bytes, which the by-quality
/// budget search relies on.
///
/// # Errors
///
/// Returns [`CodecError::InvalidDimensions`] for zero-sized images and
/// [`CodecError::InvalidPixelData`] when the pixel buffer length does not
/// match `width * height * 3`.
pub fn encode_jpeg(image: &RgbBuffer, quality: u8) -> Result<Vec<u8>, CodecError> {
    if image.width == 0 || image.height == 0 {
        return Err(CodecError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected_len = (image.width as usize) * (image.height as usize) * 3;
    if image.pixels.len() != expected_len {
        return Err(CodecError::InvalidPixelData {
            expected: expected_len,
            actual: image.pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| CodecError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_image(width: u32, height: u32) -> RgbBuffer {
        RgbBuffer::new(width, height, vec![128u8; (width * height * 3) as usize])
    }

    #[test]
    fn test_encode_jpeg_basic() {
        let jpeg = encode_jpeg(&gray_image(100, 100), 90).unwrap();

        // SOI marker at the start, EOI marker at the end
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_affects_size() {
        // Gradient image so the quality knob has something to trade away
        let mut pixels = Vec::with_capacity(100 * 100 * 3);
        for y in 0..100u32 {
            for x in 0..100u32 {
                pixels.push((x * 255 / 100) as u8);
                pixels.push((y * 255 / 100) as u8);
                pixels.push(((x + y) * 127 / 200) as u8);
            }
        }
        let img = RgbBuffer::new(100, 100, pixels);

        let low_q = encode_jpeg(&img, 25).unwrap();
        let high_q = encode_jpeg(&img, 95).unwrap();

        // The budget search assumes size is non-increasing as quality drops;
        // allow a small tolerance for degenerate content
        assert!(high_q.len() > low_q.len() || (low_q.len() - high_q.len()) < 100);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let img = gray_image(10, 10);
        assert!(encode_jpeg(&img, 0).is_ok());
        assert!(encode_jpeg(&img, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_zero_dimensions() {
        let img = RgbBuffer {
            width: 0,
            height: 100,
            pixels: vec![],
        };
        assert!(matches!(
            encode_jpeg(&img, 90),
            Err(CodecError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_encode_jpeg_pixel_length_mismatch() {
        let img = RgbBuffer {
            width: 100,
            height: 100,
            pixels: vec![128u8; 99 * 100 * 3], // One row short
        };
        assert!(matches!(
            encode_jpeg(&img, 90),
            Err(CodecError::InvalidPixelData { .. })
        ));
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(CodecError::UnreadableImage(_))));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode(&[]).is_err());
    }

    #[test]
    fn test_encode_decode_round_trip_dimensions() {
        let img = gray_image(64, 32);
        let jpeg = encode_jpeg(&img, 90).unwrap();
        let decoded = decode(&jpeg).unwrap();

        assert_eq!(decoded.width, 64);
        assert_eq!(decoded.height, 32);
        assert_eq!(decoded.byte_size(), 64 * 32 * 3);
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        let jpeg = encode_jpeg(&gray_image(32, 32), 90).unwrap();
        let result = decode(&jpeg[0..20]);
        assert!(result.is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep small for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=50, 1u32..=50)
    }

    proptest! {
        /// Property: valid buffers always encode to a well-formed JPEG.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in dimensions_strategy(),
            quality in 1u8..=100,
        ) {
            let img = RgbBuffer::new(
                width,
                height,
                vec![128u8; (width as usize) * (height as usize) * 3],
            );

            let jpeg = encode_jpeg(&img, quality);
            prop_assert!(jpeg.is_ok());

            let jpeg = jpeg.unwrap();
            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8], "Should have SOI marker");
            prop_assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9], "Should have EOI marker");
        }

        /// Property: same buffer and quality always produce the same bytes.
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=20, 1u32..=20),
            quality in 1u8..=100,
        ) {
            let img = RgbBuffer::new(
                width,
                height,
                vec![100u8; (width as usize) * (height as usize) * 3],
            );

            let first = encode_jpeg(&img, quality).unwrap();
            let second = encode_jpeg(&img, quality).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: encoding then decoding preserves dimensions exactly.
        #[test]
        fn prop_round_trip_preserves_dimensions(
            (width, height) in dimensions_strategy(),
        ) {
            let img = RgbBuffer::new(
                width,
                height,
                vec![200u8; (width as usize) * (height as usize) * 3],
            );

            let jpeg = encode_jpeg(&img, 90).unwrap();
            let decoded = decode(&jpeg).unwrap();
            prop_assert_eq!(decoded.width, width);
            prop_assert_eq!(decoded.height, height);
        }
    }
}
