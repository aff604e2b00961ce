//! Format-specific encoders backed by the `image` crate.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::decode::{DecodedImage, CHANNELS};
use crate::format::OutputFormat;

/// Quality used when the caller does not choose one (maximum, like a canvas
/// export at quality 1.0).
pub const DEFAULT_QUALITY: u8 = 100;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: OutputFormat,
        message: String,
    },
}

/// Encode a decoded image in the requested format.
///
/// `quality` (1-100) only affects JPEG; PNG and WebP are lossless.
pub fn encode_image(
    image: &DecodedImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    encode_pixels(&image.pixels, image.width, image.height, format, quality)
}

/// Encode raw RGBA pixel data in the requested format.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `format` - Output encoding
/// * `quality` - JPEG quality (clamped to 1-100)
pub fn encode_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * CHANNELS;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let failed = |e: image::ImageError| EncodeError::EncodingFailed {
        format,
        message: e.to_string(),
    };

    match format {
        OutputFormat::Jpeg => {
            let rgb = strip_alpha(pixels);
            JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(failed)?;
        }
        OutputFormat::Png => {
            PngEncoder::new(&mut buffer)
                .write_image(pixels, width, height, ExtendedColorType::Rgba8)
                .map_err(failed)?;
        }
        OutputFormat::Webp => {
            WebPEncoder::new_lossless(&mut buffer)
                .write_image(pixels, width, height, ExtendedColorType::Rgba8)
                .map_err(failed)?;
        }
    }

    Ok(buffer.into_inner())
}

fn strip_alpha(pixels: &[u8]) -> Vec<u8> {
    pixels
        .chunks_exact(CHANNELS)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[128, 128, 128, 255]);
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let jpeg = encode_image(&gray(100, 100), OutputFormat::Jpeg, 90).unwrap();

        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        let len = jpeg.len();
        assert_eq!(&jpeg[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_png_signature() {
        let png = encode_image(&gray(10, 10), OutputFormat::Png, DEFAULT_QUALITY).unwrap();
        assert_eq!(&png[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_webp_signature() {
        let webp = encode_image(&gray(10, 10), OutputFormat::Webp, DEFAULT_QUALITY).unwrap();
        assert_eq!(&webp[0..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");
    }

    #[test]
    fn test_png_keeps_alpha() {
        let img = DecodedImage::new(1, 1, vec![255, 0, 0, 64]);
        let png = encode_image(&img, OutputFormat::Png, DEFAULT_QUALITY).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().into_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 64]);
    }

    #[test]
    fn test_jpeg_quality_clamping() {
        let img = gray(10, 10);
        assert!(encode_image(&img, OutputFormat::Jpeg, 0).is_ok());
        assert!(encode_image(&img, OutputFormat::Jpeg, 255).is_ok());
    }

    #[test]
    fn test_invalid_pixel_data() {
        let pixels = vec![128u8; 10 * 10 * 3];
        let result = encode_pixels(&pixels, 10, 10, OutputFormat::Png, 100);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 400,
                actual: 300
            })
        ));
    }

    #[test]
    fn test_zero_dimensions() {
        for format in OutputFormat::ALL {
            let result = encode_pixels(&[], 0, 10, format, 90);
            assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
        }
    }

    #[test]
    fn test_strip_alpha() {
        assert_eq!(strip_alpha(&[1, 2, 3, 4, 5, 6, 7, 8]), vec![1, 2, 3, 5, 6, 7]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn format_strategy() -> impl Strategy<Value = OutputFormat> {
        prop_oneof![
            Just(OutputFormat::Webp),
            Just(OutputFormat::Png),
            Just(OutputFormat::Jpeg),
        ]
    }

    proptest! {
        /// Property: Any valid input encodes to a non-empty buffer.
        #[test]
        fn prop_valid_input_encodes(
            (width, height) in (1u32..=24, 1u32..=24),
            format in format_strategy(),
            quality in 1u8..=100,
        ) {
            let pixels = vec![200u8; (width * height * 4) as usize];
            let result = encode_pixels(&pixels, width, height, format, quality);
            prop_assert!(result.is_ok());
            prop_assert!(!result.unwrap().is_empty());
        }

        /// Property: Lossless formats decode back to the same pixels.
        #[test]
        fn prop_lossless_formats_preserve_pixels(
            (width, height) in (1u32..=12, 1u32..=12),
            use_png in any::<bool>(),
        ) {
            let pixels: Vec<u8> = (0..(width * height * 4) as usize)
                .map(|i| ((i * 37) % 256) as u8)
                .collect();
            let format = if use_png { OutputFormat::Png } else { OutputFormat::Webp };

            let bytes = encode_pixels(&pixels, width, height, format, 100).unwrap();
            let decoded = image::load_from_memory(&bytes).unwrap().into_rgba8();

            prop_assert_eq!(decoded.dimensions(), (width, height));
            prop_assert_eq!(decoded.into_raw(), pixels);
        }
    }
}
