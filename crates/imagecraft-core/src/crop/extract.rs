//! Rasterization of a native-space extraction region.
//!
//! Coordinates are rounded to whole pixels. The output always has the size
//! of the requested region (at least 1x1); any part of the region that lies
//! outside the source image is left fully transparent.

use thiserror::Error;

use crate::decode::{DecodedImage, CHANNELS};
use crate::geometry::NativeRect;

/// Largest output buffer the rasterizer will allocate, in bytes.
///
/// Equal to the whole 32-bit address space, so on wasm32 any region that
/// passes this check also fits in `usize`.
pub const MAX_REGION_BYTES: usize = u32::MAX as usize;

/// Errors that can occur while rasterizing a region.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The source buffer does not hold `width * height` RGBA pixels.
    #[error("Pixel buffer of {actual} bytes does not match a {width}x{height} RGBA image")]
    InvalidPixelData { width: u32, height: u32, actual: usize },

    /// The padded output would not fit in memory.
    #[error("Region {width}x{height} is too large to rasterize")]
    RegionTooLarge { width: u32, height: u32 },
}

/// Copy the pixels under `rect` into a new image.
///
/// # Example
///
/// ```ignore
/// let region = model.compute_extraction_region(OutputFormat::Png)?;
/// let cropped = extract_region(&image, &region.rect)?;
/// ```
pub fn extract_region(
    image: &DecodedImage,
    rect: &NativeRect,
) -> Result<DecodedImage, ExtractError> {
    if !image.has_valid_buffer() {
        return Err(ExtractError::InvalidPixelData {
            width: image.width,
            height: image.height,
            actual: image.pixels.len(),
        });
    }

    let px_left = to_pixels(rect.x);
    let px_top = to_pixels(rect.y);
    let out_width = to_pixels(rect.width).max(1);
    let out_height = to_pixels(rect.height).max(1);

    // Fast path: region matches the whole image
    if px_left == 0 && px_top == 0 && out_width == image.width && out_height == image.height {
        return Ok(image.clone());
    }

    let fits = matches!(
        DecodedImage::buffer_len(out_width, out_height),
        Some(len) if len <= MAX_REGION_BYTES
    );
    let mut output = fits
        .then(|| DecodedImage::transparent(out_width, out_height))
        .flatten()
        .ok_or(ExtractError::RegionTooLarge {
            width: out_width,
            height: out_height,
        })?;

    // Overlap between the region and the source, in output coordinates
    let copy_width = image.width.saturating_sub(px_left).min(out_width) as usize;
    let copy_height = image.height.saturating_sub(px_top).min(out_height);
    if copy_width == 0 || copy_height == 0 {
        return Ok(output);
    }

    let src_stride = image.width as usize * CHANNELS;
    let dst_stride = out_width as usize * CHANNELS;
    let row_bytes = copy_width * CHANNELS;

    for y in 0..copy_height {
        let src_start = (px_top + y) as usize * src_stride + px_left as usize * CHANNELS;
        let dst_start = y as usize * dst_stride;
        output.pixels[dst_start..dst_start + row_bytes]
            .copy_from_slice(&image.pixels[src_start..src_start + row_bytes]);
    }

    Ok(output)
}

/// Round a non-negative coordinate to whole pixels.
fn to_pixels(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    proptest! {
        /// Property: Output size equals the rounded region size.
        #[test]
        fn prop_output_matches_region(
            (width, height) in (4u32..=60, 4u32..=60),
            (x, y, w, h) in (0.0f64..=80.0, 0.0f64..=80.0, 1.0f64..=80.0, 1.0f64..=80.0),
        ) {
            let img = create_test_image(width, height);
            let result = extract_region(&img, &NativeRect { x, y, width: w, height: h }).unwrap();

            prop_assert_eq!(result.width, w.round() as u32);
            prop_assert_eq!(result.height, h.round() as u32);
            prop_assert_eq!(result.pixels.len(), (result.width * result.height * 4) as usize);
        }

        /// Property: Regions inside the image copy source pixels exactly.
        #[test]
        fn prop_inside_region_copies_pixels(
            (width, height) in (10u32..=50, 10u32..=50),
            (left, top) in (0u32..5, 0u32..5),
            (w, h) in (1u32..=5, 1u32..=5),
        ) {
            let img = create_test_image(width, height);
            let result = extract_region(
                &img,
                &NativeRect { x: left as f64, y: top as f64, width: w as f64, height: h as f64 },
            )
            .unwrap();

            for row in 0..h {
                for col in 0..w {
                    let src = (((top + row) * width + left + col) * 4) as usize;
                    let dst = ((row * w + col) * 4) as usize;
                    prop_assert_eq!(&result.pixels[dst..dst + 4], &img.pixels[src..src + 4]);
                }
            }
        }

        /// Property: Extraction is deterministic.
        #[test]
        fn prop_extract_is_deterministic(
            (width, height) in (4u32..=40, 4u32..=40),
            (x, y, w, h) in (0.0f64..=50.0, 0.0f64..=50.0, 0.0f64..=50.0, 0.0f64..=50.0),
        ) {
            let img = create_test_image(width, height);
            let r = NativeRect { x, y, width: w, height: h };
            prop_assert_eq!(extract_region(&img, &r), extract_region(&img, &r));
        }
    }
}
