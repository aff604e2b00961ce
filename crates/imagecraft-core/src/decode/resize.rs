//! Image resizing used by the compression pipeline.
//!
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is zero,
/// or `DecodeError::CorruptedFile` if the pixel buffer does not match the size.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgba_image(resized))
}

/// Resize an image so its longest edge is at most `max_edge`, preserving
/// aspect ratio. Images that already fit are returned unchanged.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_edge,
            height: max_edge,
        });
    }

    if image.width <= max_edge && image.height <= max_edge {
        return Ok(image.clone());
    }

    let (new_width, new_height) = fit_dimensions(image.width, image.height, max_edge);
    resize(image, new_width, new_height, filter)
}

/// Dimensions that fit within `max_edge` while preserving aspect ratio.
pub(crate) fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}
