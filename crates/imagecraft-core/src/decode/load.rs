//! Decoding of user-selected files with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;
use log::debug;

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The container format is sniffed from the bytes, so JPEG, PNG and WebP
/// files are all accepted. Browsers apply EXIF orientation when laying out an
/// `<img>`, so the native size reported here matches the element's
/// `naturalWidth`/`naturalHeight`.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized.
/// Returns `DecodeError::CorruptedFile` if the data is corrupted.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = read_dynamic(bytes)?;

    debug!(
        "decoded {}x{} image, orientation {:?}",
        img.width(),
        img.height(),
        orientation
    );

    let oriented = apply_orientation(img, orientation);
    Ok(DecodedImage::from_rgba_image(oriented.into_rgba8()))
}

fn read_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Returns `Orientation::Normal` if no EXIF data is present.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;

    /// Encode a small RGBA image in the given container.
    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = image::RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x * 40) as u8, (y * 40) as u8, 128, 255])
        });
        let dynamic = match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).into_rgb8()),
            _ => DynamicImage::ImageRgba8(img),
        };
        let mut buffer = Cursor::new(Vec::new());
        dynamic.write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let img = decode_image(&encoded(3, 2, ImageFormat::Png)).unwrap();
        assert_eq!(img.width, 3);
        assert_eq!(img.height, 2);
        assert_eq!(img.pixels.len(), 3 * 2 * 4);
        // Top-left pixel survives a lossless round trip
        assert_eq!(&img.pixels[0..4], &[0, 0, 128, 255]);
    }

    #[test]
    fn test_decode_jpeg_is_opaque() {
        let img = decode_image(&encoded(8, 8, ImageFormat::Jpeg)).unwrap();
        assert_eq!((img.width, img.height), (8, 8));
        assert!(img.pixels.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_decode_webp() {
        let img = decode_image(&encoded(5, 4, ImageFormat::WebP)).unwrap();
        assert_eq!((img.width, img.height), (5, 4));
    }

    #[test]
    fn test_decode_unrecognized_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = encoded(16, 16, ImageFormat::Png);
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_without_exif() {
        assert_eq!(extract_orientation(&encoded(2, 2, ImageFormat::Png)), Orientation::Normal);
        assert_eq!(extract_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps() {
        let img = DynamicImage::ImageRgba8(image::RgbaImage::new(2, 1));
        let rotated = apply_orientation(img, Orientation::Rotate90CW);
        assert_eq!((rotated.width(), rotated.height()), (1, 2));
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let mut rgba = image::RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        rgba.put_pixel(1, 0, image::Rgba([0, 255, 0, 255]));

        let flipped = apply_orientation(DynamicImage::ImageRgba8(rgba), Orientation::FlipHorizontal)
            .into_rgba8();
        assert_eq!(flipped.get_pixel(0, 0).0, [0, 255, 0, 255]);
        assert_eq!(flipped.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }
}
