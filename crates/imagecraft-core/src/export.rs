//! Export of the current crop selection.
//!
//! Combines the interaction model's extraction region with the rasterizer
//! and encoder to produce a downloadable file.

use log::info;
use thiserror::Error;

use crate::crop::{extract_region, CropError, CropInteractionModel, ExtractError};
use crate::decode::DecodedImage;
use crate::encode::{encode_image, EncodeError};
use crate::format::OutputFormat;

/// Filename stem used for cropped downloads.
pub const CROPPED_STEM: &str = "cropped-image";

/// Errors that can occur while exporting a selection.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Crop(#[from] CropError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// An encoded image ready to be offered as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    /// Suggested filename, e.g. `cropped-image.webp`.
    pub filename: String,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Crop `image` to the model's selection and encode it as `format`.
///
/// `image` must be the full-resolution image whose natural size was passed to
/// [`CropInteractionModel::on_image_loaded`].
pub fn export_selection(
    image: &DecodedImage,
    model: &CropInteractionModel,
    format: OutputFormat,
    quality: u8,
) -> Result<ExportedImage, ExportError> {
    let region = model.compute_extraction_region(format)?;
    let cropped = extract_region(image, &region.rect)?;
    let bytes = encode_image(&cropped, format, quality)?;

    info!(
        "exported {}x{} {} ({} bytes)",
        cropped.width,
        cropped.height,
        format,
        bytes.len()
    );

    Ok(ExportedImage {
        bytes,
        filename: format.filename(CROPPED_STEM),
        mime_type: format.mime_type(),
        width: cropped.width,
        height: cropped.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};

    fn solid(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[10, 200, 30, 255]);
        }
        DecodedImage::new(width, height, pixels)
    }

    fn model_for(image: &DecodedImage, displayed: Size) -> CropInteractionModel {
        let mut model = CropInteractionModel::new();
        model.on_image_loaded(displayed, image.size()).unwrap();
        model
    }

    #[test]
    fn test_export_default_selection() {
        let image = solid(400, 200);
        let model = model_for(&image, Size::new(100.0, 50.0));

        let exported = export_selection(&image, &model, OutputFormat::Png, 100).unwrap();
        assert_eq!(exported.filename, "cropped-image.png");
        assert_eq!(exported.mime_type, "image/png");
        assert_eq!((exported.width, exported.height), (320, 160));

        let decoded = image::load_from_memory(&exported.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (320, 160));
    }

    #[test]
    fn test_format_changes_only_encoding() {
        let image = solid(64, 64);
        let model = model_for(&image, Size::new(64.0, 64.0));
        let before = model.selection();

        let webp = export_selection(&image, &model, OutputFormat::Webp, 100).unwrap();
        let jpeg = export_selection(&image, &model, OutputFormat::Jpeg, 100).unwrap();

        assert_eq!(model.selection(), before);
        assert_eq!((webp.width, webp.height), (jpeg.width, jpeg.height));
        assert_eq!(webp.filename, "cropped-image.webp");
        assert_eq!(jpeg.filename, "cropped-image.jpg");
        assert_ne!(webp.bytes, jpeg.bytes);
    }

    #[test]
    fn test_export_empty_selection() {
        let image = solid(10, 10);
        let mut model = model_for(&image, Size::new(10.0, 10.0));
        model.begin_drag(Point::new(3.0, 3.0)).unwrap();
        model.update_drag(Point::new(3.0, 8.0));

        let result = export_selection(&image, &model, OutputFormat::Png, 100);
        assert!(matches!(
            result,
            Err(ExportError::Crop(CropError::EmptySelection))
        ));
    }

    #[test]
    fn test_export_before_load() {
        let image = solid(10, 10);
        let model = CropInteractionModel::new();

        let result = export_selection(&image, &model, OutputFormat::Webp, 100);
        assert!(matches!(
            result,
            Err(ExportError::Crop(CropError::GeometryNotReady))
        ));
    }

    #[test]
    fn test_export_rejects_short_pixel_buffer() {
        let image = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0; 12],
        };
        let model = model_for(&image, Size::new(10.0, 10.0));

        let result = export_selection(&image, &model, OutputFormat::Png, 100);
        assert!(matches!(
            result,
            Err(ExportError::Extract(ExtractError::InvalidPixelData { actual: 12, .. }))
        ));
    }

    #[test]
    fn test_export_rejects_oversized_region() {
        let image = solid(80, 60);
        let mut model = CropInteractionModel::new();
        // 8000x6000 shown at 800x600, dragged far past the bottom-right edge
        model
            .on_image_loaded(Size::new(800.0, 600.0), Size::new(8000.0, 6000.0))
            .unwrap();
        model.begin_drag(Point::new(0.0, 0.0)).unwrap();
        model.update_drag(Point::new(4000.0, 3000.0));
        model.end_drag();

        let result = export_selection(&image, &model, OutputFormat::Png, 100);
        assert!(matches!(
            result,
            Err(ExportError::Extract(ExtractError::RegionTooLarge {
                width: 40000,
                height: 30000
            }))
        ));
    }

    #[test]
    fn test_export_padded_selection_keeps_alpha() {
        let image = solid(10, 10);
        let mut model = model_for(&image, Size::new(10.0, 10.0));
        model.begin_drag(Point::new(5.0, 5.0)).unwrap();
        model.update_drag(Point::new(15.0, 15.0));
        model.end_drag();

        let exported = export_selection(&image, &model, OutputFormat::Png, 100).unwrap();
        let decoded = image::load_from_memory(&exported.bytes).unwrap().into_rgba8();

        assert_eq!(decoded.dimensions(), (10, 10));
        assert_eq!(decoded.get_pixel(0, 0).0, [10, 200, 30, 255]);
        assert_eq!(decoded.get_pixel(9, 9).0[3], 0);
    }
}
