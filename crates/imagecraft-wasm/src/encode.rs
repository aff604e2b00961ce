//! Image encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_image } from '@imagecraft/wasm';
//!
//! const webp = encode_image(image, "webp", 100);
//! const jpeg = encode_image(image, "image/jpeg", 85);
//! ```

use crate::types::JsDecodedImage;
use imagecraft_core::encode;
use imagecraft_core::OutputFormat;
use wasm_bindgen::prelude::*;

/// Encode a decoded image as `format` (`webp`, `png`, `jpeg`/`jpg` or a MIME
/// type).
///
/// `quality` (1-100) only affects JPEG.
#[wasm_bindgen]
pub fn encode_image(image: &JsDecodedImage, format: &str, quality: u8) -> Result<Vec<u8>, JsValue> {
    let format: OutputFormat = format
        .parse()
        .map_err(|e: imagecraft_core::format::UnknownFormat| JsValue::from_str(&e.to_string()))?;
    encode::encode_image(&image.to_decoded(), format, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Canonical file extension for a format name, e.g. `jpeg` -> `jpg`.
#[wasm_bindgen]
pub fn format_extension(format: &str) -> Option<String> {
    format
        .parse::<OutputFormat>()
        .ok()
        .map(|f| f.extension().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_image_webp() {
        let img = JsDecodedImage::new(4, 4, vec![200u8; 4 * 4 * 4]);

        let bytes = match encode_image(&img, "webp", 100) {
            Ok(bytes) => bytes,
            Err(_) => panic!("encode failed"),
        };
        assert_eq!(&bytes[0..4], b"RIFF");
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(format_extension("jpeg"), Some("jpg".to_string()));
        assert_eq!(format_extension("image/png"), Some("png".to_string()));
        assert_eq!(format_extension("bmp"), None);
    }
}
