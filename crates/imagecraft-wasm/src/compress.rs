//! Compression WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { compress_image } from '@imagecraft/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_image(bytes, { quality: 80, format: "webp" });
//! link.download = result.filename; // "compressed-image.webp"
//! ```

use crate::types::JsEncodedFile;
use imagecraft_core::compress;
use imagecraft_core::CompressionOptions;
use wasm_bindgen::prelude::*;

/// Compress an image file.
///
/// `options` is an optional `CompressionOptions`-shaped object
/// (`quality`, `max_width_or_height`, `max_size_bytes`, `format`); missing
/// fields take their defaults.
#[wasm_bindgen]
pub fn compress_image(bytes: &[u8], options: JsValue) -> Result<JsEncodedFile, JsValue> {
    let options: CompressionOptions = if options.is_undefined() || options.is_null() {
        CompressionOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    compress_with(bytes, &options).map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn compress_with(
    bytes: &[u8],
    options: &CompressionOptions,
) -> Result<JsEncodedFile, compress::CompressError> {
    compress::compress_image(bytes, options).map(JsEncodedFile::from)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_compress_invalid_bytes() {
        assert!(compress_image(b"nope", JsValue::UNDEFINED).is_err());
    }
}
