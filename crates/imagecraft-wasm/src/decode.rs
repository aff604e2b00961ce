//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@imagecraft/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::JsDecodedImage;
use imagecraft_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG, PNG or WebP file to RGBA pixels.
///
/// EXIF orientation is applied, so the result matches the `<img>` element's
/// natural size.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the data is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_invalid_bytes() {
        assert!(decode_image(&[0, 1, 2, 3]).is_err());
    }
}
