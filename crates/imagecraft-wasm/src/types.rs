//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Imagecraft
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use imagecraft_core::decode::DecodedImage;
use imagecraft_core::{CompressedImage, ExportedImage};
use wasm_bindgen::prelude::*;

/// A decoded image wrapper for JavaScript.
///
/// Pixel data is RGBA (4 bytes per pixel), which maps directly onto
/// `ImageData` for drawing into a canvas.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. Calling `pixels()` copies it into
/// a `Uint8Array`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a new JsDecodedImage from dimensions and RGBA pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core DecodedImage (clones the pixel data).
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// An encoded file ready for download.
///
/// ```typescript
/// const file = cropper.exportSelection(image);
/// const url = URL.createObjectURL(new Blob([file.bytes()], { type: file.mime_type }));
/// link.download = file.filename;
/// ```
#[wasm_bindgen]
pub struct JsEncodedFile {
    bytes: Vec<u8>,
    filename: String,
    mime_type: String,
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl JsEncodedFile {
    /// Encoded bytes as Uint8Array (a copy).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.filename.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }
}

impl From<ExportedImage> for JsEncodedFile {
    fn from(exported: ExportedImage) -> Self {
        Self {
            bytes: exported.bytes,
            filename: exported.filename,
            mime_type: exported.mime_type.to_string(),
            width: exported.width,
            height: exported.height,
        }
    }
}

impl From<CompressedImage> for JsEncodedFile {
    fn from(compressed: CompressedImage) -> Self {
        Self {
            filename: compressed.filename(),
            mime_type: compressed.format.mime_type().to_string(),
            width: compressed.width,
            height: compressed.height,
            bytes: compressed.bytes,
        }
    }
}
