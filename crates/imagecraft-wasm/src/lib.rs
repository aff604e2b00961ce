//! Imagecraft WASM - WebAssembly bindings for Imagecraft
//!
//! This crate exposes the imagecraft-core crop model and image pipeline to
//! the browser front end.
//!
//! # Module Structure
//!
//! - `cropper` - The `Cropper` class wrapping the crop interaction model
//! - `types` - WASM-compatible wrapper types for image data and encoded files
//! - `decode` - Image decoding bindings
//! - `encode` - Image encoding bindings
//! - `compress` - Size-budgeted compression bindings
//! - `logger` - `log` backend writing to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { Cropper, decode_image } from '@imagecraft/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const cropper = new Cropper();
//! cropper.onImageLoaded(img.width, img.height, image.width, image.height);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod cropper;
mod decode;
mod encode;
mod logger;
mod types;

// Re-export public types
pub use compress::compress_image;
pub use cropper::JsCropper;
pub use decode::decode_image;
pub use encode::{encode_image, format_extension};
pub use logger::set_log_level;
pub use types::{JsDecodedImage, JsEncodedFile};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(logger::DEFAULT_LEVEL);
    log::debug!("imagecraft-wasm {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
