//! Image encoding for export and compression.
//!
//! This module provides functionality for:
//! - Encoding RGBA pixels to WebP, PNG or JPEG
//!
//! # Architecture
//!
//! Encoding runs synchronously inside WASM. JPEG has no alpha channel, so
//! transparent pixels are flattened by dropping alpha before encoding.
//!
//! # Examples
//!
//! ```ignore
//! use imagecraft_core::encode::encode_image;
//! use imagecraft_core::OutputFormat;
//!
//! let bytes = encode_image(&image, OutputFormat::Png, 100)?;
//! ```

mod encoder;

pub use encoder::{encode_image, encode_pixels, EncodeError, DEFAULT_QUALITY};
