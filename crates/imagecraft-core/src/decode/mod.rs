//! Image decoding for the crop and compression tools.
//!
//! This module provides functionality for:
//! - Decoding user-selected files (JPEG, PNG, WebP) to RGBA pixels
//! - Applying EXIF orientation so native dimensions match what the browser shows
//! - Aspect-preserving downscaling for compression
//!
//! # Architecture
//!
//! Decoding runs synchronously inside WASM. Pixels are kept as RGBA8 so that
//! transparency from background-removed images survives a crop.

mod load;
mod resize;
mod types;

pub use load::decode_image;
pub use resize::{resize, resize_to_fit};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation, CHANNELS};
