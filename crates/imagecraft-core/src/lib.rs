//! Imagecraft Core - crop, convert and compress images in the browser
//!
//! This crate provides the core functionality behind the Imagecraft tools:
//! the freeform crop interaction model, display-to-native coordinate mapping,
//! decoding, cropping, encoding, size-budgeted compression and a client for
//! the remote background-removal API.
//!
//! # Crop Workflow
//!
//! ```ignore
//! use imagecraft_core::{CropInteractionModel, OutputFormat, Point, Size};
//!
//! let mut model = CropInteractionModel::new();
//! model.on_image_loaded(Size::new(1000.0, 500.0), Size::new(4000.0, 2000.0))?;
//!
//! model.begin_drag(Point::new(100.0, 100.0))?;
//! model.update_drag(Point::new(300.0, 250.0));
//! model.end_drag();
//!
//! let region = model.compute_extraction_region(OutputFormat::Png)?;
//! ```

pub mod compress;
pub mod config;
pub mod crop;
pub mod decode;
pub mod encode;
pub mod export;
pub mod format;
pub mod geometry;

#[cfg(feature = "remove-bg")]
pub mod background;

pub use compress::{compress_image, CompressedImage, CompressionOptions};
pub use config::EditorConfig;
pub use crop::{
    extract_region, CropError, CropInteractionModel, DragState, ExtractError, ExtractionRegion,
};
pub use export::{export_selection, ExportedImage};
pub use format::OutputFormat;
pub use geometry::{DisplayGeometry, DisplayRect, NativeRect, Point, Size};
