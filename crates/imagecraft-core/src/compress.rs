//! Size-budgeted image compression.
//!
//! The compressor decodes a user file, downsizes it to a maximum edge length
//! and re-encodes it. If the result is still over the byte budget it tries
//! again: first with lower JPEG quality, then with smaller dimensions.
//!
//! # Search Order
//!
//! 1. Fit to `max_width_or_height` and encode at `quality`
//! 2. JPEG only: lower quality in steps of 10 down to 10
//! 3. Downscale by 0.8 per attempt until the longest edge would drop below
//!    16 px
//!
//! The smallest attempt is returned even if it never met the budget.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{decode_image, resize, resize_to_fit, DecodeError, DecodedImage, FilterType};
use crate::encode::{encode_image, EncodeError};
use crate::format::OutputFormat;

/// Filename stem used for compressed downloads.
pub const COMPRESSED_STEM: &str = "compressed-image";

const QUALITY_STEP: u8 = 10;
const MIN_QUALITY: u8 = 10;
const DOWNSCALE_FACTOR: f64 = 0.8;
const MIN_EDGE: u32 = 16;

/// Errors that can occur while compressing.
#[derive(Debug, Error)]
pub enum CompressError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("Invalid compression options: {0}")]
    InvalidOptions(String),
}

/// Tunables for [`compress_image`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionOptions {
    /// Starting quality (1-100). Only JPEG output is affected.
    pub quality: u8,
    /// Longest allowed edge in pixels.
    pub max_width_or_height: u32,
    /// Target upper bound for the encoded size.
    pub max_size_bytes: usize,
    pub format: OutputFormat,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            quality: 80,
            max_width_or_height: 1920,
            max_size_bytes: 1024 * 1024,
            format: OutputFormat::Webp,
        }
    }
}

impl CompressionOptions {
    /// Settings used by the server-side compression endpoint.
    pub fn server() -> Self {
        Self {
            quality: 50,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), CompressError> {
        if !(1..=100).contains(&self.quality) {
            return Err(CompressError::InvalidOptions(format!(
                "quality must be between 1 and 100, got {}",
                self.quality
            )));
        }
        if self.max_width_or_height == 0 {
            return Err(CompressError::InvalidOptions(
                "max_width_or_height must be positive".to_string(),
            ));
        }
        if self.max_size_bytes == 0 {
            return Err(CompressError::InvalidOptions(
                "max_size_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a compression run.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Quality of the returned attempt.
    pub quality: u8,
    pub format: OutputFormat,
    /// Size of the input file, or of the raw RGBA buffer when compressing an
    /// already decoded image.
    pub original_size: usize,
}

impl CompressedImage {
    /// Suggested filename, e.g. `compressed-image.webp`.
    pub fn filename(&self) -> String {
        self.format.filename(COMPRESSED_STEM)
    }

    /// True when the encoded output fits the requested budget.
    pub fn within_budget(&self, options: &CompressionOptions) -> bool {
        self.bytes.len() <= options.max_size_bytes
    }

    /// Compressed size relative to the original (1.0 = unchanged).
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            return 1.0;
        }
        self.bytes.len() as f64 / self.original_size as f64
    }
}

/// Decode `bytes` and compress them according to `options`.
pub fn compress_image(
    bytes: &[u8],
    options: &CompressionOptions,
) -> Result<CompressedImage, CompressError> {
    options.validate()?;
    let image = decode_image(bytes)?;
    let mut result = compress_decoded(&image, options)?;
    result.original_size = bytes.len();

    info!(
        "compressed {} bytes to {} bytes ({}x{}, {}, quality {})",
        result.original_size,
        result.bytes.len(),
        result.width,
        result.height,
        result.format,
        result.quality
    );
    Ok(result)
}

/// Compress an already decoded image.
pub fn compress_decoded(
    image: &DecodedImage,
    options: &CompressionOptions,
) -> Result<CompressedImage, CompressError> {
    options.validate()?;

    let format = options.format;
    let mut current = resize_to_fit(image, options.max_width_or_height, FilterType::Lanczos3)?;
    let mut quality = options.quality;
    let mut best = attempt(&current, format, quality)?;

    if format.is_lossy() {
        while best.bytes.len() > options.max_size_bytes && quality > MIN_QUALITY {
            quality = quality.saturating_sub(QUALITY_STEP).max(MIN_QUALITY);
            debug!("over budget, retrying at quality {}", quality);
            let candidate = attempt(&current, format, quality)?;
            if candidate.bytes.len() < best.bytes.len() {
                best = candidate;
            }
        }
    }

    while best.bytes.len() > options.max_size_bytes {
        let width = (current.width as f64 * DOWNSCALE_FACTOR).round() as u32;
        let height = (current.height as f64 * DOWNSCALE_FACTOR).round() as u32;
        if width.max(height) < MIN_EDGE || width == 0 || height == 0 {
            break;
        }

        debug!("over budget, downscaling to {}x{}", width, height);
        current = resize(&current, width, height, FilterType::Bilinear)?;
        let candidate = attempt(&current, format, quality)?;
        if candidate.bytes.len() < best.bytes.len() {
            best = candidate;
        }
    }

    Ok(best)
}

fn attempt(
    image: &DecodedImage,
    format: OutputFormat,
    quality: u8,
) -> Result<CompressedImage, CompressError> {
    let bytes = encode_image(image, format, quality)?;
    Ok(CompressedImage {
        bytes,
        width: image.width,
        height: image.height,
        quality,
        format,
        original_size: image.pixels.len(),
    })
}
