//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bytes per pixel in a [`DecodedImage`] (RGBA8).
pub const CHANNELS: usize = 4;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// Requested output dimensions are zero.
    #[error("Invalid target dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded image with RGBA pixel data.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Bytes needed for a `width` x `height` RGBA buffer, or `None` if that
    /// does not fit in `usize` on this target.
    pub fn buffer_len(width: u32, height: u32) -> Option<usize> {
        let len = u64::from(width)
            .checked_mul(u64::from(height))?
            .checked_mul(CHANNELS as u64)?;
        usize::try_from(len).ok()
    }

    /// A fully transparent image, or `None` if the buffer size overflows.
    pub fn transparent(width: u32, height: u32) -> Option<Self> {
        let len = Self::buffer_len(width, height)?;
        Some(Self {
            width,
            height,
            pixels: vec![0u8; len],
        })
    }

    /// True if the pixel buffer holds exactly `width * height` RGBA pixels.
    pub fn has_valid_buffer(&self) -> bool {
        Self::buffer_len(self.width, self.height) == Some(self.pixels.len())
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbaImage for further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Image size as floating-point dimensions, for display geometry.
    pub fn size(&self) -> crate::geometry::Size {
        crate::geometry::Size::new(self.width as f64, self.height as f64)
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
