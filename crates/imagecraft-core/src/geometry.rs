//! Coordinate types for the crop editor.
//!
//! Two pixel spaces are involved when cropping an image shown in the browser:
//!
//! - **Display space**: pixels of the rendered `<img>` element as laid out on
//!   screen, with the origin at the top-left of the surface hosting it.
//! - **Native space**: the image's intrinsic pixel grid.
//!
//! [`DisplayGeometry`] carries both sizes and maps rectangles from the first
//! space into the second. Scale factors are derived on demand and never stored.

use serde::{Deserialize, Serialize};

/// A pointer position in display space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both components to be non-negative.
    ///
    /// Selections are anchored to the surface origin, so a pointer reported
    /// slightly left of or above the surface is pinned to its edge.
    pub fn clamp_to_origin(self) -> Self {
        Self {
            x: self.x.max(0.0),
            y: self.y.max(0.0),
        }
    }
}

/// Width and height of an image or layout box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// The crop selection in display pixels.
///
/// Width and height are never negative. The rectangle is not clamped to the
/// displayed image on its far side, so a drag may extend past the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounding box of two corner points.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// True when either side has zero length.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A rectangle in the image's native pixel space.
///
/// Values stay fractional; the rasterizer rounds them to whole pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Mapping context between display space and native space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayGeometry {
    /// Size of the rendered image element.
    pub displayed: Size,
    /// Intrinsic pixel size of the image.
    pub natural: Size,
}

impl DisplayGeometry {
    pub fn new(displayed: Size, natural: Size) -> Self {
        Self { displayed, natural }
    }

    /// Geometry for an image laid out inside `container` with "contain"
    /// semantics.
    ///
    /// The image first fills the container width; if the resulting height
    /// overflows, the height is pinned to the container and the width follows
    /// the aspect ratio instead.
    pub fn fit_to_container(container: Size, natural: Size) -> Self {
        let ratio = natural.aspect_ratio();
        let mut width = container.width;
        let mut height = container.width / ratio;

        if height > container.height {
            height = container.height;
            width = container.height * ratio;
        }

        Self {
            displayed: Size::new(width, height),
            natural,
        }
    }

    /// Horizontal display-to-native scale factor.
    #[inline]
    pub fn scale_x(&self) -> f64 {
        self.natural.width / self.displayed.width
    }

    /// Vertical display-to-native scale factor.
    #[inline]
    pub fn scale_y(&self) -> f64 {
        self.natural.height / self.displayed.height
    }

    /// Map a display rectangle into native pixel space.
    pub fn to_native(&self, rect: &DisplayRect) -> NativeRect {
        let sx = self.scale_x();
        let sy = self.scale_y();
        NativeRect {
            x: rect.x * sx,
            y: rect.y * sy,
            width: rect.width * sx,
            height: rect.height * sy,
        }
    }
}
