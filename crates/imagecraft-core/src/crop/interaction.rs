//! Pointer-drag interaction model for the crop selection.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::OutputFormat;
use crate::geometry::{DisplayGeometry, DisplayRect, NativeRect, Point, Size};

/// Fraction of each displayed dimension left outside the initial selection
/// on every side.
pub const DEFAULT_INSET: f64 = 0.1;

/// Largest accepted inset. Anything above leaves too little to select.
pub const MAX_INSET: f64 = 0.49;

/// Precondition failures of the crop model.
///
/// None of these are user-facing: the hosting view disables its inputs and
/// export action so they cannot be reached through normal interaction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CropError {
    /// Export requested while the selection has zero width or height.
    #[error("Selection is empty")]
    EmptySelection,

    /// Operation invoked before an image finished loading.
    #[error("No image geometry has been established")]
    GeometryNotReady,

    /// The loader reported a non-positive or non-finite size.
    #[error("Invalid image geometry: {width}x{height}")]
    InvalidGeometry { width: f64, height: f64 },
}

/// Current phase of the drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Ephemeral state of one pointer-drag gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    /// Display-space point where the drag started.
    pub anchor: Point,
    pub active: bool,
}

/// A native-space rectangle together with the format to encode it in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRegion {
    pub rect: NativeRect,
    pub format: OutputFormat,
}

impl ExtractionRegion {
    /// Suggested download filename, e.g. `cropped-image.png`.
    pub fn filename(&self) -> String {
        self.format.filename("cropped-image")
    }
}

/// Rectangle spanned by a drag from `anchor` to `pointer`.
pub fn drag_rect(anchor: Point, pointer: Point) -> DisplayRect {
    DisplayRect::from_corners(anchor, pointer)
}

/// Centered selection leaving `inset` of each dimension free on every side.
pub fn default_selection(displayed: Size, inset: f64) -> DisplayRect {
    // 1.0 - 2.0 * 0.1 is exactly 0.8, so the default matches `w * 0.8`
    let span = 1.0 - 2.0 * inset;
    DisplayRect {
        x: displayed.width * inset,
        y: displayed.height * inset,
        width: displayed.width * span,
        height: displayed.height * span,
    }
}

/// Selection state for one editing session.
///
/// Owned by the hosting view. Loading a new image resets everything.
#[derive(Debug, Clone, PartialEq)]
pub struct CropInteractionModel {
    geometry: Option<DisplayGeometry>,
    selection: DisplayRect,
    drag: DragSession,
    inset: f64,
}

impl Default for CropInteractionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl CropInteractionModel {
    pub fn new() -> Self {
        Self::with_inset(DEFAULT_INSET)
    }

    /// Create a model whose initial selection uses a custom inset.
    ///
    /// The inset is clamped to `[0.0, MAX_INSET]` so the default selection
    /// always has positive area.
    pub fn with_inset(inset: f64) -> Self {
        let inset = if inset.is_finite() {
            inset.clamp(0.0, MAX_INSET)
        } else {
            DEFAULT_INSET
        };
        Self {
            geometry: None,
            selection: DisplayRect::default(),
            drag: DragSession::default(),
            inset,
        }
    }

    /// Establish geometry for a freshly loaded image and place the default
    /// selection.
    ///
    /// Fails with `InvalidGeometry` if either size is not strictly positive;
    /// the model is left untouched in that case.
    pub fn on_image_loaded(&mut self, displayed: Size, natural: Size) -> Result<(), CropError> {
        for size in [displayed, natural] {
            if !size.is_positive() {
                return Err(CropError::InvalidGeometry {
                    width: size.width,
                    height: size.height,
                });
            }
        }

        self.geometry = Some(DisplayGeometry::new(displayed, natural));
        self.selection = default_selection(displayed, self.inset);
        self.drag = DragSession::default();

        debug!(
            "image loaded: displayed {}x{}, natural {}x{}",
            displayed.width, displayed.height, natural.width, natural.height
        );
        Ok(())
    }

    /// Start a gesture anchored at `pointer`. The selection is not changed.
    pub fn begin_drag(&mut self, pointer: Point) -> Result<(), CropError> {
        if self.geometry.is_none() {
            return Err(CropError::GeometryNotReady);
        }

        self.drag = DragSession {
            anchor: pointer.clamp_to_origin(),
            active: true,
        };
        Ok(())
    }

    /// Stretch the selection between the anchor and `pointer`.
    ///
    /// Ignored when no gesture is active.
    pub fn update_drag(&mut self, pointer: Point) {
        if !self.drag.active {
            return;
        }
        self.selection = drag_rect(self.drag.anchor, pointer.clamp_to_origin());
    }

    /// Finish the gesture. Also used for pointer-leave.
    pub fn end_drag(&mut self) {
        if self.drag.active {
            debug!("drag ended with selection {:?}", self.selection);
        }
        self.drag.active = false;
    }

    /// Restore the default selection for the current image.
    pub fn reset_selection(&mut self) -> Result<(), CropError> {
        let geometry = self.geometry.ok_or(CropError::GeometryNotReady)?;
        self.selection = default_selection(geometry.displayed, self.inset);
        self.drag = DragSession::default();
        Ok(())
    }

    /// Forget the current image entirely.
    pub fn clear(&mut self) {
        self.geometry = None;
        self.selection = DisplayRect::default();
        self.drag = DragSession::default();
    }

    /// Map the selection into native pixels for export in `format`.
    pub fn compute_extraction_region(
        &self,
        format: OutputFormat,
    ) -> Result<ExtractionRegion, CropError> {
        let geometry = self.geometry.as_ref().ok_or(CropError::GeometryNotReady)?;
        if self.selection.is_empty() {
            return Err(CropError::EmptySelection);
        }

        Ok(ExtractionRegion {
            rect: geometry.to_native(&self.selection),
            format,
        })
    }

    /// Whether an export would currently succeed.
    pub fn can_export(&self) -> bool {
        self.geometry.is_some() && !self.selection.is_empty()
    }

    pub fn state(&self) -> DragState {
        if self.drag.active {
            DragState::Dragging
        } else {
            DragState::Idle
        }
    }

    pub fn selection(&self) -> DisplayRect {
        self.selection
    }

    pub fn geometry(&self) -> Option<&DisplayGeometry> {
        self.geometry.as_ref()
    }

    pub fn drag_session(&self) -> &DragSession {
        &self.drag
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
