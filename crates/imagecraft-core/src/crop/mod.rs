//! Freeform crop selection.
//!
//! The hosting view forwards raw pointer events to a [`CropInteractionModel`],
//! which keeps the selection rectangle in display space and maps it into the
//! image's native pixel space on export.
//!
//! # Gesture State Machine
//!
//! ```text
//!            begin_drag
//!   Idle ─────────────────▶ Dragging ──┐
//!    ▲                         │       │ update_drag
//!    └─────── end_drag ────────┘ ◀─────┘
//! ```
//!
//! `update_drag` is ignored while idle. Pointer-leave is wired to `end_drag`
//! so a gesture never stays active after the pointer exits the surface.
//!
//! # Coordinate System
//!
//! - Display coordinates are relative to the top-left of the hosting surface
//! - Native coordinates are the image's intrinsic pixels
//! - The selection is not clamped to the image on its far side; the
//!   rasterizer pads anything outside the image with transparent pixels,
//!   refusing regions larger than [`MAX_REGION_BYTES`]

mod extract;
mod interaction;

pub use extract::{extract_region, ExtractError, MAX_REGION_BYTES};
pub use interaction::{
    default_selection, drag_rect, CropError, CropInteractionModel, DragSession, DragState,
    ExtractionRegion, DEFAULT_INSET, MAX_INSET,
};
