//! WASM bindings for the crop interaction model.
//!
//! The page wires its pointer events straight to a `Cropper` instance:
//!
//! ```typescript
//! const cropper = new Cropper();
//!
//! img.onload = () => cropper.onImageLoaded(
//!   img.width, img.height, img.naturalWidth, img.naturalHeight);
//!
//! surface.onmousedown = (e) => cropper.beginDrag(e.offsetX, e.offsetY);
//! surface.onmousemove = (e) => cropper.updateDrag(e.offsetX, e.offsetY);
//! surface.onmouseup = () => cropper.endDrag();
//! surface.onmouseleave = () => cropper.endDrag();
//!
//! downloadButton.disabled = !cropper.canExport();
//! const file = cropper.exportSelection(decodedImage);
//! ```

use crate::types::{JsDecodedImage, JsEncodedFile};
use imagecraft_core::{
    export_selection, CropInteractionModel, DisplayGeometry, DisplayRect, EditorConfig,
    OutputFormat, Point, Size,
};
use wasm_bindgen::prelude::*;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Crop selection state for one editing session.
#[wasm_bindgen(js_name = Cropper)]
pub struct JsCropper {
    model: CropInteractionModel,
    format: OutputFormat,
    quality: u8,
}

impl Default for JsCropper {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(js_class = Cropper)]
impl JsCropper {
    /// Create a cropper with default settings (WebP output, 10% inset).
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsCropper {
        Self::from_config(&EditorConfig::default())
    }

    /// Create a cropper from an `EditorConfig`-shaped object.
    ///
    /// Missing fields take their defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<JsCropper, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js_error)?
        };
        config.validate().map_err(to_js_error)?;
        Ok(Self::from_config(&config))
    }

    /// Establish geometry once the `<img>` has been laid out.
    #[wasm_bindgen(js_name = onImageLoaded)]
    pub fn on_image_loaded(
        &mut self,
        displayed_width: f64,
        displayed_height: f64,
        natural_width: f64,
        natural_height: f64,
    ) -> Result<(), JsValue> {
        self.model
            .on_image_loaded(
                Size::new(displayed_width, displayed_height),
                Size::new(natural_width, natural_height),
            )
            .map_err(to_js_error)
    }

    /// Like `onImageLoaded`, but derives the displayed size from the
    /// container the image is fitted into.
    #[wasm_bindgen(js_name = fitToContainer)]
    pub fn fit_to_container(
        &mut self,
        container_width: f64,
        container_height: f64,
        natural_width: f64,
        natural_height: f64,
    ) -> Result<(), JsValue> {
        let geometry = DisplayGeometry::fit_to_container(
            Size::new(container_width, container_height),
            Size::new(natural_width, natural_height),
        );
        self.model
            .on_image_loaded(geometry.displayed, geometry.natural)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = beginDrag)]
    pub fn begin_drag(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.model.begin_drag(Point::new(x, y)).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = updateDrag)]
    pub fn update_drag(&mut self, x: f64, y: f64) {
        self.model.update_drag(Point::new(x, y));
    }

    /// End the gesture. Wire both pointer-up and pointer-leave here.
    #[wasm_bindgen(js_name = endDrag)]
    pub fn end_drag(&mut self) {
        self.model.end_drag();
    }

    #[wasm_bindgen(js_name = resetSelection)]
    pub fn reset_selection(&mut self) -> Result<(), JsValue> {
        self.model.reset_selection().map_err(to_js_error)
    }

    pub fn clear(&mut self) {
        self.model.clear();
    }

    /// Whether the download button should be enabled.
    #[wasm_bindgen(js_name = canExport)]
    pub fn can_export(&self) -> bool {
        self.model.can_export()
    }

    #[wasm_bindgen(getter, js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.model.drag_session().active
    }

    #[wasm_bindgen(getter, js_name = selectionX)]
    pub fn selection_x(&self) -> f64 {
        self.model.selection().x
    }

    #[wasm_bindgen(getter, js_name = selectionY)]
    pub fn selection_y(&self) -> f64 {
        self.model.selection().y
    }

    #[wasm_bindgen(getter, js_name = selectionWidth)]
    pub fn selection_width(&self) -> f64 {
        self.model.selection().width
    }

    #[wasm_bindgen(getter, js_name = selectionHeight)]
    pub fn selection_height(&self) -> f64 {
        self.model.selection().height
    }

    /// Currently selected output format (`webp`, `png` or `jpeg`).
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.format.to_string()
    }

    /// Select the output format by name or MIME type.
    #[wasm_bindgen(js_name = setFormat)]
    pub fn set_format(&mut self, format: &str) -> Result<(), JsValue> {
        self.format = format.parse().map_err(to_js_error)?;
        Ok(())
    }

    /// Suggested download filename for the current format.
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.format.filename(imagecraft_core::export::CROPPED_STEM)
    }

    /// The native-space region `{ rect: {x, y, width, height}, format }`.
    #[wasm_bindgen(js_name = computeExtractionRegion)]
    pub fn compute_extraction_region(&self) -> Result<JsValue, JsValue> {
        let region = self
            .model
            .compute_extraction_region(self.format)
            .map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&region).map_err(to_js_error)
    }

    /// Crop `image` (the full-resolution decode of the loaded file) and
    /// encode it in the current format.
    #[wasm_bindgen(js_name = exportSelection)]
    pub fn export_selection(&self, image: &JsDecodedImage) -> Result<JsEncodedFile, JsValue> {
        export_selection(&image.to_decoded(), &self.model, self.format, self.quality)
            .map(JsEncodedFile::from)
            .map_err(to_js_error)
    }
}

impl JsCropper {
    fn from_config(config: &EditorConfig) -> Self {
        Self {
            model: config.crop_model(),
            format: config.default_format,
            quality: config.export_quality,
        }
    }

    pub(crate) fn selection(&self) -> DisplayRect {
        self.model.selection()
    }
}
