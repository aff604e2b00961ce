//! Editor configuration.
//!
//! The hosting page passes configuration as JSON (or a plain JS object through
//! the WASM bindings). Every field is optional; missing fields take their
//! defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compress::{CompressError, CompressionOptions};
use crate::crop::{CropInteractionModel, DEFAULT_INSET, MAX_INSET};
use crate::encode::DEFAULT_QUALITY;
use crate::format::OutputFormat;

/// Default endpoint of the background-removal API.
pub const DEFAULT_REMOVE_BG_ENDPOINT: &str = "https://api.remove.bg/v1.0/removebg";

/// Errors produced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings shared by the crop, compression and background-removal tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Format preselected in the export menu.
    pub default_format: OutputFormat,
    /// Margin of the initial crop selection, as a fraction of each side.
    pub initial_inset: f64,
    /// Quality used for JPEG crop exports (1-100).
    pub export_quality: u8,
    pub compression: CompressionOptions,
    pub remove_bg_endpoint: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::default(),
            initial_inset: DEFAULT_INSET,
            export_quality: DEFAULT_QUALITY,
            compression: CompressionOptions::default(),
            remove_bg_endpoint: DEFAULT_REMOVE_BG_ENDPOINT.to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_inset.is_finite() || !(0.0..=MAX_INSET).contains(&self.initial_inset) {
            return Err(ConfigError::Invalid(format!(
                "initial_inset must be in [0, {}], got {}",
                MAX_INSET, self.initial_inset
            )));
        }
        if !(1..=100).contains(&self.export_quality) {
            return Err(ConfigError::Invalid(format!(
                "export_quality must be between 1 and 100, got {}",
                self.export_quality
            )));
        }
        if self.remove_bg_endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "remove_bg_endpoint must not be empty".to_string(),
            ));
        }
        self.compression.validate().map_err(|e| match e {
            CompressError::InvalidOptions(msg) => ConfigError::Invalid(msg),
            other => ConfigError::Invalid(other.to_string()),
        })
    }

    /// A crop model using this configuration's inset.
    pub fn crop_model(&self) -> CropInteractionModel {
        CropInteractionModel::with_inset(self.initial_inset)
    }
}
