//! Output formats offered by the export and compression tools.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a format name is not recognized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unsupported output format: {0}")]
pub struct UnknownFormat(pub String);

/// Encoding used for an exported image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Webp,
    Png,
    Jpeg,
}

impl OutputFormat {
    /// All selectable formats, in menu order.
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Webp, OutputFormat::Png, OutputFormat::Jpeg];

    /// Canonical file extension (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Webp => "webp",
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    /// MIME type used for blobs and downloads.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Webp => "image/webp",
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    /// Whether the encoder keeps an alpha channel.
    pub fn supports_alpha(self) -> bool {
        !matches!(self, OutputFormat::Jpeg)
    }

    /// Whether the `quality` setting affects the encoded output.
    pub fn is_lossy(self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }

    /// Build a download filename such as `cropped-image.webp`.
    pub fn filename(self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Webp => "webp",
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    /// Accepts bare names (`png`, `jpg`) and MIME types (`image/png`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let name = lower.strip_prefix("image/").unwrap_or(&lower);
        match name {
            "webp" => Ok(OutputFormat::Webp),
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_webp() {
        assert_eq!(OutputFormat::default(), OutputFormat::Webp);
    }

    #[test]
    fn test_extensions() {
        assert_eq!(OutputFormat::Webp.extension(), "webp");
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
    }

    #[test]
    fn test_filename() {
        assert_eq!(OutputFormat::Png.filename("cropped-image"), "cropped-image.png");
        assert_eq!(OutputFormat::Jpeg.filename("cropped-image"), "cropped-image.jpg");
    }

    #[test]
    fn test_parse_names_and_mime_types() {
        assert_eq!("webp".parse::<OutputFormat>(), Ok(OutputFormat::Webp));
        assert_eq!("PNG".parse::<OutputFormat>(), Ok(OutputFormat::Png));
        assert_eq!("jpg".parse::<OutputFormat>(), Ok(OutputFormat::Jpeg));
        assert_eq!("image/jpeg".parse::<OutputFormat>(), Ok(OutputFormat::Jpeg));
        assert_eq!(" image/webp ".parse::<OutputFormat>(), Ok(OutputFormat::Webp));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "gif".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported output format: gif");
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for format in OutputFormat::ALL {
            assert_eq!(format.to_string().parse::<OutputFormat>(), Ok(format));
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Jpeg).unwrap();
        assert_eq!(json, "\"jpeg\"");
        let parsed: OutputFormat = serde_json::from_str("\"png\"").unwrap();
        assert_eq!(parsed, OutputFormat::Png);
    }

    #[test]
    fn test_alpha_support() {
        assert!(OutputFormat::Png.supports_alpha());
        assert!(OutputFormat::Webp.supports_alpha());
        assert!(!OutputFormat::Jpeg.supports_alpha());
    }
}
