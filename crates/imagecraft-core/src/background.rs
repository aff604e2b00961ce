//! Client for the remote background-removal API.
//!
//! The image is uploaded as multipart form field `image_file` and the service
//! answers with a PNG whose background is transparent. Only the request and
//! response handling lives here; segmentation happens remotely.

use log::{info, warn};
use reqwest::header::HeaderValue;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::config::{EditorConfig, DEFAULT_REMOVE_BG_ENDPOINT};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Suggested filename for the downloaded result.
pub const RESULT_FILENAME: &str = "removed-background.png";

const FORM_FIELD: &str = "image_file";
const UPLOAD_FILENAME: &str = "image.png";

/// Errors from the background-removal client.
#[derive(Debug, Error)]
pub enum BackgroundError {
    #[error("No API key configured for background removal")]
    MissingApiKey,

    #[error("Invalid API key header value")]
    InvalidApiKey,

    #[error("Background removal failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A background-removed image.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundRemoved {
    /// PNG bytes with a transparent background.
    pub bytes: Vec<u8>,
    pub filename: &'static str,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    title: String,
}

/// HTTP client for a remove.bg-compatible endpoint.
#[derive(Debug, Clone)]
pub struct RemoveBgClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl RemoveBgClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, BackgroundError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(BackgroundError::MissingApiKey);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: DEFAULT_REMOVE_BG_ENDPOINT.to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &EditorConfig, api_key: impl Into<String>) -> Result<Self, BackgroundError> {
        Ok(Self::new(api_key)?.with_endpoint(config.remove_bg_endpoint.clone()))
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the upload request without sending it.
    pub fn build_request(&self, image: Vec<u8>) -> Result<reqwest::Request, BackgroundError> {
        let key = HeaderValue::from_str(&self.api_key).map_err(|_| BackgroundError::InvalidApiKey)?;
        let part = Part::bytes(image)
            .file_name(UPLOAD_FILENAME)
            .mime_str("image/png")?;
        let form = Form::new().part(FORM_FIELD, part);

        Ok(self
            .http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, key)
            .multipart(form)
            .build()?)
    }

    /// Upload `image` and return the background-removed PNG.
    pub async fn remove_background(&self, image: Vec<u8>) -> Result<BackgroundRemoved, BackgroundError> {
        let upload_size = image.len();
        let request = self.build_request(image)?;
        let response = self.http.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = api_error(status, &body);
            warn!("{}", err);
            return Err(err);
        }

        let bytes = response.bytes().await?.to_vec();
        info!(
            "background removed: uploaded {} bytes, received {} bytes",
            upload_size,
            bytes.len()
        );

        Ok(BackgroundRemoved {
            bytes,
            filename: RESULT_FILENAME,
        })
    }
}

/// Turn an unsuccessful response into an error, preferring the service's own
/// error titles when the body carries them.
fn api_error(status: StatusCode, body: &str) -> BackgroundError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|parsed| {
            parsed
                .errors
                .into_iter()
                .map(|e| e.title)
                .collect::<Vec<_>>()
                .join("; ")
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "Failed to remove background".to_string());

    BackgroundError::Api {
        status: status.as_u16(),
        message,
    }
}
