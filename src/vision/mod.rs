//! Vision/OCR Layer
//!
//! Text recognition collaborators and the invoker that runs them off the UI
//! thread. Supports multiple backends:
//! - local `tesseract` executable (default)
//! - remote HTTP recognition endpoint

pub mod invoker;
pub mod preprocess;
pub mod remote;
pub mod tesseract;

use anyhow::{Context, Result};
use image::RgbaImage;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::{RecognitionSettings, RecognizerBackend};

pub use invoker::{RecognitionInvoker, RecognitionOutcome, RecognitionState};
pub use preprocess::apply_preprocessing;
pub use remote::RemoteRecognizer;
pub use tesseract::TesseractRecognizer;

/// One block of recognized text
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct TextBlock {
    /// Plain text of the block
    pub text: String,
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Failure reported by a recognition collaborator
#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    /// The service ran but rejected or failed the request
    #[error("{0}")]
    Service(String),
    /// The service could not be reached
    #[error("transport error: {0}")]
    Transport(String),
    /// The image could not be encoded for the service
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Text recognition collaborator
///
/// Implementations are called from a worker thread, never from the UI thread.
pub trait TextRecognizer: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Recognize all text blocks in an image
    fn recognize(&self, image: &RgbaImage) -> Result<Vec<TextBlock>, RecognitionError>;
}

/// Build the recognizer selected in the settings
pub fn create_recognizer(settings: &RecognitionSettings) -> Result<Arc<dyn TextRecognizer>> {
    let recognizer: Arc<dyn TextRecognizer> = match settings.backend {
        RecognizerBackend::Tesseract => {
            let tesseract = TesseractRecognizer::new(&settings.tesseract_path, &settings.language);
            debug!("Tesseract language: {}", tesseract.language());
            Arc::new(tesseract)
        }
        RecognizerBackend::Remote => {
            let endpoint = settings
                .endpoint
                .as_deref()
                .context("Remote recognition backend selected but no endpoint configured")?;
            let remote = RemoteRecognizer::new(endpoint, &settings.language)?;
            debug!("Remote recognition endpoint: {}", remote.endpoint());
            Arc::new(remote)
        }
    };

    info!("Using {} text recognition backend", recognizer.name());
    Ok(recognizer)
}

/// PNG-encode an image for handing to an external service
pub(crate) fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    image.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecognitionSettings;

    #[test]
    fn test_create_tesseract_backend() {
        let settings = RecognitionSettings::default();
        let recognizer = create_recognizer(&settings).unwrap();

        assert_eq!(recognizer.name(), "tesseract");
    }

    #[test]
    fn test_remote_backend_requires_endpoint() {
        let settings = RecognitionSettings {
            backend: RecognizerBackend::Remote,
            endpoint: None,
            ..Default::default()
        };

        assert!(create_recognizer(&settings).is_err());
    }

    #[test]
    fn test_encode_png_signature() {
        let image = RgbaImage::new(4, 4);
        let bytes = encode_png(&image).unwrap();

        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_service_error_displays_message() {
        let err = RecognitionError::Service("network down".to_string());
        assert_eq!(err.to_string(), "network down");
    }
}
