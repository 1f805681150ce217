//! Remote text recognition backend
//!
//! Posts the image as base64 PNG inside a JSON body to an HTTP endpoint and
//! expects `{"blocks": [{"text": "..."}]}` back, or `{"error": "..."}`.

use anyhow::{Context, Result};
use base64::Engine;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;
use tracing::debug;

use super::{encode_png, RecognitionError, TextBlock, TextRecognizer};

/// Request body sent to the endpoint
#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    image: String,
    language: &'a str,
}

/// Response body returned by the endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RecognizeResponse {
    blocks: Vec<TextBlock>,
    error: Option<String>,
}

/// HTTP recognition client
pub struct RemoteRecognizer {
    endpoint: String,
    language: String,
    client: reqwest::Client,
    runtime: Runtime,
}

impl RemoteRecognizer {
    pub fn new(endpoint: &str, language: &str) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            language: language.to_string(),
            client,
            runtime,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, image: String) -> Result<Vec<TextBlock>, RecognitionError> {
        let request = RecognizeRequest {
            image,
            language: &self.language,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| RecognitionError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RecognitionError::Transport(e.to_string()))?;

        debug!("Remote recognition: {} ({} bytes)", status, body.len());
        parse_response(status, &body)
    }
}

impl TextRecognizer for RemoteRecognizer {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn recognize(&self, image: &RgbaImage) -> Result<Vec<TextBlock>, RecognitionError> {
        let png = encode_png(image)?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(png);
        self.runtime.block_on(self.post(encoded))
    }
}

/// Interpret an endpoint reply
fn parse_response(status: reqwest::StatusCode, body: &str) -> Result<Vec<TextBlock>, RecognitionError> {
    let parsed: Option<RecognizeResponse> = serde_json::from_str(body).ok();

    if let Some(message) = parsed.as_ref().and_then(|r| r.error.clone()) {
        return Err(RecognitionError::Service(message));
    }

    if !status.is_success() {
        let detail = body.trim();
        return Err(RecognitionError::Service(if detail.is_empty() {
            format!("recognition endpoint returned {}", status)
        } else {
            format!("recognition endpoint returned {}: {}", status, detail)
        }));
    }

    parsed
        .map(|r| r.blocks)
        .ok_or_else(|| RecognitionError::Service("malformed recognition response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_parse_blocks_response() {
        let body = r#"{"blocks": [{"text": "A"}, {"text": "B"}]}"#;
        let blocks = parse_response(StatusCode::OK, body).unwrap();

        assert_eq!(blocks, vec![TextBlock::new("A"), TextBlock::new("B")]);
    }

    #[test]
    fn test_parse_empty_blocks() {
        let blocks = parse_response(StatusCode::OK, "{}").unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_parse_error_field() {
        let body = r#"{"error": "model not loaded"}"#;
        let err = parse_response(StatusCode::OK, body).unwrap_err();

        assert_eq!(err.to_string(), "model not loaded");
    }

    #[test]
    fn test_parse_http_failure() {
        let err = parse_response(StatusCode::BAD_GATEWAY, "upstream down").unwrap_err();

        assert!(matches!(err, RecognitionError::Service(_)));
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("upstream down"));
    }

    #[test]
    fn test_parse_malformed_body() {
        let err = parse_response(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, RecognitionError::Service(_)));
    }

    #[test]
    fn test_unreachable_endpoint_is_transport_error() {
        let recognizer = RemoteRecognizer::new("http://127.0.0.1:9/recognize", "eng").unwrap();
        let result = recognizer.recognize(&RgbaImage::new(2, 2));

        assert_eq!(recognizer.endpoint(), "http://127.0.0.1:9/recognize");
        assert!(matches!(result, Err(RecognitionError::Transport(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let request = RecognizeRequest {
            image: "aGk=".to_string(),
            language: "eng",
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["image"], "aGk=");
        assert_eq!(json["language"], "eng");
    }
}
