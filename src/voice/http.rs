//! Transcription over HTTP.
//!
//! Posts the clip as `audio/wav` to a configured endpoint and reads back
//! `{"text": "..."}`.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::instrument;

use super::{AudioClip, CaptureResult, Transcriber, wav};
use crate::error::RecognitionFailure;

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: Option<String>,
}

/// Speech-to-text backend reached over HTTP.
///
/// - `422 Unprocessable Entity`, a missing `text`, or blank text map to
///   [`RecognitionFailure::Unintelligible`].
/// - Transport errors and any other non-success status map to
///   [`RecognitionFailure::ServiceError`].
#[derive(Debug, Clone)]
pub struct HttpTranscriber {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTranscriber {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_http_client(endpoint, reqwest::Client::new())
    }

    /// Create a transcriber with a shared HTTP client.
    pub fn with_http_client(endpoint: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(name = "http.transcribe", skip(self, clip), fields(endpoint = %self.endpoint))]
    async fn transcribe(&self, clip: &AudioClip) -> CaptureResult<String> {
        let body = wav::encode(clip)?;
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "audio/wav")
            .body(body)
            .send()
            .await
            .map_err(|e| RecognitionFailure::ServiceError(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(RecognitionFailure::Unintelligible);
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".into());
            return Err(RecognitionFailure::ServiceError(format!(
                "{}: {message}",
                status.as_u16()
            )));
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| RecognitionFailure::ServiceError(e.to_string()))?;

        body.text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(RecognitionFailure::Unintelligible)
    }
}
