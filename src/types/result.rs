//! Output of a successful generation.

use serde::Serialize;

use super::GenerationRequest;

/// Raw model output paired with the request that produced it.
///
/// Created once per successful gateway call and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    text: String,
    source_request: GenerationRequest,
}

impl GenerationResult {
    pub fn new(text: impl Into<String>, source_request: GenerationRequest) -> Self {
        Self {
            text: text.into(),
            source_request,
        }
    }

    /// The model's output, unmodified.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_request(&self) -> &GenerationRequest {
        &self.source_request
    }
}
