//! Local model runtime served by Ollama, driven through the llm crate.
//!
//! The model artifact is checked on disk by the gateway; Ollama serves it
//! under a model name that defaults to the artifact's file stem. One llm
//! provider is built at load time and reused for every call.

use std::path::Path;

use async_trait::async_trait;
use llm::LLMProvider;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::completion::CompletionRequest;
use tracing::instrument;

use super::backend::{GenerationParams, ModelLoader, TextGenerator};
use crate::{PenwrightError, Result};

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Builds an [`OllamaGenerator`] for a model artifact.
///
/// # Example
///
/// ```ignore
/// use penwright::gateway::{GatewayConfig, ModelGateway, OllamaLoader};
///
/// let loader = OllamaLoader::new("http://localhost:11434").model("llama2:7b-chat");
/// let gateway = ModelGateway::load(GatewayConfig::new("llama-2-7b-chat.bin"), &loader).await;
/// ```
#[derive(Debug, Clone)]
pub struct OllamaLoader {
    base_url: String,
    model: Option<String>,
    timeout_secs: u64,
}

impl OllamaLoader {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: None,
            timeout_secs: 600,
        }
    }

    /// Serve under this model name instead of the artifact's file stem.
    pub fn model(mut self, name: impl Into<String>) -> Self {
        self.model = Some(name.into());
        self
    }

    /// Set the HTTP timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn model_name(&self, path: &Path) -> Option<String> {
        self.model.clone().or_else(|| model_name_from_path(path))
    }
}

impl Default for OllamaLoader {
    fn default() -> Self {
        Self::new(DEFAULT_OLLAMA_URL)
    }
}

#[async_trait]
impl ModelLoader for OllamaLoader {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn load(&self, path: &Path, params: &GenerationParams) -> Result<Box<dyn TextGenerator>> {
        let model = self.model_name(path).ok_or_else(|| {
            PenwrightError::ModelUnavailable(format!("cannot derive a model name from {path:?}"))
        })?;

        let provider = LLMBuilder::new()
            .backend(LLMBackend::Ollama)
            .base_url(self.base_url.clone())
            .model(&model)
            .max_tokens(params.max_new_tokens)
            .temperature(params.temperature)
            .timeout_seconds(self.timeout_secs)
            .build()
            .map_err(|e| PenwrightError::ModelUnavailable(e.to_string()))?;

        Ok(Box::new(OllamaGenerator {
            provider,
            model,
            params: *params,
        }))
    }
}

/// A model served by Ollama.
pub struct OllamaGenerator {
    provider: Box<dyn LLMProvider>,
    model: String,
    params: GenerationParams,
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    fn name(&self) -> &str {
        "ollama"
    }

    #[instrument(name = "ollama.generate", skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = CompletionRequest::builder(prompt)
            .max_tokens(self.params.max_new_tokens)
            .temperature(self.params.temperature)
            .build();

        let response = self
            .provider
            .complete(&request)
            .await
            .map_err(|e| PenwrightError::Inference(e.to_string()))?;

        Ok(response.text)
    }
}

fn model_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_name_defaults_to_file_stem() {
        let loader = OllamaLoader::default();
        let name = loader.model_name(Path::new("/models/llama-2-7b-chat.ggmlv3.q8_0.bin"));
        assert_eq!(name.as_deref(), Some("llama-2-7b-chat.ggmlv3.q8_0"));
    }

    #[test]
    fn explicit_model_name_wins() {
        let loader = OllamaLoader::default().model("llama2:7b-chat");
        let name = loader.model_name(Path::new("weights.bin"));
        assert_eq!(name.as_deref(), Some("llama2:7b-chat"));
    }
}
