//! Backend traits for the model runtime.
//!
//! The runtime itself (tokenization, weights, sampling) is a black box behind
//! [`TextGenerator`]. A [`ModelLoader`] turns a model artifact on disk into a
//! generator exactly once, when the [`ModelGateway`](super::ModelGateway) is
//! loaded.
//!
//! # Error contract
//!
//! - [`ModelLoader::load`] returns `ModelUnavailable` when the artifact cannot
//!   be brought up. The gateway then stays unusable for its whole lifetime.
//! - [`TextGenerator::generate`] returns `Inference` for any per-call failure.
//!   Other error kinds are wrapped into `Inference` by the gateway.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Fixed sampling parameters, set at gateway construction.
///
/// Never derived from a request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Upper bound on generated tokens. Default: 256.
    pub max_new_tokens: u32,
    /// Sampling temperature. Default: 0.01, near-deterministic.
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 256,
            temperature: 0.01,
        }
    }
}

impl GenerationParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of generated tokens.
    pub fn max_new_tokens(mut self, n: u32) -> Self {
        self.max_new_tokens = n;
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// A loaded model that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Backend name for logging/debugging.
    fn name(&self) -> &str;

    /// Run one inference call to completion.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Brings a model artifact up as a [`TextGenerator`].
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// Loader name for logging/debugging.
    fn name(&self) -> &str;

    /// Load the artifact at `path`. Called once per gateway.
    async fn load(&self, path: &Path, params: &GenerationParams) -> Result<Box<dyn TextGenerator>>;
}
