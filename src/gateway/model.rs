//! ModelGateway - the single owned handle to the model runtime.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, instrument};

use super::backend::{GenerationParams, ModelLoader, TextGenerator};
use crate::{PenwrightError, Result};

/// Configuration for loading a [`ModelGateway`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Path to the model artifact on disk.
    pub model_path: PathBuf,
    /// Sampling parameters applied to every inference call.
    pub params: GenerationParams,
}

impl GatewayConfig {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            params: GenerationParams::default(),
        }
    }

    pub fn params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}

/// Whether a gateway can serve inference calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayStatus {
    /// Model loaded; `backend` names the generator.
    Ready { backend: String },
    /// Initialization failed; every call fails with `reason`.
    Unavailable { reason: String },
}

enum GatewayState {
    Ready(Box<dyn TextGenerator>),
    Unavailable(String),
}

/// Owns exactly one model handle for the life of the process.
///
/// Construct once at startup and share by reference (or `Arc`) with the
/// [`GenerationService`](crate::GenerationService). A failed load does not
/// make construction fail: the gateway records the reason and reports
/// itself unusable, with no retry on later calls.
pub struct ModelGateway {
    model_path: Option<PathBuf>,
    state: GatewayState,
}

impl ModelGateway {
    /// Load the configured model artifact through `loader`.
    ///
    /// The artifact must exist as a regular file before the loader is
    /// consulted.
    #[instrument(name = "gateway.load", skip_all, fields(path = %config.model_path.display(), loader = loader.name()))]
    pub async fn load(config: GatewayConfig, loader: &dyn ModelLoader) -> Self {
        let state = match Self::bring_up(&config, loader).await {
            Ok(generator) => {
                info!(backend = generator.name(), "model loaded");
                GatewayState::Ready(generator)
            }
            Err(e) => {
                error!(error = %e, "model failed to load; gateway unusable");
                GatewayState::Unavailable(e.to_string())
            }
        };
        Self {
            model_path: Some(config.model_path),
            state,
        }
    }

    /// Wrap an already-loaded generator.
    pub fn from_generator(generator: impl TextGenerator + 'static) -> Self {
        Self {
            model_path: None,
            state: GatewayState::Ready(Box::new(generator)),
        }
    }

    /// A gateway that failed initialization for `reason`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            model_path: None,
            state: GatewayState::Unavailable(reason.into()),
        }
    }

    async fn bring_up(
        config: &GatewayConfig,
        loader: &dyn ModelLoader,
    ) -> Result<Box<dyn TextGenerator>> {
        check_artifact(&config.model_path)?;
        loader
            .load(&config.model_path, &config.params)
            .await
            .map_err(|e| match e {
                PenwrightError::ModelUnavailable(_) => e,
                other => PenwrightError::ModelUnavailable(other.to_string()),
            })
    }

    /// Current status.
    pub fn status(&self) -> GatewayStatus {
        match &self.state {
            GatewayState::Ready(generator) => GatewayStatus::Ready {
                backend: generator.name().to_string(),
            },
            GatewayState::Unavailable(reason) => GatewayStatus::Unavailable {
                reason: reason.clone(),
            },
        }
    }

    pub fn is_usable(&self) -> bool {
        matches!(self.state, GatewayState::Ready(_))
    }

    /// The artifact this gateway was loaded from, if any.
    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }

    /// Run the prompt through the model.
    ///
    /// Fails with `ModelUnavailable` if initialization failed, otherwise with
    /// `Inference` wrapping whatever the backend reported.
    pub async fn infer(&self, prompt: &str) -> Result<String> {
        let generator = match &self.state {
            GatewayState::Ready(generator) => generator,
            GatewayState::Unavailable(reason) => {
                return Err(PenwrightError::ModelUnavailable(reason.clone()));
            }
        };
        generator.generate(prompt).await.map_err(|e| match e {
            PenwrightError::Inference(_) => e,
            other => PenwrightError::Inference(other.to_string()),
        })
    }
}

impl std::fmt::Debug for ModelGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelGateway")
            .field("model_path", &self.model_path)
            .field("status", &self.status())
            .finish()
    }
}

fn check_artifact(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| {
        PenwrightError::ModelUnavailable(format!("model artifact {path:?} not found: {e}"))
    })?;
    if !metadata.is_file() {
        return Err(PenwrightError::ModelUnavailable(format!(
            "model artifact {path:?} is not a file"
        )));
    }
    Ok(())
}
