//! Model gateway and runtime backends

mod backend;
mod model;
#[cfg(feature = "ollama")]
mod ollama;

pub use backend::{GenerationParams, ModelLoader, TextGenerator};
pub use model::{GatewayConfig, GatewayStatus, ModelGateway};
#[cfg(feature = "ollama")]
pub use ollama::{DEFAULT_OLLAMA_URL, OllamaGenerator, OllamaLoader};
