//! Penwright - offline content generation against a locally hosted model
//!
//! A caller supplies a topic (typed, or captured by voice), a word budget and
//! a style; penwright validates the request, serves repeats from a bounded
//! cache, prompts the model once per new request, and packages the text as a
//! downloadable artifact.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use penwright::gateway::{GatewayConfig, ModelGateway, OllamaLoader};
//! use penwright::{CacheConfig, GenerationService, artifact};
//!
//! #[tokio::main]
//! async fn main() -> penwright::Result<()> {
//!     let gateway = ModelGateway::load(
//!         GatewayConfig::new("llama-2-7b-chat.ggmlv3.q8_0.bin"),
//!         &OllamaLoader::default(),
//!     )
//!     .await;
//!
//!     let service = GenerationService::builder()
//!         .gateway(Arc::new(gateway))
//!         .cache(CacheConfig::new().max_entries(100))
//!         .build()?;
//!
//!     let result = service.generate("ocean plastic", 300, "academic").await?;
//!     let download = artifact::package(&result)?;
//!
//!     println!("{}", result.text());
//!     println!("{}", download.filename);
//!     Ok(())
//! }
//! ```

pub mod artifact;
pub mod cache;
#[cfg(feature = "config")]
pub mod config;
pub mod error;
pub mod gateway;
pub mod prompt;
pub mod service;
pub mod telemetry;
pub mod types;
pub mod version;
pub mod voice;

// Re-export main types at crate root
pub use artifact::{Artifact, package};
pub use cache::{CacheConfig, GenerationCache};
pub use error::{ErrorKind, PenwrightError, RecognitionFailure, Result, ValidationError};
pub use gateway::{GatewayConfig, GatewayStatus, GenerationParams, ModelGateway, TextGenerator};
pub use service::{GenerationService, GenerationServiceBuilder};
pub use types::{GenerationRequest, GenerationResult, Style, validate};
pub use version::{BuildInfo, PKG_VERSION, version_string};
pub use voice::VoiceCaptureAdapter;
