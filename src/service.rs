//! GenerationService - validate, memoize, prompt, infer.
//!
//! ```text
//! generate(topic, words, style)
//!   -> validate            (error: returned unchanged, nothing else runs)
//!   -> cache lookup        (hit: returned as-is, no prompt, no gateway call)
//!   -> gateway usable?     (no: ServiceUnavailable, no inference attempted)
//!   -> prompt::build
//!   -> gateway.infer       (error: returned, nothing cached)
//!   -> cache put, return
//! ```
//!
//! No step retries. Every failure is a value handed back to the caller.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument, warn};

use crate::cache::{CacheConfig, GenerationCache};
use crate::gateway::{GatewayStatus, ModelGateway};
use crate::types::{GenerationRequest, GenerationResult, validate};
use crate::{PenwrightError, Result, prompt, telemetry};

/// Orchestrates one generation request end to end.
///
/// Share behind an `Arc` when several sessions use one process; the cache
/// serializes only its own reads and writes.
#[derive(Debug)]
pub struct GenerationService {
    gateway: Arc<ModelGateway>,
    cache: GenerationCache,
}

impl GenerationService {
    /// Create a service over `gateway` with its own cache.
    pub fn new(gateway: Arc<ModelGateway>, cache: &CacheConfig) -> Self {
        Self {
            gateway,
            cache: GenerationCache::new(cache),
        }
    }

    /// Create a new builder for configuring the service.
    pub fn builder() -> GenerationServiceBuilder {
        GenerationServiceBuilder::new()
    }

    pub fn gateway(&self) -> &ModelGateway {
        &self.gateway
    }

    pub fn cache(&self) -> &GenerationCache {
        &self.cache
    }

    /// Generate content for raw user input.
    ///
    /// `topic` may come from typing or from
    /// [`VoiceCaptureAdapter`](crate::voice::VoiceCaptureAdapter); the service
    /// cannot tell the difference.
    #[instrument(name = "service.generate", skip(self))]
    pub async fn generate(
        &self,
        topic: &str,
        word_count: i64,
        style: &str,
    ) -> Result<GenerationResult> {
        let outcome = match validate(topic, word_count, style) {
            Ok(request) => self.run(request).await,
            Err(e) => Err(e.into()),
        };
        record_outcome(&outcome);
        outcome
    }

    /// Generate content for an already-validated request.
    pub async fn generate_request(&self, request: GenerationRequest) -> Result<GenerationResult> {
        let outcome = self.run(request).await;
        record_outcome(&outcome);
        outcome
    }

    async fn run(&self, request: GenerationRequest) -> Result<GenerationResult> {
        if let Some(cached) = self.cache.get(&request) {
            debug!(
                topic = request.topic(),
                word_count = request.word_count(),
                style = %request.style(),
                "cache hit"
            );
            return Ok(cached);
        }

        if let GatewayStatus::Unavailable { reason } = self.gateway.status() {
            warn!(%reason, "generation requested while model is unavailable");
            return Err(PenwrightError::ServiceUnavailable(reason));
        }

        let prompt = prompt::build(&request);

        let start = Instant::now();
        let inferred = self.gateway.infer(&prompt).await;
        metrics::histogram!(telemetry::GENERATION_DURATION_SECONDS)
            .record(start.elapsed().as_secs_f64());

        let text = inferred.map_err(|e| {
            warn!(error = %e, topic = request.topic(), "inference failed");
            e
        })?;

        let result = GenerationResult::new(text, request.clone());
        self.cache.put(request, result.clone());
        Ok(result)
    }
}

fn record_outcome(outcome: &Result<GenerationResult>) {
    match outcome {
        Ok(_) => metrics::counter!(telemetry::GENERATIONS_TOTAL, "status" => "ok").increment(1),
        Err(e) => metrics::counter!(
            telemetry::GENERATIONS_TOTAL,
            "status" => "error",
            "kind" => e.kind().as_str()
        )
        .increment(1),
    }
}

/// Builder for [`GenerationService`].
#[derive(Debug, Default)]
pub struct GenerationServiceBuilder {
    gateway: Option<Arc<ModelGateway>>,
    cache: CacheConfig,
}

impl GenerationServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this gateway for inference.
    pub fn gateway(mut self, gateway: Arc<ModelGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Configure the result cache.
    pub fn cache(mut self, config: CacheConfig) -> Self {
        self.cache = config;
        self
    }

    /// Build the service. Fails if no gateway was supplied.
    pub fn build(self) -> Result<GenerationService> {
        let gateway = self.gateway.ok_or_else(|| {
            PenwrightError::Configuration("no model gateway configured".to_string())
        })?;
        Ok(GenerationService::new(gateway, &self.cache))
    }
}
