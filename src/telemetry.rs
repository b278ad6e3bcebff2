//! Telemetry metric name constants.
//!
//! Centralised metric names for penwright operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `penwright_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `status` - outcome: "ok" or "error"
//! - `kind` - [`ErrorKind`](crate::ErrorKind) name, on error outcomes only

/// Total `generate` calls, cache hits included.
///
/// Labels: `status` ("ok" | "error"), `kind` (errors only).
pub const GENERATIONS_TOTAL: &str = "penwright_generations_total";

/// Model inference duration in seconds. Cache hits are not recorded.
pub const GENERATION_DURATION_SECONDS: &str = "penwright_generation_duration_seconds";

/// Total generation cache hits.
pub const CACHE_HITS_TOTAL: &str = "penwright_cache_hits_total";

/// Total generation cache misses.
pub const CACHE_MISSES_TOTAL: &str = "penwright_cache_misses_total";

/// Total entries evicted from the generation cache.
pub const CACHE_EVICTIONS_TOTAL: &str = "penwright_cache_evictions_total";

/// Total voice capture attempts.
///
/// Labels: `status` ("ok" | "error"), `kind` (errors only).
pub const VOICE_CAPTURES_TOTAL: &str = "penwright_voice_captures_total";
