//! Caching subsystem.
//!
//! - [`GenerationCache`] - bounded memo of generation results keyed on the
//!   full validated request, owned by the
//!   [`GenerationService`](crate::GenerationService). See [`generation`]
//!   module docs for the eviction and locking rules.

pub mod generation;

pub use generation::{CacheConfig, DEFAULT_MAX_ENTRIES, GenerationCache};
