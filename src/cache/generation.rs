//! Bounded memo of generation results.
//!
//! [`GenerationCache`] maps a validated [`GenerationRequest`] (compared by
//! value on all three fields) to the [`GenerationResult`] it produced.
//!
//! # Eviction
//!
//! Oldest insertion first. When a new key arrives at a full cache, the single
//! entry with the lowest insertion sequence is dropped before the new one
//! goes in. Hits never promote an entry, so a popular key still ages out.
//!
//! # Concurrency
//!
//! Every `get`/`put` takes one short `Mutex` scope over the map and its
//! insertion queue. Nothing awaits while the lock is held, so the lock is
//! never held across a model call.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::telemetry;
use crate::types::{GenerationRequest, GenerationResult};

/// Default maximum number of cached results.
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Configuration for the generation cache.
///
/// ```rust
/// # use penwright::CacheConfig;
/// let config = CacheConfig::new().max_entries(20);
/// assert_eq!(config.max_entries, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of cached results. `0` disables caching. Default: 100.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached results.
    pub fn max_entries(mut self, n: usize) -> Self {
        self.max_entries = n;
        self
    }
}

#[derive(Debug)]
struct CacheEntry {
    value: GenerationResult,
    insertion_order: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<GenerationRequest, CacheEntry>,
    /// Keys oldest-first, paired with their insertion sequence.
    order: VecDeque<(u64, GenerationRequest)>,
    next_seq: u64,
}

impl CacheState {
    fn evict_oldest(&mut self) -> Option<GenerationRequest> {
        while let Some((seq, key)) = self.order.pop_front() {
            // Entries are never updated in place, but skip stale queue slots anyway.
            if self
                .entries
                .get(&key)
                .is_some_and(|entry| entry.insertion_order == seq)
            {
                self.entries.remove(&key);
                return Some(key);
            }
        }
        None
    }
}

/// Thread-safe, bounded, insertion-ordered result cache.
#[derive(Debug)]
pub struct GenerationCache {
    state: Mutex<CacheState>,
    max_entries: usize,
}

impl GenerationCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            max_entries: config.max_entries,
        }
    }

    /// Cache with the default bound (100 entries).
    pub fn with_defaults() -> Self {
        Self::new(&CacheConfig::default())
    }

    /// The configured bound.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Look up a result. Never evicts, never reorders.
    ///
    /// Emits cache hit/miss metrics.
    pub fn get(&self, key: &GenerationRequest) -> Option<GenerationResult> {
        let hit = self.lock().entries.get(key).map(|entry| entry.value.clone());
        if hit.is_some() {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
        } else {
            metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
        }
        hit
    }

    /// Insert a result unless `key` is already present (first writer wins).
    ///
    /// Returns `true` if the value was stored.
    pub fn put(&self, key: GenerationRequest, value: GenerationResult) -> bool {
        if self.max_entries == 0 {
            return false;
        }

        let mut state = self.lock();
        if state.entries.contains_key(&key) {
            return false;
        }

        if state.entries.len() >= self.max_entries
            && let Some(evicted) = state.evict_oldest()
        {
            debug!(topic = evicted.topic(), "evicted oldest cache entry");
            metrics::counter!(telemetry::CACHE_EVICTIONS_TOTAL).increment(1);
        }

        let seq = state.next_seq;
        state.next_seq += 1;
        state.order.push_back((seq, key.clone()));
        state.entries.insert(
            key,
            CacheEntry {
                value,
                insertion_order: seq,
            },
        );
        true
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.order.clear();
    }

    // State is consistent after every mutation, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for GenerationCache {
    fn default() -> Self {
        Self::with_defaults()
    }
}
