//! In-memory memoization for expensive derived values.
//!
//! Entries are keyed by name and guarded by a structural checksum of the
//! inputs plus a time-to-live. The cache holds no global state; whoever
//! owns derived data owns its cache instance.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use log::debug;
use serde::Serialize;

use crate::errors::Result;

/// Time source for entry staleness, injectable so tests can advance it.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time source used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry<T> {
    checksum: u64,
    stored_at: Instant,
    value: T,
}

/// Concurrent memo store for derived values.
///
/// An entry is reused only while the caller's input serializes to the same
/// checksum and the entry is younger than the supplied TTL. The checksum
/// is a structural fingerprint, not a cryptographic digest; a collision
/// can only extend a stale value until the TTL expires it.
pub struct ComputeCache<T> {
    entries: DashMap<String, CacheEntry<T>>,
    clock: Arc<dyn Clock>,
}

impl<T: Clone> ComputeCache<T> {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Returns the cached value for `key` when `input` matches the stored
    /// checksum and the entry is fresh, otherwise runs `compute` and
    /// stores its result.
    pub fn get_or_compute<I, F>(&self, key: &str, input: &I, ttl: Duration, compute: F) -> Result<T>
    where
        I: Serialize + ?Sized,
        F: FnOnce() -> Result<T>,
    {
        let checksum = checksum(input)?;
        let now = self.clock.now();

        if let Some(entry) = self.entries.get(key) {
            let fresh = now.saturating_duration_since(entry.stored_at) <= ttl;
            if fresh && entry.checksum == checksum {
                debug!("Cache hit for '{}'", key);
                return Ok(entry.value.clone());
            }
        }

        debug!("Cache miss for '{}', recomputing", key);
        let value = compute()?;
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                checksum,
                stored_at: now,
                value: value.clone(),
            },
        );
        Ok(value)
    }

    /// Drops entries whose key contains `pattern`; every entry when `None`.
    pub fn clear(&self, pattern: Option<&str>) {
        match pattern {
            Some(pattern) => self.entries.retain(|key, _| !key.contains(pattern)),
            None => self.entries.clear(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone> Default for ComputeCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural fingerprint of a serializable input.
fn checksum<I: Serialize + ?Sized>(input: &I) -> Result<u64> {
    let bytes = serde_json::to_vec(input)?;
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    Ok(hasher.finish())
}
