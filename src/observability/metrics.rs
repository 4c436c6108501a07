//! # Metrics Collection
//!
//! Counters and gauges for cache outcomes. Nothing is exported from here;
//! the embedding process installs whatever `metrics` recorder it uses, and
//! without one every call is a no-op.

use metrics::{counter, describe_counter, describe_gauge, gauge, Unit};

/// How a single secret lookup was answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Served from a fresh entry without contacting the backend
    Fresh,
    /// Served from a successful backend answer
    Backend,
    /// Served from a cached entry after the backend failed or timed out
    Fallback,
    /// Nothing to serve
    Miss,
}

impl LookupOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Backend => "backend",
            Self::Fallback => "fallback",
            Self::Miss => "miss",
        }
    }
}

/// Metrics recorder for one secret cache
///
/// Every series carries a `mountpoint` label so that several caches in one
/// process report separately.
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    mountpoint: String,
}

impl CacheMetrics {
    /// Create a recorder labelling its series with `mountpoint`
    pub fn new(mountpoint: &str) -> Self {
        Self { mountpoint: mountpoint.to_string() }
    }

    /// Register metric descriptions with the installed recorder
    pub fn describe(&self) {
        describe_counter!(
            "secretfs_cache_lookups_total",
            Unit::Count,
            "Secret lookups by outcome"
        );
        describe_counter!(
            "secretfs_backend_timeouts_total",
            Unit::Count,
            "Backend calls abandoned at their deadline"
        );
        describe_counter!(
            "secretfs_backend_failures_total",
            Unit::Count,
            "Backend calls that returned no usable answer"
        );
        describe_counter!(
            "secretfs_cache_list_total",
            Unit::Count,
            "Secret listings by source"
        );
        describe_gauge!("secretfs_cache_entries", Unit::Count, "Entries currently cached");
    }

    /// Record how a secret lookup was answered
    pub fn record_lookup(&self, outcome: LookupOutcome) {
        let labels =
            [("mountpoint", self.mountpoint.clone()), ("outcome", outcome.as_str().to_string())];
        counter!("secretfs_cache_lookups_total", &labels).increment(1);
    }

    /// Record a backend call that missed its deadline
    pub fn record_backend_timeout(&self, operation: &str) {
        let labels =
            [("mountpoint", self.mountpoint.clone()), ("operation", operation.to_string())];
        counter!("secretfs_backend_timeouts_total", &labels).increment(1);
    }

    /// Record a backend call that answered without a usable value
    pub fn record_backend_failure(&self, operation: &str) {
        let labels =
            [("mountpoint", self.mountpoint.clone()), ("operation", operation.to_string())];
        counter!("secretfs_backend_failures_total", &labels).increment(1);
    }

    /// Record whether a listing came from the backend or the cache
    pub fn record_list(&self, from_backend: bool) {
        let outcome = if from_backend { "backend" } else { "fallback" };
        let labels = [("mountpoint", self.mountpoint.clone()), ("outcome", outcome.to_string())];
        counter!("secretfs_cache_list_total", &labels).increment(1);
    }

    /// Update the cached entry gauge
    ///
    /// Callers hold the cache write lock so that updates land in the same
    /// order as the writes they describe.
    pub fn set_entries(&self, count: usize) {
        let labels = [("mountpoint", self.mountpoint.clone())];
        gauge!("secretfs_cache_entries", &labels).set(count as f64);
    }
}
