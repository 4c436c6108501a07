//! Freshness window and backend deadlines.

use std::time::Duration;

/// Default freshness window for cached entries
pub const DEFAULT_FRESH_THRESHOLD: Duration = Duration::from_secs(1);

/// Default deadline for a single secret fetch
pub const DEFAULT_SECRET_FETCH_TIMEOUT: Duration = Duration::from_millis(500);

/// Default deadline for a secret list fetch
pub const DEFAULT_SECRET_LIST_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Timing policy applied by [`SecretCache`](super::SecretCache).
///
/// Fixed at construction and shared read-only by every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// How long a cached entry is trusted without asking the backend
    pub fresh_threshold: Duration,

    /// Deadline for `fetch_secret`
    pub secret_fetch_timeout: Duration,

    /// Deadline for `fetch_secret_list`
    pub secret_list_fetch_timeout: Duration,
}

impl Timeouts {
    pub fn new(
        fresh_threshold: Duration,
        secret_fetch_timeout: Duration,
        secret_list_fetch_timeout: Duration,
    ) -> Self {
        Self { fresh_threshold, secret_fetch_timeout, secret_list_fetch_timeout }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::new(
            DEFAULT_FRESH_THRESHOLD,
            DEFAULT_SECRET_FETCH_TIMEOUT,
            DEFAULT_SECRET_LIST_FETCH_TIMEOUT,
        )
    }
}
