//! Secret cache sitting between the filesystem layer and a backend.
//!
//! Every lookup decides between three answers: the backend's live value, a
//! previously observed value, or absence. The backend is never trusted to
//! return promptly; each call runs on its own task and is raced against a
//! deadline, and the map lock is never held while that race is in flight.
//!
//! # Entry states
//!
//! - present and fresh: served directly, the backend is not contacted
//! - present and stale: the backend is asked; on failure the stale value
//!   is served and kept
//! - absent: the backend is asked; on failure the lookup reports absence
//!
//! # Late answers
//!
//! A backend call that misses its deadline is detached, not aborted. Its
//! eventual result is discarded and never written to the map, so it cannot
//! surface to a later caller or race a concurrent reader.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, info, warn, Instrument};

use super::backend::SecretBackend;
use super::secret::Secret;
use super::timeouts::Timeouts;
use crate::cache_span;
use crate::config::LogConfig;
use crate::observability::{CacheMetrics, LookupOutcome};

const OP_SECRET: &str = "secret";
const OP_SECRET_LIST: &str = "secret_list";

/// Cached secret with the time it was last observed.
#[derive(Debug, Clone)]
struct CacheEntry {
    secret: Secret,
    observed_at: Instant,
}

impl CacheEntry {
    fn new(secret: Secret) -> Self {
        Self { secret, observed_at: Instant::now() }
    }

    fn is_fresh(&self, threshold: Duration) -> bool {
        self.observed_at.elapsed() < threshold
    }
}

/// In-memory secret cache with bounded backend waits and stale fallback.
///
/// Clones share the same map. Separate instances built with `new` are
/// fully independent.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use secretfs::{LogConfig, SecretCache, Timeouts};
///
/// let cache = SecretCache::new(Arc::new(client), Timeouts::default(), LogConfig::default());
///
/// if let Some(secret) = cache.secret("db-password").await {
///     serve(secret.content.expose());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SecretCache {
    backend: Arc<dyn SecretBackend>,
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    timeouts: Timeouts,
    log_config: LogConfig,
    metrics: CacheMetrics,
}

impl SecretCache {
    /// Create an empty cache over the given backend.
    pub fn new(backend: Arc<dyn SecretBackend>, timeouts: Timeouts, log_config: LogConfig) -> Self {
        debug!(
            mountpoint = %log_config.mountpoint,
            fresh_threshold_ms = timeouts.fresh_threshold.as_millis() as u64,
            secret_fetch_timeout_ms = timeouts.secret_fetch_timeout.as_millis() as u64,
            secret_list_fetch_timeout_ms = timeouts.secret_list_fetch_timeout.as_millis() as u64,
            "Created secret cache"
        );

        let metrics = CacheMetrics::new(&log_config.mountpoint);
        metrics.describe();
        metrics.set_entries(0);

        Self {
            backend,
            entries: Arc::new(RwLock::new(HashMap::new())),
            timeouts,
            log_config,
            metrics,
        }
    }

    /// Look up a secret by name.
    ///
    /// A fresh entry is returned without contacting the backend. Otherwise
    /// the backend is asked under the secret fetch deadline; its answer
    /// replaces any cached entry. If it fails or misses the deadline, the
    /// cached entry (of any age) is returned, or `None` if there is none.
    pub async fn secret(&self, name: &str) -> Option<Secret> {
        let span = cache_span!(OP_SECRET, self.log_config.mountpoint, secret = %name);

        async move {
            if let Some(secret) = self.fresh_entry(name).await {
                debug!("Cache hit for fresh secret");
                self.metrics.record_lookup(LookupOutcome::Fresh);
                return Some(secret);
            }

            let backend = Arc::clone(&self.backend);
            let requested = name.to_string();
            let answer = self
                .with_deadline(OP_SECRET, self.timeouts.secret_fetch_timeout, async move {
                    backend.fetch_secret(&requested).await
                })
                .await;

            match answer {
                Some(secret) if secret.name == name => {
                    self.insert(secret.clone()).await;
                    debug!("Stored secret from backend");
                    self.metrics.record_lookup(LookupOutcome::Backend);
                    Some(secret)
                }
                Some(secret) => {
                    warn!(returned = %secret.name, "Backend answered with a different secret, ignoring");
                    self.metrics.record_backend_failure(OP_SECRET);
                    self.fallback(name).await
                }
                None => self.fallback(name).await,
            }
        }
        .instrument(span)
        .await
    }

    /// List secrets.
    ///
    /// The backend is always asked first, under the list fetch deadline.
    /// A successful listing atomically replaces the whole cache. On
    /// failure or timeout the current cache contents are returned unchanged,
    /// in no particular order.
    pub async fn secret_list(&self) -> Vec<Secret> {
        let span = cache_span!(OP_SECRET_LIST, self.log_config.mountpoint);

        async move {
            let backend = Arc::clone(&self.backend);
            let answer = self
                .with_deadline(OP_SECRET_LIST, self.timeouts.secret_list_fetch_timeout, async move {
                    backend.fetch_secret_list().await
                })
                .await;

            match answer {
                Some(secrets) => {
                    let replacement: HashMap<String, CacheEntry> = secrets
                        .iter()
                        .map(|secret| (secret.name.clone(), CacheEntry::new(secret.clone())))
                        .collect();

                    let count = {
                        let mut entries = self.entries.write().await;
                        *entries = replacement;
                        self.metrics.set_entries(entries.len());
                        entries.len()
                    };

                    info!(count, "Replaced cache contents from backend listing");
                    self.metrics.record_list(true);
                    secrets
                }
                None => {
                    let secrets: Vec<Secret> = {
                        let entries = self.entries.read().await;
                        entries.values().map(|entry| entry.secret.clone()).collect()
                    };

                    warn!(count = secrets.len(), "Serving secret listing from cache");
                    self.metrics.record_list(false);
                    secrets
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Insert or overwrite the entry for `secret.name` without contacting
    /// the backend.
    pub async fn add(&self, secret: Secret) {
        let span = cache_span!("add", self.log_config.mountpoint, secret = %secret.name);
        async move {
            self.insert(secret).await;
            debug!("Seeded secret into cache");
        }
        .instrument(span)
        .await
    }

    /// Remove every entry.
    pub async fn clear(&self) {
        let span = cache_span!("clear", self.log_config.mountpoint);
        async move {
            let count = {
                let mut entries = self.entries.write().await;
                let count = entries.len();
                entries.clear();
                self.metrics.set_entries(0);
                count
            };
            debug!(count, "Cleared secret cache");
        }
        .instrument(span)
        .await
    }

    /// Number of cached entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Timing policy this cache was built with.
    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    /// Logging configuration this cache was built with.
    pub fn log_config(&self) -> &LogConfig {
        &self.log_config
    }

    async fn fresh_entry(&self, name: &str) -> Option<Secret> {
        let entries = self.entries.read().await;
        entries
            .get(name)
            .filter(|entry| entry.is_fresh(self.timeouts.fresh_threshold))
            .map(|entry| entry.secret.clone())
    }

    async fn fallback(&self, name: &str) -> Option<Secret> {
        let cached = {
            let entries = self.entries.read().await;
            entries.get(name).map(|entry| (entry.secret.clone(), entry.observed_at.elapsed()))
        };

        match cached {
            Some((secret, age)) => {
                warn!(age_ms = age.as_millis() as u64, "Serving cached secret after backend failure");
                self.metrics.record_lookup(LookupOutcome::Fallback);
                Some(secret)
            }
            None => {
                debug!("Secret unavailable from backend and cache");
                self.metrics.record_lookup(LookupOutcome::Miss);
                None
            }
        }
    }

    async fn insert(&self, secret: Secret) {
        let mut entries = self.entries.write().await;
        entries.insert(secret.name.clone(), CacheEntry::new(secret));
        self.metrics.set_entries(entries.len());
    }

    /// Run a backend call on its own task and wait for it at most `deadline`.
    ///
    /// `None` covers a backend refusal, a panicked task and a missed
    /// deadline. A call that misses the deadline keeps running detached and
    /// its result is dropped.
    async fn with_deadline<T, F>(&self, operation: &'static str, deadline: Duration, call: F) -> Option<T>
    where
        F: Future<Output = Option<T>> + Send + 'static,
        T: Send + 'static,
    {
        let started = Instant::now();
        let handle = tokio::spawn(call);

        match tokio::time::timeout(deadline, handle).await {
            Ok(Ok(Some(value))) => {
                debug!(
                    operation,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Backend answered"
                );
                Some(value)
            }
            Ok(Ok(None)) => {
                debug!(operation, "Backend had no usable answer");
                self.metrics.record_backend_failure(operation);
                None
            }
            Ok(Err(join_error)) => {
                warn!(operation, error = %join_error, "Backend call failed");
                self.metrics.record_backend_failure(operation);
                None
            }
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = deadline.as_millis() as u64,
                    "Backend call timed out, discarding any late answer"
                );
                self.metrics.record_backend_timeout(operation);
                None
            }
        }
    }
}
