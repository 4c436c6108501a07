//! Secret backend trait
//!
//! The narrow capability the cache consumes from the network client.

use async_trait::async_trait;

use super::secret::Secret;

/// Source of live secret data.
///
/// Both operations answer `None` when there is no usable answer. That
/// covers not-found, transport failures and authentication errors alike;
/// the cache only needs to know whether to trust the payload.
///
/// Implementations may take arbitrarily long or never complete. The cache
/// bounds every call with its own deadline and runs it on a separate task,
/// so implementations must be Send + Sync and must not rely on being
/// polled to completion.
#[async_trait]
pub trait SecretBackend: Send + Sync + std::fmt::Debug {
    /// Fetch one secret by name.
    async fn fetch_secret(&self, name: &str) -> Option<Secret>;

    /// Fetch every secret currently available to this client.
    async fn fetch_secret_list(&self) -> Option<Vec<Secret>>;
}
