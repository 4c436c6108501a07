//! # secretfs
//!
//! The in-memory caching layer of a secrets-delivery client. It sits
//! between a filesystem-facing consumer and a remote secrets backend and
//! decides, for every lookup, whether to trust the backend's live answer,
//! fall back to a previously observed value, or report absence.
//!
//! ## Architecture
//!
//! ```text
//! read/list syscalls → SecretCache → SecretBackend (bounded wait) → remote service
//!                          ↓
//!                 name → (Secret, observed_at)
//! ```
//!
//! ## Core Components
//!
//! - **SecretCache**: freshness short-circuit, deadline-bounded backend
//!   calls, stale fallback, atomic list replacement
//! - **SecretBackend**: two-method capability implemented by the network client
//! - **Timeouts / CacheConfig**: timing policy, loadable from the environment
//! - **Observability**: `tracing` spans tagged with the mount point, `metrics` counters
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use secretfs::{CacheConfig, SecretCache};
//!
//! let config = CacheConfig::from_env()?;
//! secretfs::observability::init_logging(&config.logging);
//!
//! let cache = SecretCache::new(Arc::new(client), config.timeouts.timeouts(), config.logging);
//! let listing = cache.secret_list().await;
//! let secret = cache.secret("db-password").await;
//! ```

pub mod config;
pub mod errors;
pub mod observability;
pub mod secrets;

// Re-export commonly used types and traits
pub use config::{CacheConfig, LogConfig, TimeoutsConfig};
pub use errors::{Error, Result};
pub use secrets::{
    parse_secret_list, Secret, SecretBackend, SecretCache, SecretContent, Timeouts,
};

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
