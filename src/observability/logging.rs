//! # Structured Logging
//!
//! Provides the span macro used at the cache boundary and the subscriber
//! setup for processes embedding the cache.
//!
//! Every cache operation runs inside a `secret_cache` span carrying the
//! operation name and the mount point, so log lines from several mounts in
//! one process can be told apart.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::LogConfig;

/// Create a tracing span for a cache operation.
///
/// ```rust,ignore
/// let span = cache_span!("secret", "/mnt/secrets", secret = %name);
/// ```
#[macro_export]
macro_rules! cache_span {
    ($operation:expr, $mountpoint:expr) => {
        tracing::info_span!(
            "secret_cache",
            operation = %$operation,
            mountpoint = %$mountpoint
        )
    };
    ($operation:expr, $mountpoint:expr, $($field:tt)*) => {
        tracing::info_span!(
            "secret_cache",
            operation = %$operation,
            mountpoint = %$mountpoint,
            $($field)*
        )
    };
}

/// Default filter directive for the given logging configuration.
///
/// `RUST_LOG`, when set, takes precedence over this.
pub fn default_directive(config: &LogConfig) -> &'static str {
    if config.debug {
        "debug"
    } else {
        "info"
    }
}

/// Install a global fmt subscriber honouring the debug and JSON flags.
///
/// Installing twice is harmless; the first subscriber wins.
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let installed = if config.json_logging {
        tracing::subscriber::set_global_default(
            FmtSubscriber::builder().json().with_env_filter(filter).finish(),
        )
    } else {
        tracing::subscriber::set_global_default(
            FmtSubscriber::builder().with_env_filter(filter).finish(),
        )
    };

    if installed.is_err() {
        // Subscriber already set elsewhere (e.g. tests); ignore.
        return;
    }

    tracing::info!(
        mountpoint = %config.mountpoint,
        debug = config.debug,
        json = config.json_logging,
        "Logging initialized"
    );
}
