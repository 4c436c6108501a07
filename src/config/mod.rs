//! # Configuration Management
//!
//! Timing policy and log attribution for a secretfs cache, loadable from
//! environment variables.

pub mod settings;

pub use settings::{CacheConfig, LogConfig, TimeoutsConfig};
