//! # Observability Infrastructure
//!
//! Structured logging and metrics at the cache boundary.

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::{CacheMetrics, LookupOutcome};
