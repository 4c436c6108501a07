//! Common test utilities for all integration tests.
//!
//! Provides substitute secret backends and fixture loading.

#![allow(dead_code)]
#![allow(clippy::duplicate_mod)]

pub mod backends;

use std::time::Duration;

use secretfs::{LogConfig, Secret, Timeouts};

/// Timeouts used by most cache tests: never fresh, 10ms fetch, 20ms list.
pub fn test_timeouts() -> Timeouts {
    Timeouts::new(Duration::ZERO, Duration::from_millis(10), Duration::from_millis(20))
}

pub fn test_log_config() -> LogConfig {
    LogConfig::new(false, "/tmp/mnt")
}

/// Load and parse a JSON secret fixture from `tests/fixtures`.
pub fn fixture(name: &str) -> Secret {
    let data = std::fs::read(fixture_path(name)).expect("read fixture");
    Secret::parse(&data).expect("parse fixture")
}

pub fn fixture_bytes(name: &str) -> Vec<u8> {
    std::fs::read(fixture_path(name)).expect("read fixture")
}

fn fixture_path(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}
