//! The secret record handed out by backends and held by the cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::SecretContent;
use crate::errors::{Error, Result};

/// Permission bits used when a secret does not carry its own mode.
pub const DEFAULT_MODE: u32 = 0o440;

/// One named secret with its content and file attributes.
///
/// The cache only looks at `name`; everything else is payload that is
/// stored and returned verbatim. A stored `Secret` is never mutated, only
/// replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    /// Unique secret name, also the cache key
    pub name: String,

    /// Decoded secret bytes
    #[serde(rename = "secret")]
    pub content: SecretContent,

    /// Content length as reported by the backend
    #[serde(rename = "secretLength", default)]
    pub length: u64,

    /// When the secret was created on the backend
    #[serde(rename = "creationDate", default)]
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub is_versioned: bool,

    /// Octal permission string such as `0400`; empty means [`DEFAULT_MODE`]
    #[serde(default)]
    pub mode: String,

    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub group: String,
}

impl Secret {
    /// Create a secret with the given name and content and default attributes.
    pub fn new(name: impl Into<String>, content: impl Into<SecretContent>) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            length: content.len() as u64,
            content,
            created_at: Utc::now(),
            is_versioned: false,
            mode: String::new(),
            owner: String::new(),
            group: String::new(),
        }
    }

    /// Set the octal mode string.
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    /// Set owner and group.
    pub fn with_ownership(mut self, owner: impl Into<String>, group: impl Into<String>) -> Self {
        self.owner = owner.into();
        self.group = group.into();
        self
    }

    /// Decode a single secret from backend JSON.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Permission bits for this secret.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSecret`] if `mode` is not an octal number.
    pub fn mode_value(&self) -> Result<u32> {
        if self.mode.is_empty() {
            return Ok(DEFAULT_MODE);
        }

        u32::from_str_radix(&self.mode, 8)
            .map(|mode| mode & 0o777)
            .map_err(|e| Error::invalid_secret(&self.name, format!("mode '{}' is not octal: {}", self.mode, e)))
    }
}

/// Decode a secret listing from backend JSON.
pub fn parse_secret_list(data: &[u8]) -> Result<Vec<Secret>> {
    Ok(serde_json::from_slice(data)?)
}
