//! Secure types for handling secret payloads.
//!
//! Secret content must never reach a log line or a `{:?}` dump, so it is
//! wrapped in a type that redacts itself and scrubs its memory on drop.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Raw secret bytes that redact themselves in Debug and Display.
///
/// On the wire the content travels as standard base64; in memory it is the
/// decoded bytes. The buffer is zeroed when the value is dropped.
///
/// # Security
///
/// - Debug output shows `SecretContent([REDACTED])`
/// - Display output shows `[REDACTED]`
/// - The bytes are only reachable through [`SecretContent::expose`]
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretContent(Vec<u8>);

impl SecretContent {
    /// Creates a new SecretContent from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Exposes the underlying bytes.
    ///
    /// Only the filesystem layer serving a read should need this.
    /// Never log the result.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the content and returns the inner bytes.
    pub fn into_inner(mut self) -> Vec<u8> {
        std::mem::take(&mut self.0)
    }

    /// Returns the length of the content without exposing it.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SecretContent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for SecretContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let bytes = STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| serde::de::Error::custom(format!("secret content is not base64: {}", e)))?;
        Ok(SecretContent(bytes))
    }
}

impl fmt::Debug for SecretContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretContent([REDACTED])")
    }
}

impl fmt::Display for SecretContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl From<Vec<u8>> for SecretContent {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&str> for SecretContent {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl Default for SecretContent {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
