//! Secret cache and the backend capability it consumes.
//!
//! # Architecture
//!
//! ```text
//! filesystem layer ──► SecretCache ──(bounded wait)──► SecretBackend ──► remote service
//!                          │
//!                          └── name → (Secret, observed_at)
//! ```
//!
//! The [`SecretBackend`] trait is the only thing the cache knows about the
//! network client: fetch one secret, fetch the listing, each answering
//! `None` when there is nothing usable. Substitute backends (always
//! failing, never answering, channel driven) plug in the same way a real
//! client does.
//!
//! # Security Considerations
//!
//! - Secret content lives in [`SecretContent`], which redacts itself in
//!   Debug and Display output and zeroes its buffer on drop
//! - The cache never logs content, only names
//! - Nothing is persisted; the cache is rebuilt from backend answers and
//!   explicit seeding

pub mod backend;
pub mod cache;
pub mod secret;
pub mod timeouts;
pub mod types;

// Re-export main types
pub use backend::SecretBackend;
pub use cache::SecretCache;
pub use secret::{parse_secret_list, Secret, DEFAULT_MODE};
pub use timeouts::Timeouts;
pub use types::SecretContent;
