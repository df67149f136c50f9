//! Authentication module
//!
//! Static API-key check for inbound requests.
//!
//! The `ApiKeyGuard` is built once from configuration and shared, read-only,
//! across all request handlers.

mod guard;

pub use guard::{mask_secret, ApiKeyGuard, DEFAULT_API_KEY_HEADER};
