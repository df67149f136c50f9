//! API key guard

use crate::error::{Error, Result};
use axum::http::{HeaderMap, HeaderName};
use std::fmt;
use tracing::debug;

/// Header carrying the client credential unless configured otherwise
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

/// Validates the credential header against the process-wide API key
#[derive(Clone)]
pub struct ApiKeyGuard {
    header: HeaderName,
    expected: String,
}

impl ApiKeyGuard {
    /// Create a guard expecting `api_key` in the named header
    pub fn new(header_name: &str, api_key: impl Into<String>) -> Result<Self> {
        let header = HeaderName::try_from(header_name)
            .map_err(|e| Error::invalid_value("api_key_header", e.to_string()))?;

        let expected = api_key.into();
        if expected.is_empty() {
            return Err(Error::invalid_value("api_key", "must not be empty"));
        }

        Ok(Self { header, expected })
    }

    /// Create a guard using the default `x-api-key` header
    pub fn with_default_header(api_key: impl Into<String>) -> Result<Self> {
        Self::new(DEFAULT_API_KEY_HEADER, api_key)
    }

    /// Header the credential is read from
    pub fn header_name(&self) -> &HeaderName {
        &self.header
    }

    /// Check request headers, failing with `Unauthorized` on a missing or
    /// mismatched credential
    pub fn check(&self, headers: &HeaderMap) -> Result<()> {
        let Some(value) = headers.get(&self.header) else {
            debug!(header = %self.header, "Request missing API key header");
            return Err(Error::unauthorized("missing API key"));
        };

        if constant_time_eq(value.as_bytes(), self.expected.as_bytes()) {
            Ok(())
        } else {
            debug!(header = %self.header, "Request carried a mismatched API key");
            Err(Error::unauthorized("invalid API key"))
        }
    }
}

impl fmt::Debug for ApiKeyGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyGuard")
            .field("header", &self.header)
            .field("expected", &mask_secret(&self.expected))
            .finish()
    }
}

/// Compare without short-circuiting on the first differing byte
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Mask a secret for logging, keeping at most the first two characters
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= 4 {
        return "****".to_string();
    }
    let visible: String = secret.chars().take(2).collect();
    format!("{visible}****")
}
