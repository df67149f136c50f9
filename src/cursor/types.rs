//! Cursor types

use super::codec::{decode, encode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Zero-based index into the dataset at which a page begins
pub type Offset = u64;

/// Reasons a cursor string can be rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error("cursor is empty")]
    Empty,

    #[error("invalid character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("cursor length {len} exceeds maximum of {max}")]
    TooLong { len: usize, max: usize },

    #[error("cursor value is out of range")]
    Overflow,
}

/// An opaque pagination token
///
/// Holds the offset alongside its canonical encoding, so the token text sent
/// to clients is always what [`encode`] produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor {
    offset: Offset,
    token: String,
}

impl Cursor {
    /// Create a cursor pointing at `offset`
    pub fn from_offset(offset: Offset) -> Self {
        Self {
            offset,
            token: encode(offset),
        }
    }

    /// Offset this cursor points at
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Cursor text as sent to clients
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Consume the cursor, returning the token text
    pub fn into_inner(self) -> String {
        self.token
    }
}

impl FromStr for Cursor {
    type Err = CursorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s).map(Self::from_offset)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

impl AsRef<str> for Cursor {
    fn as_ref(&self) -> &str {
        &self.token
    }
}

impl From<Cursor> for String {
    fn from(cursor: Cursor) -> Self {
        cursor.token
    }
}

impl Serialize for Cursor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.token)
    }
}

impl<'de> Deserialize<'de> for Cursor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}
