//! Pagination types

use crate::cursor::Cursor;
use serde::Serialize;

/// Default number of records per page
pub const PAGE_SIZE: usize = 100;

/// One page of records and the cursor for the next request
///
/// Serializes to `{"results": [...], "next_cursor": "..." | null}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    /// Records in dataset order
    pub results: &'a [T],
    /// Cursor for the next page, absent on the last page
    pub next_cursor: Option<Cursor>,
}

impl<'a, T> Page<'a, T> {
    /// Create an empty page with no continuation
    pub fn empty() -> Self {
        Self {
            results: &[],
            next_cursor: None,
        }
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if the page holds no records
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Check if this is the final page
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}
