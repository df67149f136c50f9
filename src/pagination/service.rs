//! Pagination service
//!
//! Stateless: a `Paginator` only carries its page size, and every call is a
//! pure function of the cursor and the dataset snapshot it is given.

use super::types::{Page, PAGE_SIZE};
use crate::cursor::{self, Cursor, Offset};
use crate::error::{Error, Result};
use std::num::NonZeroUsize;
use tracing::trace;

/// Slices a dataset into cursor-addressed pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: NonZeroUsize,
}

impl Paginator {
    /// Create a paginator with the given page size
    pub fn new(page_size: usize) -> Result<Self> {
        let page_size = NonZeroUsize::new(page_size)
            .ok_or_else(|| Error::invalid_value("page_size", "must be greater than zero"))?;
        Ok(Self { page_size })
    }

    /// Maximum number of records per page
    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Resolve the starting offset for a request
    ///
    /// An absent cursor starts at the first record. A present cursor must
    /// decode cleanly; it is never coerced to offset 0.
    pub fn start_offset(&self, cursor: Option<&str>) -> Result<Offset> {
        match cursor {
            None => Ok(0),
            Some(raw) => cursor::decode(raw).map_err(Error::InvalidCursor),
        }
    }

    /// Fetch the page addressed by `cursor`
    pub fn get_page<'a, T>(&self, cursor: Option<&str>, dataset: &'a [T]) -> Result<Page<'a, T>> {
        let start = self.start_offset(cursor)?;
        Ok(self.page_at(start, dataset))
    }

    /// Fetch the page starting at a decoded offset
    ///
    /// A start at or past the end yields an empty final page. The next cursor
    /// is issued only while `end < len`, so a dataset whose length is a
    /// multiple of the page size ends on a full page.
    pub fn page_at<'a, T>(&self, start: Offset, dataset: &'a [T]) -> Page<'a, T> {
        let len = dataset.len();
        let start = usize::try_from(start).unwrap_or(usize::MAX);
        let end = start.saturating_add(self.page_size());

        if start >= len {
            trace!(start, len, "Cursor points past the end of the dataset");
            return Page::empty();
        }

        let results = &dataset[start..end.min(len)];
        let next_cursor = (end < len).then(|| Cursor::from_offset(end as Offset));

        trace!(
            start,
            returned = results.len(),
            has_next = next_cursor.is_some(),
            "Computed page"
        );

        Page {
            results,
            next_cursor,
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page_size: NonZeroUsize::new(PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
        }
    }
}
