//! Pagination module
//!
//! Cursor-based slicing of an in-memory dataset.
//!
//! # Overview
//!
//! A [`Paginator`] turns an optional client cursor into a [`Page`]: the
//! contiguous slice of the dataset starting at the decoded offset, plus the
//! cursor for the following request. When there is nothing after the page,
//! `next_cursor` is absent and the client stops.

mod service;
mod types;

pub use service::Paginator;
pub use types::{Page, PAGE_SIZE};
