// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # sensor-feed
//!
//! A read-only JSON feed of sensor records, paginated with opaque cursors.
//!
//! ## Features
//!
//! - **Opaque Cursors**: Offsets travel as base-62 tokens over `0-9a-zA-Z`
//! - **Stateless Pagination**: Every page is a pure function of cursor and dataset
//! - **API Key Guard**: Static credential checked on every request
//! - **Snapshot Datasets**: Loaded once or re-read per request, never mutated
//! - **Feed Client**: Walks a remote feed by following `next_cursor`
//! - **Reading Transform**: Normalizes crawled readings to UTC and flags anomalies
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sensor_feed::pagination::Paginator;
//!
//! let records: Vec<serde_json::Value> = load_records();
//! let paginator = Paginator::default();
//!
//! let mut cursor: Option<String> = None;
//! loop {
//!     let page = paginator.get_page(cursor.as_deref(), &records)?;
//!     handle(page.results);
//!     match page.next_cursor {
//!         Some(next) => cursor = Some(next.into_inner()),
//!         None => break,
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! GET /sensor-data?cursor=…
//!          │
//!  ┌───────┴───────┐   403
//!  │ ApiKeyGuard   │──────▶
//!  └───────┬───────┘
//!  ┌───────┴───────┐   400
//!  │ cursor decode │──────▶
//!  └───────┬───────┘
//!  ┌───────┴───────┐        ┌──────────────┐
//!  │ Paginator     │◀───────│ DatasetStore │
//!  └───────┬───────┘        └──────────────┘
//!          ▼
//!  {"results": [...], "next_cursor": "…" | null}
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Base-62 cursor codec
pub mod cursor;

/// Cursor-based pagination
pub mod pagination;

/// API key authentication
pub mod auth;

/// Dataset loading and snapshots
pub mod dataset;

/// HTTP client for remote feeds
pub mod http;

/// Typed sensor readings and the crawl transform
pub mod reading;

/// Server configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

pub use cursor::{Cursor, CursorError, Offset};
pub use pagination::{Page, Paginator, PAGE_SIZE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
