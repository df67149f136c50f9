//! HTTP client module
//!
//! Client for a remote `/sensor-data` endpoint.
//!
//! # Features
//!
//! - **Cursor Walking**: Follows `next_cursor` until the server signals the end
//! - **Automatic Retries**: Exponential backoff on 429, 5xx, timeouts and connect errors
//! - **Page Limit**: Stops after a configurable number of pages

mod client;

pub use client::{CrawlResult, FeedClient, FeedClientConfig, FeedClientConfigBuilder, FeedPage};
