//! CLI module
//!
//! Command-line interface for the sensor feed.
//!
//! # Commands
//!
//! - `serve` - Start the HTTP server
//! - `crawl` - Walk every page of a remote feed
//! - `cursor encode` / `cursor decode` - Inspect cursor tokens

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, CursorCommand};
pub use runner::Runner;
pub use server::{router, serve, AppState};
