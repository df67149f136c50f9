//! CLI commands and argument parsing

use crate::auth::DEFAULT_API_KEY_HEADER;
use crate::config::ServerConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cursor-paginated sensor data feed
#[derive(Parser, Debug)]
#[command(name = "sensor-feed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServerConfig),

    /// Fetch every page from a running feed and print records as JSON lines
    Crawl {
        /// Endpoint URL
        #[arg(long, default_value = "http://localhost:8080/sensor-data")]
        url: String,

        /// API key to send
        #[arg(long, env = "API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Header carrying the API key
        #[arg(long, default_value = DEFAULT_API_KEY_HEADER)]
        api_key_header: String,

        /// Stop after this many pages
        #[arg(long, default_value = "100")]
        max_pages: u32,

        /// Write records to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit enriched readings (UTC timestamp, °F, alert flags) instead of raw records
        #[arg(long)]
        transform: bool,
    },

    /// Encode or decode cursor tokens
    Cursor {
        #[command(subcommand)]
        command: CursorCommand,
    },
}

/// Cursor utilities
#[derive(Subcommand, Debug)]
pub enum CursorCommand {
    /// Print the cursor for a dataset offset
    Encode {
        /// Zero-based offset
        offset: u64,
    },

    /// Print the dataset offset a cursor points at
    Decode {
        /// Cursor token
        cursor: String,
    },
}
