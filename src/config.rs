//! Server configuration
//!
//! Every setting can be given as a command-line flag or an environment
//! variable (a `.env` file is read at startup). The resolved values are
//! immutable for the lifetime of the process.

use crate::auth::{mask_secret, ApiKeyGuard, DEFAULT_API_KEY_HEADER};
use crate::dataset::ReloadPolicy;
use crate::error::{Error, Result};
use crate::pagination::{Paginator, PAGE_SIZE};
use clap::Args;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use tracing::info;

/// Default dataset location
pub const DEFAULT_DATA_FILE: &str = "data/sensor_data.json";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Settings for `serve`
#[derive(Args, Clone)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "LISTEN_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// JSON file holding the dataset (an array of records)
    #[arg(long, env = "DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Maximum records per page
    #[arg(long, env = "PAGE_SIZE", default_value_t = PAGE_SIZE)]
    pub page_size: usize,

    /// API key clients must present
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Header carrying the API key
    #[arg(long, env = "API_KEY_HEADER", default_value = DEFAULT_API_KEY_HEADER)]
    pub api_key_header: String,

    /// Re-read the dataset file on every request
    #[arg(long, env = "RELOAD_PER_REQUEST")]
    pub reload_per_request: bool,
}

impl ServerConfig {
    /// Create a config with defaults and the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            page_size: PAGE_SIZE,
            api_key: api_key.into(),
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            reload_per_request: false,
        }
    }

    /// Check the configuration before starting the server
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field("API_KEY"));
        }
        self.guard()?;
        self.paginator()?;
        Ok(())
    }

    /// Socket address to bind
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Dataset reload policy
    pub fn reload_policy(&self) -> ReloadPolicy {
        if self.reload_per_request {
            ReloadPolicy::PerRequest
        } else {
            ReloadPolicy::Once
        }
    }

    /// Build the credential guard
    pub fn guard(&self) -> Result<ApiKeyGuard> {
        ApiKeyGuard::new(&self.api_key_header, self.api_key.clone())
    }

    /// Build the paginator
    pub fn paginator(&self) -> Result<Paginator> {
        Paginator::new(self.page_size)
    }

    /// Log the loaded configuration with the API key masked
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  LISTEN             : {}", self.socket_addr());
        info!("  DATA_FILE          : {}", self.data_file.display());
        info!("  PAGE_SIZE          : {}", self.page_size);
        info!("  API_KEY_HEADER     : {}", self.api_key_header);
        info!("  API_KEY            : {}", mask_secret(&self.api_key));
        info!("  RELOAD_PER_REQUEST : {}", self.reload_per_request);
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("data_file", &self.data_file)
            .field("page_size", &self.page_size)
            .field("api_key", &mask_secret(&self.api_key))
            .field("api_key_header", &self.api_key_header)
            .field("reload_per_request", &self.reload_per_request)
            .finish()
    }
}
