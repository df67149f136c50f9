//! Feed client with retry
//!
//! Provides an HTTP client for the paginated sensor feed that handles:
//! - Credential header and cursor query parameter on every request
//! - Automatic retries with exponential backoff
//! - Walking all pages by following `next_cursor`

use crate::auth::DEFAULT_API_KEY_HEADER;
use crate::error::{is_retryable_status, Error, Result};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Configuration for the feed client
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// Full URL of the paginated endpoint
    pub url: String,
    /// API key sent with every request
    pub api_key: Option<String>,
    /// Header carrying the API key
    pub api_key_header: String,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries per page
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for FeedClientConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080/sensor-data".to_string(),
            api_key: None,
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            user_agent: format!("sensor-feed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FeedClientConfig {
    /// Create a new config builder
    pub fn builder() -> FeedClientConfigBuilder {
        FeedClientConfigBuilder::default()
    }
}

/// Builder for feed client config
#[derive(Default)]
pub struct FeedClientConfigBuilder {
    config: FeedClientConfig,
}

impl FeedClientConfigBuilder {
    /// Set the endpoint URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Set the header the API key is sent in
    pub fn api_key_header(mut self, header: impl Into<String>) -> Self {
        self.config.api_key_header = header.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff bounds
    pub fn backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Build the config
    pub fn build(self) -> FeedClientConfig {
        self.config
    }
}

/// One page as returned by the server
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedPage {
    /// Records on this page
    pub results: Vec<Value>,
    /// Cursor for the next page, absent on the last page
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Outcome of walking the feed
#[derive(Debug, Clone, Default)]
pub struct CrawlResult {
    /// All records fetched, in order
    pub records: Vec<Value>,
    /// Number of pages fetched
    pub pages: u32,
    /// False when the page limit stopped the walk before the last page
    pub complete: bool,
}

/// HTTP client for the paginated feed
pub struct FeedClient {
    client: Client,
    endpoint: Url,
    config: FeedClientConfig,
}

impl FeedClient {
    /// Create a new feed client
    pub fn new(config: FeedClientConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.url)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    /// Endpoint this client reads from
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// URL for the page addressed by `cursor`
    pub fn page_url(&self, cursor: Option<&str>) -> Url {
        let mut url = self.endpoint.clone();
        if let Some(cursor) = cursor {
            url.query_pairs_mut().append_pair("cursor", cursor);
        }
        url
    }

    /// Fetch a single page
    pub async fn fetch_page(&self, cursor: Option<&str>) -> Result<FeedPage> {
        let response = self.request(self.page_url(cursor)).await?;
        let page: FeedPage = response.json().await?;
        Ok(page)
    }

    /// Fetch every page, following `next_cursor` until it is absent or
    /// `max_pages` pages have been read
    pub async fn fetch_all(&self, max_pages: u32) -> Result<CrawlResult> {
        let mut result = CrawlResult::default();
        let mut cursor: Option<String> = None;

        loop {
            if result.pages >= max_pages {
                warn!(
                    "Hit page limit of {}, stopping with {} records",
                    max_pages,
                    result.records.len()
                );
                return Ok(result);
            }

            let page = self.fetch_page(cursor.as_deref()).await?;
            result.pages += 1;
            debug!(
                "Page {} returned {} records, next_cursor: {:?}",
                result.pages,
                page.results.len(),
                page.next_cursor
            );
            result.records.extend(page.results);

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        result.complete = true;
        info!(
            "Fetched {} records from {} pages",
            result.records.len(),
            result.pages
        );
        Ok(result)
    }

    /// Send a GET with retries
    async fn request(&self, url: Url) -> Result<Response> {
        let max_retries = self.config.max_retries;
        let mut last_error = None;
        let mut attempt = 0;

        while attempt <= max_retries {
            let mut req = self.client.get(url.clone());
            if let Some(ref key) = self.config.api_key {
                req = req.header(self.config.api_key_header.as_str(), key.as_str());
            }

            match req.send().await {
                Ok(response) => {
                    let status = response.status();

                    if is_retryable_status(status.as_u16()) && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "Request failed with {}, attempt {}/{}, retrying in {:?}",
                            status.as_u16(),
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        last_error = Some(Error::http_status(status.as_u16(), ""));
                        continue;
                    }

                    if status.is_client_error() || status.is_server_error() {
                        let body = response.text().await.unwrap_or_default();
                        return Err(Error::http_status(status.as_u16(), body));
                    }

                    if status != StatusCode::OK {
                        debug!("Unexpected success status {} for {}", status, url);
                    }
                    return Ok(response);
                }
                Err(e) => {
                    let retryable = e.is_timeout() || e.is_connect();
                    if retryable && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "Request error ({}), attempt {}/{}, retrying in {:?}",
                            e,
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        last_error = Some(Error::Http(e));
                        continue;
                    }

                    if e.is_timeout() {
                        return Err(Error::Timeout {
                            timeout_ms: self.config.timeout.as_millis() as u64,
                        });
                    }
                    return Err(Error::Http(e));
                }
            }
        }

        Err(last_error.unwrap_or(Error::MaxRetriesExceeded { max_retries }))
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        let delay = self.config.initial_backoff.saturating_mul(factor);
        std::cmp::min(delay, self.config.max_backoff)
    }
}

impl std::fmt::Debug for FeedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("max_retries", &self.config.max_retries)
            .field("has_api_key", &self.config.api_key.is_some())
            .finish_non_exhaustive()
    }
}
