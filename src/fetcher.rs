//! robots.txt retrieval
//!
//! The rule engine never talks to the network directly. It asks a
//! [`Fetcher`] for the body of a robots.txt and treats any failure as a
//! missing file. [`HttpFetcher`] is the default, reqwest-backed
//! implementation; timeouts and redirects are its business.

use crate::config::FetcherConfig;
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Reasons a robots.txt body could not be retrieved
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Failed to read response body from {url}: {message}")]
    Body { url: String, message: String },
}

/// Retrieves the text body of a robots.txt resource
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url`, identifying as `user_agent`
    ///
    /// Anything other than a successful response with a readable body is
    /// an error.
    async fn fetch(&self, url: &Url, user_agent: &str) -> Result<String, FetchError>;
}

/// Builds the HTTP client used for robots.txt requests
///
/// # Arguments
///
/// * `config` - Timeouts for the client
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use robots_gate::config::FetcherConfig;
/// use robots_gate::fetcher::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches robots.txt over HTTP(S) with reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, user_agent: &str) -> Result<String, FetchError> {
        let mut request = self.client.get(url.clone());
        if !user_agent.is_empty() {
            request = request.header(USER_AGENT, user_agent);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!("Fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }
}

/// Maps a transport-level reqwest error to a [`FetchError`]
fn classify_error(url: &Url, error: &reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Network {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
