//! Robots-Gate: a robots.txt pre-fetch gate for crawlers
//!
//! This crate decides whether a crawler may fetch a URL, based on the
//! `robots.txt` file published at the URL's origin. Rule sets are fetched
//! once per origin, parsed, and cached for the lifetime of the engine.
//!
//! # Example
//!
//! ```no_run
//! use robots_gate::RobotsTxt;
//!
//! # async fn example() -> robots_gate::Result<()> {
//! let mut robots = RobotsTxt::with_http_fetcher()?;
//! robots.set_user_agent("RobotsGate/1.0");
//!
//! if robots.is_allowed("https://www.example.com/some/page").await? {
//!     println!("Go ahead");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod fetcher;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for Robots-Gate operations
#[derive(Debug, Error)]
pub enum RobotsError {
    #[error("Unable to retrieve robots.txt file for URL: {url}")]
    MissingRobotsTxt {
        url: String,
        #[source]
        source: fetcher::FetchError,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL '{url}': {source}")]
    Parse {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Robots-Gate operations
pub type Result<T> = std::result::Result<T, RobotsError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::url::Origin;
pub use config::Config;
pub use fetcher::{FetchError, Fetcher, HttpFetcher};
pub use robots::{
    compile, parse, Directive, OriginRuleCache, Pattern, RobotsTxt, RuleSet, UserAgentRules,
};
