//! Configuration module for Robots-Gate
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use robots_gate::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("robots-gate.toml")).unwrap();
//! println!("Fetch timeout: {}s", config.fetcher.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, EvaluationConfig, FetcherConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};

pub use validation::validate;
