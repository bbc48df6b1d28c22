use serde::Deserialize;

/// Main configuration structure for Robots-Gate
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,

    #[serde(default)]
    pub fetcher: FetcherConfig,

    #[serde(default)]
    pub evaluation: EvaluationConfig,
}

/// Outbound identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// User-Agent header sent when fetching robots.txt
    #[serde(default = "default_token")]
    pub token: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            token: default_token(),
        }
    }
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Total time allowed for one robots.txt request (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Time allowed to establish a connection (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Rule evaluation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationConfig {
    /// User-agent group consulted when a caller names none
    #[serde(rename = "default-agent", default = "default_agent")]
    pub default_agent: String,

    /// Let a matching Allow pattern override a matching Disallow pattern
    #[serde(rename = "honor-allow", default)]
    pub honor_allow: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            default_agent: default_agent(),
            honor_allow: false,
        }
    }
}

fn default_token() -> String {
    format!("RobotsGate/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_agent() -> String {
    "*".to_string()
}
