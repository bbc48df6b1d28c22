use crate::config::types::{Config, EvaluationConfig, FetcherConfig, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_user_agent_config(&config.user_agent)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_evaluation_config(&config.evaluation)?;
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.token.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent token cannot be empty".to_string(),
        ));
    }

    // Must be usable as an HTTP header value
    if config.token.chars().any(char::is_control) {
        return Err(ConfigError::Validation(format!(
            "user-agent token must not contain control characters, got {:?}",
            config.token
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs ({}) cannot exceed timeout-secs ({})",
            config.connect_timeout_secs, config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates evaluation configuration
fn validate_evaluation_config(config: &EvaluationConfig) -> Result<(), ConfigError> {
    if config.default_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "default-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}
