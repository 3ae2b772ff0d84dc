use crate::config::types::{Config, FetcherConfig, OutputConfig};
use crate::ConfigError;

const MAX_TIMEOUT_SECS: u64 = 60;
const MAX_REDIRECTS: usize = 20;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates HTTP client configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    // Header values must be visible ASCII
    if config.user_agent.chars().any(|c| c.is_control() || !c.is_ascii()) {
        return Err(ConfigError::Validation(format!(
            "user_agent must be printable ASCII, got '{}'",
            config.user_agent
        )));
    }

    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be between 1 and timeout_secs ({}), got {}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    if config.max_redirects > MAX_REDIRECTS {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be <= {}, got {}",
            MAX_REDIRECTS, config.max_redirects
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}
