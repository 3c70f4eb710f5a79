use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Upstream base URL is present and uses http(s)
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.upstream.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "upstream.base_url cannot be empty".to_string(),
        ));
    }

    if !config.upstream.base_url.starts_with("http://")
        && !config.upstream.base_url.starts_with("https://")
    {
        return Err(ConfigError::ValidationError(format!(
            "upstream.base_url must be an http(s) URL, got: {}",
            config.upstream.base_url
        )));
    }

    Ok(())
}
