use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Search limits are positive
/// - Webshare base URL is http(s), when configured
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let search = &config.search;
    let positive = [
        ("search.page_size", search.page_size as u64),
        ("search.max_pages", search.max_pages as u64),
        ("search.max_candidates", search.max_candidates as u64),
        ("search.query_concurrency", search.query_concurrency as u64),
        ("search.request_timeout_secs", search.request_timeout_secs),
    ];
    for (key, value) in positive {
        if value == 0 {
            return Err(ConfigError::ValidationError(format!("{} must be > 0", key)));
        }
    }

    if let Some(webshare) = &config.webshare {
        if !webshare.base_url.starts_with("http://") && !webshare.base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "webshare.base_url must be an http(s) URL, got '{}'",
                webshare.base_url
            )));
        }
    }

    Ok(())
}
