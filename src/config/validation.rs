use crate::config::types::{Config, CrawlerConfig, FetcherConfig, OutputConfig, OutputMode};
use crate::url::parse_seed;
use crate::ConfigError;

/// Upper bound on concurrent fetchers
pub const MAX_CONCURRENT_FETCHERS: usize = 1000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
///
/// Depth and concurrency are only bounded from above here; low values are
/// raised by `Config::effective_depth` and `Config::effective_concurrency`.
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    parse_seed(&config.start).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "Expected a valid URL to start from, got '{}': {}",
            config.start, e
        ))
    })?;

    if config.max_concurrent_fetchers > MAX_CONCURRENT_FETCHERS {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetchers must be at most {}, got {}",
            MAX_CONCURRENT_FETCHERS, config.max_concurrent_fetchers
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.mode == OutputMode::Save && config.save_path.is_empty() {
        return Err(ConfigError::Validation(
            "save_path cannot be empty when saving pages".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_seed() {
        let mut config = Config::default();
        config.crawler.start = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_non_http_seed() {
        let mut config = Config::default();
        config.crawler.start = "ftp://example.com/".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_low_limits_are_not_errors() {
        let mut config = Config::default();
        config.crawler.max_depth = 0;
        config.crawler.max_concurrent_fetchers = 0;
        assert!(validate(&config).is_ok());
        assert_eq!(config.effective_depth(), 2);
        assert_eq!(config.effective_concurrency(), 1);
    }

    #[test]
    fn test_too_many_fetchers() {
        let mut config = Config::default();
        config.crawler.max_concurrent_fetchers = MAX_CONCURRENT_FETCHERS + 1;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_user_agent() {
        let mut config = Config::default();
        config.fetcher.user_agent = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = Config::default();
        config.fetcher.request_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_save_path() {
        let mut config = Config::default();
        config.output.save_path = String::new();
        assert!(validate(&config).is_err());

        config.output.mode = OutputMode::Print;
        assert!(validate(&config).is_ok());
    }
}
