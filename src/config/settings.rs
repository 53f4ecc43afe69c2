//! Settings structures for slack-search configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Environment variable holding the Slack API token
pub const TOKEN_ENV: &str = "SLACK_API_TOKEN";

/// Default Slack Web API base URL
pub const DEFAULT_API_URL: &str = "https://slack.com/api";

/// Problems that stop a run before any API call is made
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Slack API token cannot be blank (set SLACK_API_TOKEN).")]
    MissingToken,
    #[error("Query (-q) cannot be blank.")]
    BlankQuery,
    #[error("invalid Slack API URL `{0}`")]
    InvalidApiUrl(String),
    #[error("search.max_concurrency must be at least 1")]
    ZeroConcurrency,
    #[error("outgoing.request_timeout must be a positive number of seconds, got {0}")]
    InvalidTimeout(String),
}

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub slack: SlackSettings,
    pub outgoing: OutgoingSettings,
    pub search: SearchSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with process environment variables
    pub fn merge_env(&mut self) {
        self.merge_env_from(|key| std::env::var(key).ok());
    }

    /// Merge with environment variables supplied by `lookup`
    pub fn merge_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(TOKEN_ENV) {
            self.slack.token = val;
        }
        if let Some(val) = lookup("SLACK_API_URL") {
            self.slack.api_url = val;
        }
        if let Some(val) = lookup("SLACK_SEARCH_MAX_CONCURRENCY") {
            if let Ok(limit) = val.parse() {
                self.search.max_concurrency = Some(limit);
            }
        }
    }

    /// Check everything a run needs before touching the network
    pub fn validate(&self, query: &str) -> std::result::Result<(), ConfigError> {
        if self.slack.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if query.trim().is_empty() {
            return Err(ConfigError::BlankQuery);
        }
        if Url::parse(&self.slack.api_url).is_err() {
            return Err(ConfigError::InvalidApiUrl(self.slack.api_url.clone()));
        }
        if self.search.max_concurrency == Some(0) {
            return Err(ConfigError::ZeroConcurrency);
        }
        let timeout = self.outgoing.request_timeout;
        if !(timeout.is_finite() && timeout > 0.0) {
            return Err(ConfigError::InvalidTimeout(timeout.to_string()));
        }
        Ok(())
    }
}

/// Slack workspace access
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackSettings {
    /// Web API base URL
    pub api_url: String,
    /// API token; usually supplied through `SLACK_API_TOKEN`
    #[serde(skip_serializing)]
    pub token: String,
    /// Matches requested per search page
    pub page_size: u32,
}

impl Default for SlackSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: String::new(),
            page_size: 20,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Idle connections kept per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// User agent override
    pub user_agent: Option<String>,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 30.0,
            pool_maxsize: 20,
            verify_ssl: true,
            user_agent: None,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Search orchestration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum page tasks in flight (unbounded when unset)
    pub max_concurrency: Option<usize>,
    /// Reuse the page-1 probe instead of fetching page 1 again
    pub reuse_first_page: bool,
    /// Memoise user and channel names for the run
    pub cache_lookups: bool,
    /// Name cache TTL in seconds
    pub lookup_cache_ttl: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_concurrency: None,
            reuse_first_page: false,
            cache_lookups: true,
            lookup_cache_ttl: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.slack.api_url, DEFAULT_API_URL);
        assert!(settings.slack.token.is_empty());
        assert_eq!(settings.search.max_concurrency, None);
        assert!(!settings.search.reuse_first_page);
    }

    #[test]
    fn test_yaml_partial_overrides() {
        let settings: Settings = serde_yaml::from_str(
            "search:\n  max_concurrency: 4\n  reuse_first_page: true\noutgoing:\n  request_timeout: 5.5\n",
        )
        .unwrap();

        assert_eq!(settings.search.max_concurrency, Some(4));
        assert!(settings.search.reuse_first_page);
        assert!(settings.search.cache_lookups);
        assert_eq!(settings.outgoing.request_timeout, 5.5);
        assert_eq!(settings.slack.page_size, 20);
    }

    #[test]
    fn test_merge_env() {
        let mut settings = Settings::default();
        settings.merge_env_from(env(&[
            (TOKEN_ENV, "xoxp-123"),
            ("SLACK_API_URL", "http://localhost:9999/api"),
            ("SLACK_SEARCH_MAX_CONCURRENCY", "3"),
        ]));

        assert_eq!(settings.slack.token, "xoxp-123");
        assert_eq!(settings.slack.api_url, "http://localhost:9999/api");
        assert_eq!(settings.search.max_concurrency, Some(3));
    }

    #[test]
    fn test_merge_env_ignores_bad_concurrency() {
        let mut settings = Settings::default();
        settings.merge_env_from(env(&[("SLACK_SEARCH_MAX_CONCURRENCY", "lots")]));
        assert_eq!(settings.search.max_concurrency, None);
    }

    #[test]
    fn test_validate_missing_token() {
        let settings = Settings::default();
        assert_eq!(settings.validate("report"), Err(ConfigError::MissingToken));
    }

    #[test]
    fn test_validate_blank_query() {
        let mut settings = Settings::default();
        settings.slack.token = "xoxp-1".to_string();
        assert_eq!(settings.validate("   "), Err(ConfigError::BlankQuery));
        assert_eq!(settings.validate(""), Err(ConfigError::BlankQuery));
    }

    #[test]
    fn test_validate_token_checked_before_query() {
        let settings = Settings::default();
        assert_eq!(settings.validate(""), Err(ConfigError::MissingToken));
    }

    #[test]
    fn test_validate_bad_url_and_concurrency() {
        let mut settings = Settings::default();
        settings.slack.token = "xoxp-1".to_string();
        settings.slack.api_url = "not a url".to_string();
        assert!(matches!(
            settings.validate("q"),
            Err(ConfigError::InvalidApiUrl(_))
        ));

        settings.slack.api_url = DEFAULT_API_URL.to_string();
        settings.search.max_concurrency = Some(0);
        assert_eq!(settings.validate("q"), Err(ConfigError::ZeroConcurrency));

        settings.search.max_concurrency = Some(2);
        assert_eq!(settings.validate("q"), Ok(()));
    }

    #[test]
    fn test_validate_rejects_unusable_timeout() {
        let mut settings: Settings =
            serde_yaml::from_str("outgoing:\n  request_timeout: -1\n").unwrap();
        settings.slack.token = "xoxp-1".to_string();
        assert_eq!(
            settings.validate("q"),
            Err(ConfigError::InvalidTimeout("-1".to_string()))
        );

        for timeout in [0.0, f64::NAN, f64::INFINITY] {
            settings.outgoing.request_timeout = timeout;
            assert!(matches!(
                settings.validate("q"),
                Err(ConfigError::InvalidTimeout(_))
            ));
        }
    }

    #[test]
    fn test_token_not_serialized() {
        let mut settings = Settings::default();
        settings.slack.token = "xoxp-secret".to_string();
        let yaml = serde_yaml::to_string(&settings).unwrap();
        assert!(!yaml.contains("xoxp-secret"));
    }
}
