//! Application configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the upstream identity provider the relay forwards to.
    /// Example: https://identitytoolkit.googleapis.com
    pub identity_upstream_url: Option<String>,

    /// Web API key appended to relayed identity requests.
    pub identity_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self {
            identity_upstream_url: std::env::var("IDENTITY_UPSTREAM_URL").ok(),
            identity_api_key: std::env::var("IDENTITY_API_KEY").ok(),
        }
    }

    /// Check if an upstream identity provider is configured
    pub fn has_upstream(&self) -> bool {
        self.identity_upstream_url.is_some()
    }

    /// Check if a provider API key is configured
    pub fn has_api_key(&self) -> bool {
        self.identity_api_key.is_some()
    }

    /// Get the upstream URL or panic with a helpful message
    pub fn upstream_url_or_panic(&self) -> &str {
        self.identity_upstream_url
            .as_deref()
            .expect("IDENTITY_UPSTREAM_URL environment variable is not set")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_with_all_fields() {
        let config = Config {
            identity_upstream_url: Some("https://identitytoolkit.googleapis.com".to_string()),
            identity_api_key: Some("web-api-key-123".to_string()),
        };

        assert!(config.has_upstream());
        assert!(config.has_api_key());
        assert_eq!(
            config.upstream_url_or_panic(),
            "https://identitytoolkit.googleapis.com"
        );
    }

    #[test]
    fn test_config_with_no_fields() {
        let config = Config {
            identity_upstream_url: None,
            identity_api_key: None,
        };

        assert!(!config.has_upstream());
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_config_with_partial_fields() {
        let config = Config {
            identity_upstream_url: Some("https://identity.example.com".to_string()),
            identity_api_key: None,
        };

        assert!(config.has_upstream());
        assert!(!config.has_api_key());
    }

    #[test]
    #[should_panic(expected = "IDENTITY_UPSTREAM_URL environment variable is not set")]
    fn test_upstream_url_or_panic_failure() {
        let config = Config {
            identity_upstream_url: None,
            identity_api_key: None,
        };

        config.upstream_url_or_panic();
    }

    #[test]
    fn test_config_from_env_returns_config() {
        // Just verify from_env() returns a Config without errors.
        // Actual values depend on environment, so we don't assert specific values
        let config = Config::from_env();

        let _ = config.has_upstream();
        let _ = config.has_api_key();
    }

    #[test]
    fn test_config_empty_string_counts_as_set() {
        let config = Config {
            identity_upstream_url: Some(String::new()),
            identity_api_key: Some(String::new()),
        };

        assert!(config.has_upstream());
        assert!(config.has_api_key());
    }
}
