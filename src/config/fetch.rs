//! `[fetch]` section configuration.
//!
//! Controls how remote template and data locators are downloaded.

use super::defaults;
use educe::Educe;
use serde::Deserialize;
use std::time::Duration;

/// `[fetch]` section in creview.toml - remote locator settings.
///
/// # Example
/// ```toml
/// [fetch]
/// timeout = 10   # seconds, unset means wait forever
/// user_agent = "my-agent/1.0"
/// ```
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// Request timeout in seconds. `None` never times out.
    #[serde(default = "defaults::fetch::timeout")]
    #[educe(Default = defaults::fetch::timeout())]
    pub timeout: Option<u64>,

    /// `User-Agent` header sent with remote requests.
    #[serde(default = "defaults::fetch::user_agent")]
    #[educe(Default = defaults::fetch::user_agent())]
    pub user_agent: String,
}

impl FetchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::super::Config;
    use std::time::Duration;

    #[test]
    fn test_fetch_config_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.fetch.timeout, None);
        assert_eq!(config.fetch.timeout(), None);
        assert!(config.fetch.user_agent.starts_with("creview/"));
    }

    #[test]
    fn test_fetch_config_timeout() {
        let config = r#"
            [fetch]
            timeout = 15
            user_agent = "preview-bot"
        "#;
        let config: Config = toml::from_str(config).unwrap();

        assert_eq!(config.fetch.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.fetch.user_agent, "preview-bot");
    }
}
