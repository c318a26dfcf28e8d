//! Scraper configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrapeError};

pub const DEFAULT_BASE_URL: &str = "https://theplrdrop.me";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Settings consumed by the fetch chain and the extractors.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// wants to override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Page to scrape; also the origin relative links are resolved against
    pub base_url: String,
    /// Sent by every fetch strategy
    pub user_agent: String,
    pub plain_timeout_secs: u64,
    pub enhanced_timeout_secs: u64,
    pub browser_timeout_secs: u64,
    /// Redirect limit for the enhanced-header request
    pub max_redirects: u32,
    /// Chromium/Chrome executable; autodetected when unset
    pub browser_path: Option<PathBuf>,
    pub enable_browser: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            plain_timeout_secs: 15,
            enhanced_timeout_secs: 20,
            browser_timeout_secs: 30,
            max_redirects: 5,
            browser_path: None,
            enable_browser: true,
        }
    }
}

impl ScraperConfig {
    /// Load a config from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ScrapeError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| {
            ScrapeError::InvalidConfig(format!("cannot parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the base URL is an absolute http(s) URL and the user agent is set
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| ScrapeError::InvalidConfig(format!("base_url {:?}: {}", self.base_url, e)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ScrapeError::InvalidConfig(format!(
                "base_url must be http or https, got {}",
                parsed.scheme()
            )));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ScrapeError::InvalidConfig("user_agent is empty".to_string()));
        }

        Ok(())
    }

    /// Base URL without its trailing slash, as used for link resolution
    pub fn base_origin(&self) -> &str {
        self.base_url.strip_suffix('/').unwrap_or(&self.base_url)
    }

    pub fn plain_timeout(&self) -> Duration {
        Duration::from_secs(self.plain_timeout_secs)
    }

    pub fn enhanced_timeout(&self) -> Duration {
        Duration::from_secs(self.enhanced_timeout_secs)
    }

    pub fn browser_timeout(&self) -> Duration {
        Duration::from_secs(self.browser_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ScraperConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.plain_timeout(), Duration::from_secs(15));
        assert_eq!(config.max_redirects, 5);
    }

    #[test]
    fn test_base_origin_strips_trailing_slash() {
        let config = ScraperConfig {
            base_url: "https://shop.example/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.base_origin(), "https://shop.example");
    }

    #[test]
    fn test_rejects_bad_urls() {
        let relative = ScraperConfig {
            base_url: "/just/a/path".to_string(),
            ..Default::default()
        };
        assert!(matches!(relative.validate(), Err(ScrapeError::InvalidConfig(_))));

        let ftp = ScraperConfig {
            base_url: "ftp://files.example".to_string(),
            ..Default::default()
        };
        assert!(ftp.validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let config: ScraperConfig =
            serde_json::from_str(r#"{"base_url": "https://shop.example", "enable_browser": false}"#)
                .unwrap();
        assert_eq!(config.base_url, "https://shop.example");
        assert!(!config.enable_browser);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }
}
