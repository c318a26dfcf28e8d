//! Plain and enhanced-header HTTP fetches (ureq, blocking)

use std::time::Duration;

use crate::config::ScraperConfig;
use crate::error::FetchError;

use super::FetchStrategy;

/// Browser-like headers for the first attempt
const PLAIN_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.5"),
    ("Connection", "keep-alive"),
    ("Upgrade-Insecure-Requests", "1"),
];

/// Search-referral style headers for the retry
const ENHANCED_HEADERS: &[(&str, &str)] = &[
    ("Referer", "https://google.com"),
    ("Accept", "*/*"),
    ("Cache-Control", "no-cache"),
];

/// A GET request with a fixed header set
pub struct HttpStrategy {
    name: &'static str,
    agent: ureq::Agent,
    headers: &'static [(&'static str, &'static str)],
}

impl HttpStrategy {
    /// Browser-identifying headers, short timeout
    pub fn plain(config: &ScraperConfig) -> Self {
        Self {
            name: "plain",
            agent: build_agent(&config.user_agent, config.plain_timeout(), None),
            headers: PLAIN_HEADERS,
        }
    }

    /// Referrer and cache-bypass headers, longer timeout, bounded redirects
    pub fn enhanced(config: &ScraperConfig) -> Self {
        Self {
            name: "enhanced-headers",
            agent: build_agent(
                &config.user_agent,
                config.enhanced_timeout(),
                Some(config.max_redirects),
            ),
            headers: ENHANCED_HEADERS,
        }
    }
}

fn build_agent(user_agent: &str, timeout: Duration, max_redirects: Option<u32>) -> ureq::Agent {
    let mut builder = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .user_agent(user_agent);
    if let Some(limit) = max_redirects {
        builder = builder.max_redirects(limit);
    }
    ureq::Agent::new_with_config(builder.build())
}

impl FetchStrategy for HttpStrategy {
    fn name(&self) -> &str {
        self.name
    }

    fn attempt(&self, url: &str) -> Result<String, FetchError> {
        let mut request = self.agent.get(url);
        for (name, value) in self.headers {
            request = request.header(*name, *value);
        }

        let response = request.call().map_err(|e| match e {
            ureq::Error::StatusCode(code) => FetchError::Status(code),
            other => FetchError::Transport(other.to_string()),
        })?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        response
            .into_body()
            .read_to_string()
            .map_err(|e| FetchError::Read(e.to_string()))
    }
}
