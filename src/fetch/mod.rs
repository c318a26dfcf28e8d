//! Ordered page-fetch cascade
//!
//! Strategies run one after another until one returns a non-blank body.
//! A strategy failure is logged and never fatal on its own.

mod browser;
mod http;

pub use browser::*;
pub use http::*;

use tracing::{info, warn};

use crate::config::ScraperConfig;
use crate::error::{FetchError, Result, ScrapeError};

/// One way of retrieving a page's markup
pub trait FetchStrategy: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &str;

    fn attempt(&self, url: &str) -> std::result::Result<String, FetchError>;
}

/// Markup plus the strategy that produced it
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub html: String,
    pub strategy: String,
}

pub struct FetchChain {
    strategies: Vec<Box<dyn FetchStrategy>>,
}

impl FetchChain {
    pub fn new(strategies: Vec<Box<dyn FetchStrategy>>) -> Self {
        Self { strategies }
    }

    /// Plain request, enhanced-header request, then rendered browser
    pub fn from_config(config: &ScraperConfig) -> Self {
        let mut strategies: Vec<Box<dyn FetchStrategy>> = vec![
            Box::new(HttpStrategy::plain(config)),
            Box::new(HttpStrategy::enhanced(config)),
        ];
        if config.enable_browser {
            strategies.push(Box::new(RenderedBrowser::from_config(config)));
        }
        Self::new(strategies)
    }

    /// Names of the strategies, in the order they run
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Run the cascade; `NoContent` once every strategy has failed
    pub fn fetch_content(&self, url: &str) -> Result<FetchedPage> {
        for strategy in &self.strategies {
            match strategy.attempt(url) {
                Ok(html) if !html.trim().is_empty() => {
                    info!("Page content retrieved via {} ({} bytes)", strategy.name(), html.len());
                    return Ok(FetchedPage {
                        html,
                        strategy: strategy.name().to_string(),
                    });
                }
                Ok(_) => warn!("{} fetch of {} failed: {}", strategy.name(), url, FetchError::EmptyBody),
                Err(FetchError::Unavailable(reason)) => {
                    info!("{} not available, skipping: {}", strategy.name(), reason)
                }
                Err(e) => warn!("{} fetch of {} failed: {}", strategy.name(), url, e),
            }
        }

        Err(ScrapeError::NoContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Scripted {
        name: &'static str,
        reply: fn() -> std::result::Result<String, FetchError>,
        calls: Arc<AtomicUsize>,
    }

    impl FetchStrategy for Scripted {
        fn name(&self) -> &str {
            self.name
        }

        fn attempt(&self, _url: &str) -> std::result::Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.reply)()
        }
    }

    fn scripted(
        name: &'static str,
        reply: fn() -> std::result::Result<String, FetchError>,
    ) -> (Box<dyn FetchStrategy>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let strategy = Scripted {
            name,
            reply,
            calls: calls.clone(),
        };
        (Box::new(strategy), calls)
    }

    #[test]
    fn test_falls_through_to_browser() {
        let (plain, _) = scripted("plain", || Err(FetchError::Transport("connection refused".into())));
        let (enhanced, _) = scripted("enhanced", || Err(FetchError::Status(403)));
        let (browser, _) = scripted("browser", || Ok("<html>rendered</html>".to_string()));

        let chain = FetchChain::new(vec![plain, enhanced, browser]);
        let page = chain.fetch_content("https://b").unwrap();
        assert_eq!(page.html, "<html>rendered</html>");
        assert_eq!(page.strategy, "browser");
    }

    #[test]
    fn test_stops_at_first_success() {
        let (plain, plain_calls) = scripted("plain", || Ok("<p>first</p>".to_string()));
        let (enhanced, enhanced_calls) = scripted("enhanced", || Ok("<p>second</p>".to_string()));

        let chain = FetchChain::new(vec![plain, enhanced]);
        assert_eq!(chain.fetch_content("https://b").unwrap().html, "<p>first</p>");
        assert_eq!(plain_calls.load(Ordering::SeqCst), 1);
        assert_eq!(enhanced_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_blank_body_is_failure() {
        let (plain, _) = scripted("plain", || Ok("  \n ".to_string()));
        let (enhanced, _) = scripted("enhanced", || Ok("<p>ok</p>".to_string()));

        let chain = FetchChain::new(vec![plain, enhanced]);
        assert_eq!(chain.fetch_content("https://b").unwrap().strategy, "enhanced");
    }

    #[test]
    fn test_all_fail_is_no_content() {
        let (plain, _) = scripted("plain", || Err(FetchError::Transport("timeout".into())));
        let (enhanced, _) = scripted("enhanced", || Err(FetchError::Status(503)));
        let (browser, browser_calls) =
            scripted("browser", || Err(FetchError::Unavailable("no chrome".into())));

        let chain = FetchChain::new(vec![plain, enhanced, browser]);
        assert!(matches!(chain.fetch_content("https://b"), Err(ScrapeError::NoContent)));
        assert_eq!(browser_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_from_config_order() {
        let chain = FetchChain::from_config(&ScraperConfig::default());
        assert_eq!(chain.strategy_names(), vec!["plain", "enhanced-headers", "browser"]);

        let no_browser = ScraperConfig {
            enable_browser: false,
            ..Default::default()
        };
        assert_eq!(FetchChain::from_config(&no_browser).strategy_names().len(), 2);
    }
}
