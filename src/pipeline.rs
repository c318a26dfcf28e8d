//! Fetch, then structured extraction, then link fallback

use tracing::{error, info};

use crate::config::ScraperConfig;
use crate::error::Result;
use crate::extractors::{extract_fallback, extract_structured, ProductRecord};
use crate::fetch::{FetchChain, FetchStrategy};

/// Which extractor produced the records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPath {
    Structured,
    LinkFallback,
}

#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub records: Vec<ProductRecord>,
    pub path: ExtractionPath,
    /// Name of the fetch strategy that returned the page
    pub strategy: String,
}

/// Scrapes one configured page. Holds no per-run state, so one instance can
/// serve any number of calls.
pub struct Scraper {
    config: ScraperConfig,
    chain: FetchChain,
}

impl Scraper {
    /// Scraper with the standard plain / enhanced / browser cascade
    pub fn new(config: ScraperConfig) -> Result<Self> {
        config.validate()?;
        let chain = FetchChain::from_config(&config);
        Ok(Self { config, chain })
    }

    /// Scraper with a custom strategy list
    pub fn with_strategies(config: ScraperConfig, strategies: Vec<Box<dyn FetchStrategy>>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            chain: FetchChain::new(strategies),
        })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Run the pipeline, surfacing `NoContent` when nothing could be fetched
    pub fn try_scrape(&self) -> Result<ScrapeOutcome> {
        info!("Starting product extraction from {}", self.config.base_url);

        let page = self.chain.fetch_content(&self.config.base_url)?;
        let origin = self.config.base_origin();

        let structured = extract_structured(&page.html, origin);
        if !structured.is_empty() {
            return Ok(ScrapeOutcome {
                records: structured,
                path: ExtractionPath::Structured,
                strategy: page.strategy,
            });
        }

        info!("No products found with primary selectors, trying link extraction");
        Ok(ScrapeOutcome {
            records: extract_fallback(&page.html, origin),
            path: ExtractionPath::LinkFallback,
            strategy: page.strategy,
        })
    }

    /// Run the pipeline; total fetch failure yields an empty list
    pub fn scrape(&self) -> Vec<ProductRecord> {
        match self.try_scrape() {
            Ok(outcome) => outcome.records,
            Err(e) => {
                error!("Error scraping products: {}", e);
                Vec::new()
            }
        }
    }
}
