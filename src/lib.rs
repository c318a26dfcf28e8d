//! Product scraper for e-commerce listing pages
//!
//! Fetches one page through a fallback cascade and extracts product records:
//! - Fetch chain: plain request, enhanced-header request, headless browser
//! - Structured extraction from prioritized product-container selectors
//! - Link-harvesting fallback when no container matches
//! - JSON report and console summary for callers

pub mod config;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod url_resolver;

pub use config::ScraperConfig;
pub use error::{FetchError, ReportError, Result, ScrapeError};
pub use extractors::{ProductRecord, Provenance};
pub use pipeline::{ExtractionPath, ScrapeOutcome, Scraper};
