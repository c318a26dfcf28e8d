//! JSON report, console summary and failure guidance

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::error::ReportError;
use crate::extractors::ProductRecord;

/// Likely reasons a scrape came back empty
pub const FAILURE_GUIDANCE: &[&str] = &[
    "The website structure has changed",
    "The site requires JavaScript to load products",
    "Network connectivity issues",
    "The site has anti-scraping measures",
];

/// Summary descriptions are cut to this many characters
const SUMMARY_DESCRIPTION_CHARS: usize = 100;

/// Document written to disk after a successful scrape
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeReport<'a> {
    pub extracted_at: DateTime<Utc>,
    pub source: &'a str,
    pub total_products: usize,
    pub products: &'a [ProductRecord],
}

impl<'a> ScrapeReport<'a> {
    pub fn new(source: &'a str, products: &'a [ProductRecord]) -> Self {
        Self {
            extracted_at: Utc::now(),
            source,
            total_products: products.len(),
            products,
        }
    }
}

/// `<first host label>-products-<date>.json`, e.g. `theplrdrop-products-2024-05-01.json`
pub fn default_report_filename(source: &str, date: NaiveDate) -> String {
    let label = url::Url::parse(source)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .and_then(|host| host.split('.').next().map(String::from))
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| "scrape".to_string());

    format!("{}-products-{}.json", label, date.format("%Y-%m-%d"))
}

/// Write the report as pretty-printed JSON
pub fn save_report(path: &Path, report: &ScrapeReport) -> Result<PathBuf, ReportError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(path.to_path_buf())
}

/// Human-readable listing of the extracted products
pub fn render_summary(records: &[ProductRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Extraction Summary:");
    let _ = writeln!(out, "Total products found: {}", records.len());

    if records.is_empty() {
        return out;
    }

    let _ = writeln!(out, "\nProduct List:");
    for (i, product) in records.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, product.title());
        let _ = writeln!(out, "   Price: {}", product.price());
        let _ = writeln!(out, "   Link: {}", product.link());
        if !product.description().is_empty() {
            let short: String = product.description().chars().take(SUMMARY_DESCRIPTION_CHARS).collect();
            let _ = writeln!(out, "   Description: {}...", short);
        }
        out.push('\n');
    }

    out
}

/// Operator guidance printed when no products were found
pub fn render_failure_guidance() -> String {
    let mut out = String::from("No products found.\nThis could be due to:\n");
    for cause in FAILURE_GUIDANCE {
        let _ = writeln!(out, "- {}", cause);
    }
    out
}
