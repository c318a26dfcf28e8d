//! Product extraction from HTML
//!
//! `structured` walks prioritized product-container selectors; `fallback`
//! harvests product-looking links when no container matched.

mod fallback;
mod structured;

pub use fallback::*;
pub use structured::*;

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};

/// Title sentinel for "no title found"
pub const NO_TITLE: &str = "N/A";

/// Price sentinel
pub const NO_PRICE: &str = "Price not available";

/// Which extraction path produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum Provenance {
    /// Container match; `index` is the position within the matched selector group
    Structured {
        #[serde(rename = "extractionIndex")]
        index: usize,
    },
    #[serde(rename = "link-extraction")]
    LinkFallback,
}

/// A single extracted product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    title: String,
    price: String,
    link: String,
    description: String,
    extracted_at: DateTime<Utc>,
    #[serde(flatten)]
    provenance: Provenance,
}

impl ProductRecord {
    pub(crate) fn new(
        title: String,
        price: String,
        link: String,
        description: String,
        provenance: Provenance,
    ) -> Self {
        Self {
            title,
            price,
            link,
            description,
            extracted_at: Utc::now(),
            provenance,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn extracted_at(&self) -> DateTime<Utc> {
        self.extracted_at
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }
}

/// Trimmed text content of an element and all its descendants
pub(crate) fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Walk `selectors` in order and return the text of the first selector's
/// first descendant match, skipping selectors whose first match is blank.
/// Nothing is merged across selectors.
pub(crate) fn first_text_in(element: &ElementRef, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|raw| {
        let selector = Selector::parse(raw).ok()?;
        let found = element.select(&selector).next()?;
        let text = element_text(&found);
        (!text.is_empty()).then_some(text)
    })
}

/// Cut `text` to `max_chars` characters and append `...` if it was longer
pub(crate) fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn root(document: &Html) -> ElementRef<'_> {
        document.root_element()
    }

    #[test]
    fn test_first_text_in_priority() {
        let html = r#"
        <div>
            <span class="name">Second choice</span>
            <h2 class="title">First choice</h2>
        </div>
        "#;
        let document = Html::parse_fragment(html);

        let text = first_text_in(&root(&document), &[".title", ".name"]);
        assert_eq!(text.unwrap(), "First choice");
    }

    #[test]
    fn test_first_text_in_skips_blank_selector() {
        let html = r#"
        <div>
            <span class="title">   </span>
            <span class="title">Ignored, only the first match counts</span>
            <span class="name">Widget</span>
        </div>
        "#;
        let document = Html::parse_fragment(html);

        let text = first_text_in(&root(&document), &[".title", ".name"]);
        assert_eq!(text.unwrap(), "Widget");
        assert_eq!(first_text_in(&root(&document), &[".missing"]), None);
    }

    #[test]
    fn test_truncate() {
        let long = "x".repeat(501);
        let cut = truncate_with_ellipsis(&long, 500);
        assert_eq!(cut.len(), 503);
        assert!(cut.ends_with("..."));

        let exact = "y".repeat(500);
        assert_eq!(truncate_with_ellipsis(&exact, 500), exact);
    }

    #[test]
    fn test_truncate_multibyte() {
        let text = "é".repeat(600);
        let cut = truncate_with_ellipsis(&text, 500);
        assert_eq!(cut.chars().count(), 503);
    }

    #[test]
    fn test_record_json_shape() {
        let structured = ProductRecord::new(
            "Widget".to_string(),
            "$5.00".to_string(),
            "https://b/w".to_string(),
            String::new(),
            Provenance::Structured { index: 2 },
        );
        let json = serde_json::to_value(&structured).unwrap();
        assert_eq!(json["title"], "Widget");
        assert_eq!(json["extractionIndex"], 2);
        assert!(json.get("extractedAt").is_some());

        let fallback = ProductRecord::new(
            "Widget".to_string(),
            NO_PRICE.to_string(),
            "https://b/w".to_string(),
            String::new(),
            Provenance::LinkFallback,
        );
        let json = serde_json::to_value(&fallback).unwrap();
        assert_eq!(json["method"], "link-extraction");
    }
}
