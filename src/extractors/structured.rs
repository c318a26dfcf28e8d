//! Container-based product extraction
//!
//! Tries common e-commerce container selectors in priority order and pulls
//! title, price, link and description out of each match.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use super::{
    element_text, first_text_in, truncate_with_ellipsis, ProductRecord, Provenance, NO_PRICE,
    NO_TITLE,
};
use crate::url_resolver::resolve_url;

/// Product container selectors, highest priority first
pub const CONTAINER_SELECTORS: &[&str] = &[
    ".product",
    ".product-item",
    ".shop-item",
    ".product-card",
    ".woocommerce-product",
    "[data-product]",
    ".product-list-item",
    ".item",
    ".listing",
    ".card",
];

const TITLE_SELECTORS: &[&str] = &[
    ".product-title",
    ".title",
    ".name",
    "h1",
    "h2",
    "h3",
    "h4",
    ".product-name",
    "[data-title]",
];

const PRICE_SELECTORS: &[&str] = &[".price", ".cost", ".amount", ".product-price", "[data-price]"];

const DESCRIPTION_SELECTORS: &[&str] = &[".description", ".product-description", ".excerpt", "p"];

/// Own-text fallback titles must be shorter than this
const MAX_OWN_TEXT_TITLE_CHARS: usize = 200;

pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Extract products from the first container selector that yields any
/// titled record. Lower-priority selectors are never consulted once one
/// has produced results.
pub fn extract_structured(html: &str, base_origin: &str) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);

    CONTAINER_SELECTORS
        .iter()
        .find_map(|raw| {
            let selector = Selector::parse(raw).ok()?;
            let containers: Vec<ElementRef> = document.select(&selector).collect();
            if containers.is_empty() {
                return None;
            }

            info!("Found {} products using selector: {}", containers.len(), raw);

            let records: Vec<ProductRecord> = containers
                .iter()
                .enumerate()
                .map(|(index, element)| extract_product_info(element, index, base_origin))
                .filter(|record| record.title() != NO_TITLE)
                .collect();

            if records.is_empty() {
                debug!("Selector {} matched only untitled elements, trying next", raw);
                return None;
            }
            Some(records)
        })
        .unwrap_or_default()
}

/// Build a record from one container element
pub fn extract_product_info(element: &ElementRef, index: usize, base_origin: &str) -> ProductRecord {
    let title = extract_title(element);
    let price = first_text_in(element, PRICE_SELECTORS).unwrap_or_else(|| NO_PRICE.to_string());
    let link = extract_link(element, base_origin);
    let description = first_text_in(element, DESCRIPTION_SELECTORS)
        .map(|text| truncate_with_ellipsis(&text, MAX_DESCRIPTION_CHARS))
        .unwrap_or_default();

    debug!(index, %title, %price, %link, "extracted product");

    ProductRecord::new(title, price, link, description, Provenance::Structured { index })
}

fn extract_title(element: &ElementRef) -> String {
    if let Some(title) = first_text_in(element, TITLE_SELECTORS) {
        return title;
    }

    // Fall back to the container's own text when it is short enough to be a label
    let own_text = element_text(element);
    if !own_text.is_empty() && own_text.chars().count() < MAX_OWN_TEXT_TITLE_CHARS {
        if let Some(first_line) = own_text.lines().next() {
            return first_line.trim().to_string();
        }
    }

    NO_TITLE.to_string()
}

fn extract_link(element: &ElementRef, base_origin: &str) -> String {
    let anchor = Selector::parse("a")
        .ok()
        .and_then(|selector| element.select(&selector).next());

    match anchor {
        Some(a) => resolve_url(a.value().attr("href"), base_origin),
        None if element.value().name() == "a" => resolve_url(element.value().attr("href"), base_origin),
        None => resolve_url(None, base_origin),
    }
}
