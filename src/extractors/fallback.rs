//! Link-harvesting fallback for pages without product containers

use regex::Regex;
use scraper::{Html, Selector};
use tracing::info;

use super::{element_text, ProductRecord, Provenance, NO_PRICE};
use crate::url_resolver::resolve_url;

/// Anchors whose href hints at a product page
pub const PRODUCT_LINK_SELECTOR: &str =
    r#"a[href*="product"], a[href*="shop"], a[href*="buy"], a[href*="item"]"#;

/// Currency amount, two-decimal number, or currency code
pub const PRICE_PATTERN: &str = r"(?i)\$\d+|\d+\.\d{2}|USD|EUR|GBP";

/// Link text must be longer than this to become a title
const MIN_LINK_TEXT_CHARS: usize = 3;

/// Harvest product-looking links, then run the price-pattern diagnostic.
pub fn extract_fallback(html: &str, base_origin: &str) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);

    let records = harvest_product_links(&document, base_origin);

    let price_like = count_price_like_elements(&document);
    if price_like > 0 {
        info!("Found {} elements with price-like content", price_like);
    }

    records
}

fn harvest_product_links(document: &Html, base_origin: &str) -> Vec<ProductRecord> {
    let selector = match Selector::parse(PRODUCT_LINK_SELECTOR) {
        Ok(s) => s,
        Err(_) => return vec![],
    };

    let links: Vec<_> = document.select(&selector).collect();
    if !links.is_empty() {
        info!("Found {} potential product links", links.len());
    }

    links
        .iter()
        .filter_map(|link| {
            let href = link.value().attr("href").filter(|h| !h.is_empty())?;
            let text = element_text(link);
            if text.chars().count() <= MIN_LINK_TEXT_CHARS {
                return None;
            }

            Some(ProductRecord::new(
                text,
                NO_PRICE.to_string(),
                resolve_url(Some(href), base_origin),
                String::new(),
                Provenance::LinkFallback,
            ))
        })
        .collect()
}

/// Count elements whose text looks like it contains a price.
///
/// Diagnostic only: the count is logged to help tune selectors and never
/// turns into records. Ancestors of a price-bearing element count too.
pub fn count_price_like_elements(document: &Html) -> usize {
    let pattern = match Regex::new(PRICE_PATTERN) {
        Ok(re) => re,
        Err(_) => return 0,
    };
    let selector = match Selector::parse("*") {
        Ok(s) => s,
        Err(_) => return 0,
    };

    document
        .select(&selector)
        .filter(|el| pattern.is_match(&el.text().collect::<String>()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://shop.example";

    #[test]
    fn test_widget_link() {
        let html = r#"<html><body><a href="/shop/widget">Widget</a></body></html>"#;

        let products = extract_fallback(html, BASE);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title(), "Widget");
        assert_eq!(products[0].link(), "https://shop.example/shop/widget");
        assert_eq!(products[0].price(), NO_PRICE);
        assert_eq!(products[0].description(), "");
        assert_eq!(products[0].provenance(), Provenance::LinkFallback);
    }

    #[test]
    fn test_link_filters() {
        let html = r#"
        <nav>
            <a href="/about">About Us</a>
            <a href="/buy-now">Buy</a>
            <a href="/item/42">   </a>
            <a href="https://other.example/products/mug">  Coffee Mug  </a>
            <a href="//cdn.example/shop/x">Shop X Item</a>
        </nav>
        "#;

        let products = extract_fallback(html, BASE);
        let titles: Vec<&str> = products.iter().map(|p| p.title()).collect();
        assert_eq!(titles, vec!["Coffee Mug", "Shop X Item"]);
        assert_eq!(products[0].link(), "https://other.example/products/mug");
        assert_eq!(products[1].link(), "https://cdn.example/shop/x");
    }

    #[test]
    fn test_overlapping_patterns_not_duplicated_per_anchor() {
        // One anchor matching several substrings is still selected once
        let html = r#"<a href="/shop/product/buy-item">Everything Link</a>"#;
        assert_eq!(extract_fallback(html, BASE).len(), 1);
    }

    #[test]
    fn test_price_scan_is_diagnostic() {
        let html = r#"
        <html><body>
            <div><span>$25</span></div>
            <span>Only 9.99 today</span>
            <span>No price here</span>
        </body></html>
        "#;
        let document = Html::parse_document(html);

        // html, body, div, first span, second span
        assert_eq!(count_price_like_elements(&document), 5);
        assert!(extract_fallback(html, BASE).is_empty());
    }

    #[test]
    fn test_price_scan_currency_codes() {
        let document = Html::parse_document("<b>from eur</b>");
        // html, body, b
        assert_eq!(count_price_like_elements(&document), 3);
    }
}
