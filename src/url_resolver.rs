//! href resolution against the scraped site's origin

/// Placeholder link used when no href could be found.
pub const NO_LINK: &str = "#";

/// Resolve an href against `base_origin`.
///
/// Absolute (`http...`) hrefs pass through, protocol-relative ones get
/// `https:`, root-relative ones are appended to the origin and anything else
/// is joined with a `/`. Dot segments, queries and fragments are left alone.
pub fn resolve_url(href: Option<&str>, base_origin: &str) -> String {
    let href = match href {
        Some(h) if !h.is_empty() => h,
        _ => return NO_LINK.to_string(),
    };

    if href.starts_with("http") {
        href.to_string()
    } else if href.starts_with("//") {
        format!("https:{}", href)
    } else if href.starts_with('/') {
        format!("{}{}", base_origin, href)
    } else {
        format!("{}/{}", base_origin, href)
    }
}
