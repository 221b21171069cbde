// src/specs/listing.rs
use scraper::{Html, Selector};
use tracing::warn;

use crate::core::Page;
use crate::core::sanitize::normalize_ws;
use crate::data::DetailLink;
use crate::error::ScrapeError;

pub fn parse_selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Config(format!("selector {css:?}: {e}")))
}

/// Detail links of a results listing, in document order.
/// Anchors without a usable `href` are logged and skipped.
pub fn detail_links(page: &Page, selector: &Selector) -> Vec<DetailLink> {
    let doc = Html::parse_document(&page.body);
    let mut links = Vec::new();

    for anchor in doc.select(selector) {
        let label = normalize_ws(&anchor.text().collect::<String>());
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            warn!(listing = %page.url, label = %label, "listing anchor has no href");
            continue;
        };
        match page.url.join(href) {
            Ok(url) => links.push(DetailLink {
                index: links.len(),
                href: href.to_string(),
                url,
                label,
            }),
            Err(e) => warn!(listing = %page.url, href, error = %e, "unresolvable listing href"),
        }
    }
    links
}
