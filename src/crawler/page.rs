use anyhow::{Result, anyhow};
use scraper::{Html, Selector};
use url::Url;

/// Collect the raw href values of all anchors in `content`.
///
/// Values containing `@` (mailto and friends) are skipped.
pub fn extract_links(content: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(content);
    let selector =
        Selector::parse("a[href]").map_err(|e| anyhow!("Failed to parse <a> selector: {}", e))?;

    let links = document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| !href.contains('@'))
        .map(str::to_string)
        .collect();

    Ok(links)
}

/// If `link` is a full URL, returns it as-is. Otherwise resolves it against
/// `base` following standard URL rules, so `/about` replaces the whole path
/// of `base` while `z.html` replaces only its last segment.
pub fn resolve_address(base: &Url, link: &str) -> Result<Url, url::ParseError> {
    if let Ok(parsed) = Url::parse(link) {
        if parsed.host().is_some() {
            return Ok(parsed);
        }
    }
    base.join(link)
}
