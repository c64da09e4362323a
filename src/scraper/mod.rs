pub(crate) mod match_detail;
pub(crate) mod matches;
pub mod normalize;

use ::scraper::{ElementRef, Selector};
use tracing::debug;

use crate::error::{Result, VlrError};

/// Fetch a URL and return the response body.
///
/// The body is returned as text rather than a parsed [`::scraper::Html`] so
/// that callers can parse it without holding the (non-`Send`) document across
/// an await point.
pub(crate) async fn get_document(client: &reqwest::Client, url: &str) -> Result<String> {
    debug!(url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| VlrError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(VlrError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    response.text().await.map_err(|e| VlrError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })
}

/// Extract trimmed text content from the first element matching `selector`
/// inside `element`. Returns an empty string if nothing matches.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|e| e.text().collect::<String>())
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Concatenated raw text of every element matching `selector`, in document
/// order and without any trimming.
pub(crate) fn select_all_text(element: &ElementRef, selector: &Selector) -> String {
    element.select(selector).flat_map(|e| e.text()).collect()
}

/// The `/`-separated segment at `index` of a site-relative link.
pub(crate) fn path_segment(href: &str, index: usize) -> Option<&str> {
    href.split('/').nth(index).filter(|s| !s.is_empty())
}
