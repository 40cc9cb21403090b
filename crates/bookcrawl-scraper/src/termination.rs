//! End-of-catalog detection.
//!
//! The catalog gives no protocol-level "last page" signal that survives
//! the retrying fetch layer, so the crawl loop relies on a content
//! heuristic: error pages announce themselves with a "not found" phrase,
//! are tiny, or carry a 404 title. The rules live behind this one type so
//! they can be re-tuned (or replaced) without touching the crawl loop;
//! the phrase list and length threshold come from configuration.

use scraper::{Html, Selector};

use bookcrawl_core::CrawlConfig;

/// Classifies fetched markup as an end-of-catalog page.
#[derive(Debug, Clone)]
pub struct EndOfCatalog {
    /// Lowercased phrases matched case-insensitively against the body.
    phrases: Vec<String>,
    /// Trimmed-length floor below which a page is treated as an error stub.
    min_page_len: usize,
}

impl EndOfCatalog {
    #[must_use]
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self {
            phrases: config
                .not_found_phrases
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
            min_page_len: config.min_page_len,
        }
    }

    /// Returns `true` when `markup` marks the end of the catalog.
    ///
    /// In order: absent markup; any configured phrase present
    /// (case-insensitive); trimmed length under the threshold; a `<title>`
    /// containing the token `404`. A normal catalog page with records
    /// matches none of these. Heuristic, not a protocol signal —
    /// unusually short legitimate pages can false-positive.
    #[must_use]
    pub fn is_end(&self, markup: Option<&str>) -> bool {
        let Some(html) = markup else {
            return true;
        };

        let lowered = html.to_lowercase();
        if self.phrases.iter().any(|phrase| lowered.contains(phrase)) {
            return true;
        }

        if html.trim().len() < self.min_page_len {
            return true;
        }

        if let Ok(title) = Selector::parse("title") {
            let document = Html::parse_document(html);
            if let Some(element) = document.select(&title).next() {
                let text: String = element.text().collect();
                if text.contains("404") {
                    return true;
                }
            }
        }

        false
    }
}
