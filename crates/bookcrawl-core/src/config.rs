//! Crawl configuration.
//!
//! Everything tunable about a crawl lives here, loaded from environment
//! variables with sensible defaults. The end-of-catalog heuristic inputs
//! (phrase list, minimum page length) were tuned against one specific
//! catalog and are deliberately configuration rather than constants.

use thiserror::Error;

/// Default browser-identifying User-Agent. The catalog serves plain HTML
/// to anyone, but some hosts reject clients with no realistic identity.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Configuration for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Catalog root, trailing slash included. Page 1 is fetched from the
    /// root itself; later pages from `catalogue/page-{n}.html` beneath it.
    pub base_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Total attempts per URL, including the first.
    pub retry_attempts: u32,
    /// Fixed delay between attempts for the same URL.
    pub retry_delay_secs: u64,
    /// Delay between consecutive catalog page fetches.
    pub page_delay_ms: u64,
    /// Delay between consecutive detail page fetches.
    pub detail_delay_ms: u64,
    /// Case-insensitive phrases that mark an end-of-catalog error page.
    pub not_found_phrases: Vec<String>,
    /// Pages whose trimmed markup is shorter than this are treated as
    /// error stubs.
    pub min_page_len: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: "https://books.toscrape.com/".to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            request_timeout_secs: 30,
            retry_attempts: 3,
            retry_delay_secs: 2,
            page_delay_ms: 1000,
            detail_delay_ms: 500,
            // Deliberately specific: a bare "not found" would misclassify
            // catalog pages whose book titles contain the words.
            not_found_phrases: vec![
                "page not found".to_owned(),
                "404 not found".to_owned(),
                "error 404".to_owned(),
                "sorry, no results found".to_owned(),
                "no results found".to_owned(),
            ],
            min_page_len: 500,
        }
    }
}

impl CrawlConfig {
    /// Loads configuration from process environment variables, falling
    /// back to defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable holds an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        build_config(|key| std::env::var(key))
    }
}

/// Builds a `CrawlConfig` using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup — no `set_var`/`remove_var` needed.
pub fn build_config<F>(lookup: F) -> Result<CrawlConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = CrawlConfig::default();

    let or_default =
        |var: &str, default: String| -> String { lookup(var).unwrap_or(default) };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_owned(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let parse_u32 = |var: &str, default: u32| -> Result<u32, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_owned(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let parse_usize = |var: &str, default: usize| -> Result<usize, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_owned(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    };

    let base_url = {
        let mut url = or_default("BOOKCRAWL_BASE_URL", defaults.base_url);
        if !url.ends_with('/') {
            url.push('/');
        }
        url
    };

    let not_found_phrases = match lookup("BOOKCRAWL_NOT_FOUND_PHRASES") {
        Ok(raw) => raw
            .split(',')
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect(),
        Err(_) => defaults.not_found_phrases,
    };

    Ok(CrawlConfig {
        base_url,
        user_agent: or_default("BOOKCRAWL_USER_AGENT", defaults.user_agent),
        request_timeout_secs: parse_u64(
            "BOOKCRAWL_REQUEST_TIMEOUT_SECS",
            defaults.request_timeout_secs,
        )?,
        retry_attempts: parse_u32("BOOKCRAWL_RETRY_ATTEMPTS", defaults.retry_attempts)?,
        retry_delay_secs: parse_u64("BOOKCRAWL_RETRY_DELAY_SECS", defaults.retry_delay_secs)?,
        page_delay_ms: parse_u64("BOOKCRAWL_PAGE_DELAY_MS", defaults.page_delay_ms)?,
        detail_delay_ms: parse_u64("BOOKCRAWL_DETAIL_DELAY_MS", defaults.detail_delay_ms)?,
        not_found_phrases,
        min_page_len: parse_usize("BOOKCRAWL_MIN_PAGE_LEN", defaults.min_page_len)?,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
