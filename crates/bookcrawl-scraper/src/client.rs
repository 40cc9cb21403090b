use std::time::Duration;

use reqwest::Client;

use bookcrawl_core::CrawlConfig;

use crate::error::ScraperError;
use crate::retry::retry_with_delay;

/// HTTP client for a paginated catalog site.
///
/// Performs plain GETs with a fixed browser-identifying `User-Agent`,
/// per-request timeout, and fixed-delay retry on any transport failure or
/// non-2xx status. URL construction for catalog pages and detail pages is
/// pure string templating over the configured base URL, independent of
/// any on-disk state.
pub struct CatalogClient {
    client: Client,
    base_url: String,
    retry_attempts: u32,
    retry_delay_secs: u64,
}

impl CatalogClient {
    /// Creates a `CatalogClient` from the crawl configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(config: &CrawlConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            retry_attempts: config.retry_attempts,
            retry_delay_secs: config.retry_delay_secs,
        })
    }

    /// Fetches `url` and returns the response body, retrying on failure.
    ///
    /// Every failure class is retried in place — connection errors,
    /// timeouts, and non-2xx statuses alike — with the configured fixed
    /// delay between attempts.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] — non-2xx after all attempts.
    /// - [`ScraperError::Http`] — network failure after all attempts.
    pub async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        retry_with_delay(self.retry_attempts, self.retry_delay_secs, || {
            let url = url.to_owned();
            async move {
                let response = self.client.get(&url).send().await?;
                let status = response.status();

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }

    /// Fetches catalog page `page` by its canonical URL.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch`].
    pub async fn fetch_page(&self, page: u32) -> Result<String, ScraperError> {
        self.fetch(&self.page_url(page)).await
    }

    /// Fetches a detail page by a possibly-relative `href` harvested from
    /// a catalog page.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch`].
    pub async fn fetch_detail(&self, href: &str) -> Result<String, ScraperError> {
        self.fetch(&self.detail_url(href)).await
    }

    /// Canonical URL for catalog page `page`: the root page for page 1,
    /// `catalogue/page-{n}.html` beneath the base for later pages.
    #[must_use]
    pub fn page_url(&self, page: u32) -> String {
        if page <= 1 {
            self.base_url.clone()
        } else {
            format!("{}catalogue/page-{page}.html", self.base_url)
        }
    }

    /// Resolves a detail-page `href` against the catalog base.
    ///
    /// Absolute URLs pass through untouched. Relative hrefs have their
    /// leading `../` segments stripped; hrefs harvested from inside the
    /// `catalogue/` tree lack that prefix, so it is restored before
    /// joining to the base.
    #[must_use]
    pub fn detail_url(&self, href: &str) -> String {
        if href.starts_with("http") {
            return href.to_owned();
        }

        let mut rest = href;
        while let Some(stripped) = rest.strip_prefix("../") {
            rest = stripped;
        }
        let rest = rest.trim_start_matches('/');

        if rest.starts_with("catalogue/") {
            format!("{}{rest}", self.base_url)
        } else {
            format!("{}catalogue/{rest}", self.base_url)
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
