//! Crawl orchestration across catalog pages.
//!
//! Drives repeated fetch → termination-check → extract cycles over
//! ascending page indices and aggregates the extracted records. The
//! aggregate is a local, returned sequence — the crawler holds no
//! run-to-run state and is safely restartable from any page index.

use std::time::Duration;

use bookcrawl_core::{CrawlConfig, DetailRecord, Record};

use crate::client::CatalogClient;
use crate::error::ScraperError;
use crate::extract::{extract_detail, extract_detail_links, extract_records};
use crate::termination::EndOfCatalog;

/// Sequential catalog crawler.
///
/// Two operating modes: bounded ([`Crawler::crawl_pages`]) fetches a
/// fixed number of pages; exhaustive ([`Crawler::crawl_all`]) runs until
/// the end-of-catalog heuristic, a fetch failure, or an empty page stops
/// it. All failures are terminal for the run, never fatal — the caller
/// always gets the records aggregated so far.
pub struct Crawler {
    client: CatalogClient,
    detector: EndOfCatalog,
    page_delay: Duration,
    detail_delay: Duration,
}

impl Crawler {
    /// Builds a crawler (HTTP client plus termination detector) from the
    /// crawl configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &CrawlConfig) -> Result<Self, ScraperError> {
        Ok(Self {
            client: CatalogClient::new(config)?,
            detector: EndOfCatalog::from_config(config),
            page_delay: Duration::from_millis(config.page_delay_ms),
            detail_delay: Duration::from_millis(config.detail_delay_ms),
        })
    }

    /// Crawls exactly `num_pages` pages starting at `start_page`,
    /// stopping early only on a fetch failure or a page with zero
    /// records.
    ///
    /// Records are aggregated page-ascending, in-page order preserved.
    /// The inter-page delay is skipped after the final requested page.
    pub async fn crawl_pages(&self, start_page: u32, num_pages: u32) -> Vec<Record> {
        let mut all_records = Vec::new();
        if num_pages == 0 {
            return all_records;
        }
        let last_page = start_page.saturating_add(num_pages - 1);

        for page in start_page..=last_page {
            tracing::info!(page, "fetching catalog page");
            let markup = match self.client.fetch_page(page).await {
                Ok(markup) => markup,
                Err(err) => {
                    tracing::warn!(page, error = %err, "page unavailable, stopping crawl");
                    break;
                }
            };

            let records = extract_records(&markup);
            if records.is_empty() {
                tracing::info!(page, "no records on page, stopping crawl");
                break;
            }
            tracing::debug!(page, count = records.len(), "extracted records");
            all_records.extend(records);

            if page < last_page && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        all_records
    }

    /// Crawls from `start_page` until the catalog ends.
    ///
    /// Termination transitions, checked per page: fetch failure; the
    /// end-of-catalog heuristic classifying the markup as an error page;
    /// a fetched page yielding zero records. The inter-page delay is
    /// observed after every aggregated page, so the final successful
    /// fetch incurs one trailing wait before the loop discovers
    /// termination — accepted inefficiency.
    pub async fn crawl_all(&self, start_page: u32) -> Vec<Record> {
        let mut all_records = Vec::new();
        let mut page = start_page;

        loop {
            tracing::info!(page, "fetching catalog page");
            let markup = match self.client.fetch_page(page).await {
                Ok(markup) => markup,
                Err(err) => {
                    tracing::warn!(page, error = %err, "page unavailable, crawl done");
                    break;
                }
            };

            if self.detector.is_end(Some(&markup)) {
                tracing::info!(page, "end of catalog detected");
                break;
            }

            let records = extract_records(&markup);
            if records.is_empty() {
                tracing::info!(page, "no records on page, crawl done");
                break;
            }
            tracing::debug!(page, count = records.len(), "extracted records");
            all_records.extend(records);

            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
            page += 1;
        }

        all_records
    }

    /// Scrapes up to `max_details` detail pages linked from the first
    /// catalog page.
    ///
    /// A fetch or extraction failure for one item skips that item with a
    /// warning; it never aborts the batch. Items are separated by the
    /// (smaller) inter-detail delay.
    ///
    /// # Errors
    ///
    /// Returns an error only when the first catalog page itself cannot
    /// be fetched — without it there are no links to follow.
    pub async fn scrape_details(
        &self,
        max_details: usize,
    ) -> Result<Vec<DetailRecord>, ScraperError> {
        let markup = self.client.fetch_page(1).await?;
        let links = extract_detail_links(&markup);
        tracing::info!(
            harvested = links.len(),
            taking = links.len().min(max_details),
            "harvested detail links from page 1"
        );

        let mut details = Vec::new();
        for (index, href) in links.iter().take(max_details).enumerate() {
            if index > 0 && !self.detail_delay.is_zero() {
                tokio::time::sleep(self.detail_delay).await;
            }

            let page = match self.client.fetch_detail(href).await {
                Ok(page) => page,
                Err(err) => {
                    tracing::warn!(href, error = %err, "detail page unavailable, skipping");
                    continue;
                }
            };

            match extract_detail(&page) {
                Some(detail) => details.push(detail),
                None => tracing::warn!(href, "detail extraction missed, skipping"),
            }
        }

        Ok(details)
    }
}
