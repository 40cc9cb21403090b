pub mod client;
pub mod crawler;
pub mod error;
pub mod extract;
mod retry;
pub mod termination;

pub use client::CatalogClient;
pub use crawler::Crawler;
pub use error::ScraperError;
pub use extract::{extract_detail, extract_detail_links, extract_records};
pub use termination::EndOfCatalog;
