pub mod config;
pub mod price;
pub mod records;

pub use config::{CrawlConfig, ConfigError};
pub use price::normalize_price;
pub use records::{DetailRecord, Rating, Record};
