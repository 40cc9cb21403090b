pub mod error;
pub mod summary;
pub mod writer;

pub use error::StoreError;
pub use summary::{read_summary, ColumnType, CsvSummary, PriceStats};
pub use writer::{write_records, FieldRow, WriteMode};
