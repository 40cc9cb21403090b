//! CSV persistence for crawl output.
//!
//! One unified write contract for both record shapes: every write
//! computes the derived columns (`Price_Numeric` from the price text,
//! `Scraped_At` stamped once per batch), and append validates the batch
//! header against the existing file's header instead of silently
//! drifting. Persisted rows are never mutated afterwards; repeated runs
//! either replace the file or add rows beneath the established header.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::Path;

use chrono::Local;

use bookcrawl_core::{normalize_price, DetailRecord, Record};

use crate::error::StoreError;

/// Derived column holding the float parsed from `Price`.
pub const PRICE_NUMERIC_COLUMN: &str = "Price_Numeric";
/// Derived column holding the batch capture timestamp.
pub const SCRAPED_AT_COLUMN: &str = "Scraped_At";
/// Source column the numeric derivation reads from.
const PRICE_COLUMN: &str = "Price";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Destination handling for [`write_records`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace any existing file, header included.
    Overwrite,
    /// Add rows beneath the existing header; behaves like `Overwrite`
    /// when the file does not exist yet.
    Append,
}

/// A record that can be projected into ordered CSV columns.
pub trait FieldRow {
    /// Ordered column name/value pairs for this row.
    fn fields(&self) -> Vec<(String, String)>;
}

impl FieldRow for Record {
    fn fields(&self) -> Vec<(String, String)> {
        Record::fields(self)
    }
}

impl FieldRow for DetailRecord {
    fn fields(&self) -> Vec<(String, String)> {
        DetailRecord::fields(self)
    }
}

/// Writes `rows` to `path` as UTF-8 CSV, derived columns included.
///
/// The header is the union of the rows' field names in first-appearance
/// order, followed by `Price_Numeric` and `Scraped_At`. Rows lacking one
/// of the union columns get an empty cell there (detail records
/// legitimately vary in their optional columns). `Price_Numeric` is
/// derived per row from its `Price` text, `0.0` when absent or
/// unparsable; `Scraped_At` is one local-time stamp for the whole batch.
///
/// Returns the number of data rows written.
///
/// # Errors
///
/// - [`StoreError::NoData`] — `rows` is empty; nothing is touched.
/// - [`StoreError::SchemaMismatch`] — append onto a file whose header
///   differs from the batch header.
/// - [`StoreError::Csv`] / [`StoreError::Io`] — underlying write failure.
pub fn write_records<R: FieldRow>(
    rows: &[R],
    path: &Path,
    mode: WriteMode,
) -> Result<usize, StoreError> {
    if rows.is_empty() {
        return Err(StoreError::NoData);
    }

    let header = batch_header(rows);
    let scraped_at = Local::now().format(TIMESTAMP_FORMAT).to_string();

    let appending = mode == WriteMode::Append && path.exists();
    if appending {
        let existing = read_header(path)?;
        if existing != header {
            return Err(StoreError::SchemaMismatch {
                existing,
                batch: header,
            });
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(appending)
        .write(true)
        .truncate(!appending)
        .open(path)?;
    let mut writer = csv::Writer::from_writer(file);

    if !appending {
        writer.write_record(&header)?;
    }

    for row in rows {
        writer.write_record(project_row(row, &header, &scraped_at))?;
    }
    writer.flush()?;

    tracing::info!(
        rows = rows.len(),
        path = %path.display(),
        mode = ?mode,
        "saved records"
    );
    Ok(rows.len())
}

/// Union of the rows' field names in first-appearance order, with the
/// derived columns appended.
fn batch_header<R: FieldRow>(rows: &[R]) -> Vec<String> {
    let mut header: Vec<String> = Vec::new();
    for row in rows {
        for (name, _) in row.fields() {
            if !header.contains(&name) {
                header.push(name);
            }
        }
    }
    header.push(PRICE_NUMERIC_COLUMN.to_owned());
    header.push(SCRAPED_AT_COLUMN.to_owned());
    header
}

/// Projects one row onto the batch header, filling the derived columns.
///
/// A duplicate field name keeps its first value in `fields()` order, so
/// a data-driven product-table key colliding with a guaranteed column
/// (the catalog's table carries its own `Availability` row) cannot
/// overwrite it.
fn project_row<R: FieldRow>(row: &R, header: &[String], scraped_at: &str) -> Vec<String> {
    let mut fields: HashMap<String, String> = HashMap::new();
    for (name, value) in row.fields() {
        fields.entry(name).or_insert(value);
    }
    let price_numeric = fields
        .get(PRICE_COLUMN)
        .map(|price| normalize_price(price))
        .unwrap_or(0.0);

    header
        .iter()
        .map(|column| {
            if column == PRICE_NUMERIC_COLUMN {
                price_numeric.to_string()
            } else if column == SCRAPED_AT_COLUMN {
                scraped_at.to_owned()
            } else {
                fields.get(column).cloned().unwrap_or_default()
            }
        })
        .collect()
}

/// Reads the header row of an existing CSV file.
fn read_header(path: &Path) -> Result<Vec<String>, StoreError> {
    let mut reader = csv::Reader::from_path(path)?;
    let header = reader.headers()?;
    Ok(header.iter().map(str::to_owned).collect())
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod tests;
