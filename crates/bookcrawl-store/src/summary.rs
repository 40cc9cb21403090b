//! Descriptive summary of a persisted CSV file.
//!
//! Reloads the file and reports row count, column names, per-column
//! inferred types, descriptive statistics over `Price_Numeric` when that
//! column exists, and a preview of the first rows. Read failures are
//! ordinary errors for the caller to log — a missing or malformed file
//! never panics the pipeline.

use std::fmt;
use std::path::Path;

use crate::error::StoreError;
use crate::writer::PRICE_NUMERIC_COLUMN;

const PREVIEW_ROWS: usize = 5;

/// Inferred storage type of one CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "integer"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Text => write!(f, "text"),
        }
    }
}

/// Descriptive statistics over the `Price_Numeric` column.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n-1); `0.0` for fewer than two values.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// Everything [`read_summary`] reports about a persisted file.
#[derive(Debug, Clone)]
pub struct CsvSummary {
    pub rows: usize,
    pub columns: Vec<String>,
    pub column_types: Vec<ColumnType>,
    pub price_stats: Option<PriceStats>,
    pub preview: Vec<Vec<String>>,
}

/// Reloads `path` and builds its [`CsvSummary`].
///
/// # Errors
///
/// - [`StoreError::MissingFile`] — `path` does not exist.
/// - [`StoreError::Csv`] — the file does not parse as CSV.
pub fn read_summary(path: &Path) -> Result<CsvSummary, StoreError> {
    if !path.exists() {
        return Err(StoreError::MissingFile(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let columns: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_owned).collect());
    }

    let column_types = columns
        .iter()
        .enumerate()
        .map(|(index, _)| infer_column_type(&rows, index))
        .collect();

    let price_stats = columns
        .iter()
        .position(|c| c == PRICE_NUMERIC_COLUMN)
        .and_then(|index| price_stats(&rows, index));

    let preview = rows.iter().take(PREVIEW_ROWS).cloned().collect();

    Ok(CsvSummary {
        rows: rows.len(),
        columns,
        column_types,
        price_stats,
        preview,
    })
}

/// Infers a column's type from its non-empty values: all integers →
/// `Integer`, all numeric → `Float`, otherwise (or all empty) → `Text`.
fn infer_column_type(rows: &[Vec<String>], index: usize) -> ColumnType {
    let values: Vec<&str> = rows
        .iter()
        .filter_map(|row| row.get(index))
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .collect();

    if values.is_empty() {
        return ColumnType::Text;
    }
    if values.iter().all(|v| v.parse::<i64>().is_ok()) {
        return ColumnType::Integer;
    }
    if values.iter().all(|v| v.parse::<f64>().is_ok()) {
        return ColumnType::Float;
    }
    ColumnType::Text
}

/// Computes [`PriceStats`] over the parseable values of column `index`.
/// Returns `None` when no value parses as a float.
fn price_stats(rows: &[Vec<String>], index: usize) -> Option<PriceStats> {
    let values: Vec<f64> = rows
        .iter()
        .filter_map(|row| row.get(index))
        .filter_map(|v| v.parse::<f64>().ok())
        .collect();

    if values.is_empty() {
        return None;
    }

    let count = values.len();
    #[allow(clippy::cast_precision_loss)]
    let n = count as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = if count < 2 {
        0.0
    } else {
        (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
    };
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(PriceStats {
        count,
        mean,
        std,
        min,
        max,
    })
}

impl fmt::Display for CsvSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total records: {}", self.rows)?;
        writeln!(f, "Columns:")?;
        for (name, column_type) in self.columns.iter().zip(&self.column_types) {
            writeln!(f, "  {name}: {column_type}")?;
        }
        if let Some(stats) = &self.price_stats {
            writeln!(f, "Price statistics:")?;
            writeln!(f, "  count: {}", stats.count)?;
            writeln!(f, "  mean:  {:.2}", stats.mean)?;
            writeln!(f, "  std:   {:.2}", stats.std)?;
            writeln!(f, "  min:   {:.2}", stats.min)?;
            writeln!(f, "  max:   {:.2}", stats.max)?;
        }
        if !self.preview.is_empty() {
            writeln!(f, "First {} records:", self.preview.len())?;
            for row in &self.preview {
                writeln!(f, "  {}", row.join(" | "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
