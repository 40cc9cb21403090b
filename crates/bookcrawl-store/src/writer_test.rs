use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tempfile::TempDir;

use bookcrawl_core::{DetailRecord, Rating, Record};

use super::*;

fn record(title: &str, price: &str) -> Record {
    Record {
        title: title.to_owned(),
        price: price.to_owned(),
    }
}

fn csv_path(dir: &TempDir) -> PathBuf {
    dir.path().join("books.csv")
}

/// Reads the file back as (header, data rows).
fn read_back(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_owned)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_owned).collect())
        .collect();
    (header, rows)
}

#[test]
fn overwrite_writes_header_and_rows() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);

    let written = write_records(
        &[record("Alpha", "£1.50"), record("Beta", "£2.25")],
        &path,
        WriteMode::Overwrite,
    )
    .unwrap();
    assert_eq!(written, 2);

    let (header, rows) = read_back(&path);
    assert_eq!(header, vec!["Title", "Price", "Price_Numeric", "Scraped_At"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "Alpha");
    assert_eq!(rows[0][1], "£1.50");
    assert_eq!(rows[0][2], "1.5");
}

#[test]
fn overwrite_replaces_prior_contents_entirely() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);

    write_records(&[record("Old", "£9.99")], &path, WriteMode::Overwrite).unwrap();
    write_records(&[record("New", "£1.00")], &path, WriteMode::Overwrite).unwrap();

    let (_, rows) = read_back(&path);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "New");
}

#[test]
fn append_preserves_the_header_and_adds_rows() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);

    write_records(&[record("Alpha", "£1.00")], &path, WriteMode::Overwrite).unwrap();
    let written =
        write_records(&[record("Beta", "£2.00"), record("Gamma", "£3.00")], &path, WriteMode::Append)
            .unwrap();
    assert_eq!(written, 2);

    let (header, rows) = read_back(&path);
    assert_eq!(header, vec!["Title", "Price", "Price_Numeric", "Scraped_At"]);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2][0], "Gamma");
}

#[test]
fn append_to_missing_file_writes_the_header() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);

    write_records(&[record("Solo", "£4.00")], &path, WriteMode::Append).unwrap();

    let (header, rows) = read_back(&path);
    assert_eq!(header, vec!["Title", "Price", "Price_Numeric", "Scraped_At"]);
    assert_eq!(rows.len(), 1);
}

#[test]
fn append_with_drifted_schema_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);

    write_records(&[record("Alpha", "£1.00")], &path, WriteMode::Overwrite).unwrap();

    let detail = DetailRecord {
        title: "Beta".to_owned(),
        price: "£2.00".to_owned(),
        availability: "In stock".to_owned(),
        specs: IndexMap::new(),
        description: None,
        rating: None,
    };
    let result = write_records(&[detail], &path, WriteMode::Append);

    assert!(
        matches!(result, Err(StoreError::SchemaMismatch { .. })),
        "expected SchemaMismatch, got: {result:?}"
    );
    // Rejected append leaves the file untouched.
    let (_, rows) = read_back(&path);
    assert_eq!(rows.len(), 1);
}

#[test]
fn empty_batch_is_an_error_and_touches_nothing() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);

    let result = write_records::<Record>(&[], &path, WriteMode::Overwrite);
    assert!(matches!(result, Err(StoreError::NoData)));
    assert!(!path.exists());
}

#[test]
fn price_numeric_degrades_to_zero_on_unparsable_price() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);

    write_records(&[record("Weird", "priceless")], &path, WriteMode::Overwrite).unwrap();

    let (_, rows) = read_back(&path);
    assert_eq!(rows[0][2], "0");
}

#[test]
fn scraped_at_is_one_stamp_for_the_whole_batch() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);

    write_records(
        &[record("A", "£1.00"), record("B", "£2.00")],
        &path,
        WriteMode::Overwrite,
    )
    .unwrap();

    let (_, rows) = read_back(&path);
    assert_eq!(rows[0][3], rows[1][3]);
    // Second-resolution local format: "YYYY-MM-DD HH:MM:SS".
    assert_eq!(rows[0][3].len(), 19);
}

#[test]
fn detail_batch_header_is_the_union_of_row_columns() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);

    let mut specs = IndexMap::new();
    specs.insert("UPC".to_owned(), "abc".to_owned());
    let with_description = DetailRecord {
        title: "First".to_owned(),
        price: "£1.00".to_owned(),
        availability: "In stock".to_owned(),
        specs: specs.clone(),
        description: Some("Has one.".to_owned()),
        rating: Some(Rating::Two),
    };
    let without_description = DetailRecord {
        title: "Second".to_owned(),
        price: "£2.00".to_owned(),
        availability: "In stock".to_owned(),
        specs,
        description: None,
        rating: None,
    };

    write_records(
        &[with_description, without_description],
        &path,
        WriteMode::Overwrite,
    )
    .unwrap();

    let (header, rows) = read_back(&path);
    assert_eq!(
        header,
        vec![
            "Title",
            "Price",
            "Availability",
            "UPC",
            "Description",
            "Rating",
            "Price_Numeric",
            "Scraped_At"
        ]
    );
    // The row without optionals gets empty cells, not shifted columns.
    assert_eq!(rows[1][4], "");
    assert_eq!(rows[1][5], "");
}

#[test]
fn product_table_availability_row_cannot_overwrite_the_guaranteed_column() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);

    // The live catalog's product table repeats Availability with its own
    // phrasing; the guaranteed column's value must win.
    let mut specs = IndexMap::new();
    specs.insert("UPC".to_owned(), "abc".to_owned());
    specs.insert("Availability".to_owned(), "In stock (22 available)".to_owned());
    let detail = DetailRecord {
        title: "Duplicated".to_owned(),
        price: "£7.00".to_owned(),
        availability: "In stock".to_owned(),
        specs,
        description: None,
        rating: None,
    };

    write_records(&[detail], &path, WriteMode::Overwrite).unwrap();

    let (header, rows) = read_back(&path);
    let availability = header.iter().position(|h| h == "Availability").unwrap();
    assert_eq!(rows[0][availability], "In stock");
    // Availability appears once in the header, not twice.
    assert_eq!(header.iter().filter(|h| *h == "Availability").count(), 1);
}

#[test]
fn detail_round_trip_preserves_every_original_value() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);

    let mut specs = IndexMap::new();
    specs.insert("UPC".to_owned(), "a897fe39b1053632".to_owned());
    specs.insert("Product Type".to_owned(), "Books".to_owned());
    let details = vec![
        DetailRecord {
            title: "A Light in the Attic".to_owned(),
            price: "£51.77".to_owned(),
            availability: "In stock (22 available)".to_owned(),
            specs: specs.clone(),
            description: Some("A classic.".to_owned()),
            rating: Some(Rating::Three),
        },
        DetailRecord {
            title: "Soumission".to_owned(),
            price: "£50.10".to_owned(),
            availability: "In stock (20 available)".to_owned(),
            specs,
            description: Some("A novel.".to_owned()),
            rating: Some(Rating::One),
        },
    ];

    write_records(&details, &path, WriteMode::Overwrite).unwrap();

    let (header, rows) = read_back(&path);
    assert_eq!(rows.len(), details.len());
    for (row, detail) in rows.iter().zip(&details) {
        for (name, value) in detail.fields() {
            let index = header.iter().position(|h| *h == name).unwrap();
            assert_eq!(row[index], value, "column {name} drifted");
        }
    }
}
