//! Domain types produced by catalog extraction.
//!
//! A [`Record`] is the minimal list-page extraction; a [`DetailRecord`] is
//! the richer per-book extraction from a dedicated detail page. Both are
//! immutable once built: extraction creates them, persistence projects them
//! into CSV columns via [`Record::fields`] / [`DetailRecord::fields`], and
//! nothing updates them in place afterwards.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One book as listed on a catalog page.
///
/// Only emitted when both fields were successfully located in the markup;
/// a container missing either is dropped at extraction time, never padded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    /// Currency-prefixed display text as scraped, e.g. `"£51.77"`.
    pub price: String,
}

impl Record {
    /// Ordered column name/value pairs for persistence.
    #[must_use]
    pub fn fields(&self) -> Vec<(String, String)> {
        vec![
            ("Title".to_owned(), self.title.clone()),
            ("Price".to_owned(), self.price.clone()),
        ]
    }
}

/// Star rating vocabulary used by the catalog's detail pages.
///
/// The source encodes the rating as one of five class names on the
/// star-rating element; anything outside this vocabulary is treated as
/// "no rating".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rating {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Rating {
    /// Maps a CSS class name to a rating, if it is one of the five
    /// ordinal words.
    #[must_use]
    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "One" => Some(Self::One),
            "Two" => Some(Self::Two),
            "Three" => Some(Self::Three),
            "Four" => Some(Self::Four),
            "Five" => Some(Self::Five),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::One => "One",
            Self::Two => "Two",
            Self::Three => "Three",
            Self::Four => "Four",
            Self::Five => "Five",
        }
    }
}

/// Rich extraction from a book's detail page.
///
/// `specs` carries the product information table verbatim: each row's
/// header cell becomes a key, in table order. The key set is data-driven —
/// whatever labels the page uses — so it is an ordered map rather than
/// fixed struct fields. Optional fields are absent when the page lacks
/// them, never empty placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub title: String,
    pub price: String,
    pub availability: String,
    pub specs: IndexMap<String, String>,
    pub description: Option<String>,
    pub rating: Option<Rating>,
}

impl DetailRecord {
    /// Ordered column name/value pairs for persistence: the guaranteed
    /// subset first, then the product table keys in document order, then the
    /// optionals that are present.
    #[must_use]
    pub fn fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("Title".to_owned(), self.title.clone()),
            ("Price".to_owned(), self.price.clone()),
            ("Availability".to_owned(), self.availability.clone()),
        ];
        for (key, value) in &self.specs {
            fields.push((key.clone(), value.clone()));
        }
        if let Some(description) = &self.description {
            fields.push(("Description".to_owned(), description.clone()));
        }
        if let Some(rating) = self.rating {
            fields.push(("Rating".to_owned(), rating.as_str().to_owned()));
        }
        fields
    }
}

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;
