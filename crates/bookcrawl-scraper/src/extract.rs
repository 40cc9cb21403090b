//! Structural extraction of book records from catalog markup.
//!
//! List pages repeat a card-like `article.product_pod` container per book;
//! detail pages carry a richer, partly data-driven field set. Extraction
//! is tolerant by construction: a missing element shrinks the output (a
//! dropped record, an absent optional field, an empty list), it never
//! raises.

use scraper::{ElementRef, Html, Selector};

use bookcrawl_core::{DetailRecord, Rating, Record};

/// Parses a static CSS selector, treating an invalid pattern as
/// "matches nothing".
fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Extracts the book records from a catalog list page.
///
/// Title comes from the `title` attribute of the card's `h3 > a` link
/// (the visible link text may be truncated); price from the visible text
/// of `p.price_color`. A container missing either field contributes
/// nothing — no partial record is ever emitted, and valid records keep
/// their document order.
#[must_use]
pub fn extract_records(html: &str) -> Vec<Record> {
    if html.is_empty() {
        return Vec::new();
    }

    let (Some(card_sel), Some(link_sel), Some(price_sel)) = (
        selector("article.product_pod"),
        selector("h3 a"),
        selector("p.price_color"),
    ) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut records = Vec::new();

    for card in document.select(&card_sel) {
        let title = card
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("title"))
            .map(str::trim);
        let price = card.select(&price_sel).next().map(element_text);

        if let (Some(title), Some(price)) = (title, price) {
            records.push(Record {
                title: title.to_owned(),
                price,
            });
        }
    }

    records
}

/// Extracts detail-page hrefs from a catalog list page, in document order.
///
/// Same container scan as [`extract_records`], reading each card link's
/// `href` instead of its `title`.
#[must_use]
pub fn extract_detail_links(html: &str) -> Vec<String> {
    if html.is_empty() {
        return Vec::new();
    }

    let (Some(card_sel), Some(link_sel)) = (selector("article.product_pod"), selector("h3 a"))
    else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&card_sel)
        .filter_map(|card| {
            card.select(&link_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
                .filter(|href| !href.is_empty())
                .map(str::to_owned)
        })
        .collect()
}

/// Extracts the rich record from a book detail page.
///
/// Guaranteed fields (title, price, availability) fall back to empty
/// strings when their elements are missing; the product information
/// table contributes whatever row labels the page carries, in table
/// order; description and rating are absent when not found.
///
/// Returns `None` when the markup yields neither a title nor a price —
/// the page is not a recognizable detail page and the item should be
/// skipped.
#[must_use]
pub fn extract_detail(html: &str) -> Option<DetailRecord> {
    if html.is_empty() {
        return None;
    }

    let document = Html::parse_document(html);

    let title = selector("h1")
        .and_then(|sel| document.select(&sel).next())
        .map(element_text);
    let price = selector("p.price_color")
        .and_then(|sel| document.select(&sel).next())
        .map(element_text);

    if title.is_none() && price.is_none() {
        return None;
    }

    let availability = selector("p.instock.availability")
        .and_then(|sel| document.select(&sel).next())
        .map(element_text)
        .unwrap_or_default();

    let mut specs = indexmap::IndexMap::new();
    if let (Some(row), Some(header), Some(data)) = (
        selector("table.table.table-striped tr"),
        selector("th"),
        selector("td"),
    ) {
        for tr in document.select(&row) {
            let key = tr.select(&header).next().map(element_text);
            let value = tr.select(&data).next().map(element_text);
            if let (Some(key), Some(value)) = (key, value) {
                specs.insert(key, value);
            }
        }
    }

    let description = selector("#product_description")
        .and_then(|sel| document.select(&sel).next())
        .and_then(|marker| marker.next_siblings().find_map(ElementRef::wrap))
        .filter(|sibling| sibling.value().name() == "p")
        .map(element_text);

    let rating = selector("p.star-rating")
        .and_then(|sel| document.select(&sel).next())
        .and_then(|stars| stars.value().classes().find_map(Rating::from_class));

    Some(DetailRecord {
        title: title.unwrap_or_default(),
        price: price.unwrap_or_default(),
        availability,
        specs,
        description,
        rating,
    })
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
