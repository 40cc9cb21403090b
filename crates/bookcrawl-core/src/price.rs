//! Price text normalization.
//!
//! Catalog prices arrive as display text like `"£51.77"`. Persistence
//! derives a numeric column from them; that derivation must never fail the
//! pipeline, only degrade to `0.0`.

/// Currency glyphs stripped before parsing. `Â` covers the common
/// Latin-1-decoded-as-UTF-8 artifact (`"Â£51.77"`).
const CURRENCY_GLYPHS: [char; 5] = ['£', '$', '€', '¥', 'Â'];

/// Parses a currency-prefixed price string into a float.
///
/// Strips known currency glyphs and surrounding whitespace, then parses
/// the remainder as `f64`. Any parse failure — empty input, non-numeric
/// text, multiple numbers — yields `0.0` rather than an error.
#[must_use]
pub fn normalize_price(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| !CURRENCY_GLYPHS.contains(c))
        .collect();
    cleaned.trim().parse::<f64>().unwrap_or(0.0)
}
