use lazy_static::lazy_static;
use regex::Regex;

use crate::config::Language;

/// Pulls the numbers out of a free-text list such as `"47.1 / 10.2"` or
/// `"1500 / 4921 - 1510 / 4954"`.
///
/// The field is split on `/`, `*`, `-` and whitespace runs, and every piece
/// that parses as a finite float is kept, in order. Hyphens are always
/// delimiters, so a leading minus never survives as a sign.
pub fn numlist(field: &str) -> Vec<f64> {
    lazy_static! {
        static ref NUMLIST_DELIMITER: Regex = Regex::new(r"[/*\-]|\s+").unwrap();
    }

    NUMLIST_DELIMITER
        .split(field)
        .filter_map(|s| s.parse::<f64>().ok())
        .filter(|x| x.is_finite())
        .collect()
}

/// Splits `LO_ODS_001304 - Fiderepasshütte` into its identifier and label.
///
/// Every hyphen is a delimiter; only the first two parts are used. A field
/// without a hyphen yields an empty label.
pub fn split_location(field: &str) -> (&str, &str) {
    let mut parts = field.split('-').map(str::trim);
    let id = parts.next().unwrap_or("");
    let label = parts.next().unwrap_or("");
    (id, label)
}

pub fn split_slash(field: &str) -> Vec<&str> {
    field.split('/').map(str::trim).collect()
}

/// Picks the language variant out of a slash-delimited bilingual field.
/// Falls back to the first part when the field has no variant at that index.
pub fn pick_language(field: &str, language: Language) -> &str {
    let parts = split_slash(field);
    parts
        .get(language.index())
        .or_else(|| parts.first())
        .cloned()
        .unwrap_or("")
}

// Literal, case-sensitive substring test.
pub fn is_yes(field: &str, marker: &str) -> bool {
    field.contains(marker)
}
