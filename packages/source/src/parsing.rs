//! Shared cell parsing utilities for dataset rows.
//!
//! Year, population, and JSON cell conversions used by the schema, the
//! store builder, and the loader.

use disaster_map_disaster_models::{Year, parse_int_prefix};

/// Parses a year cell (`"1970"`, `" 1970 "`). Returns `None` for blank or
/// non-numeric text.
#[must_use]
pub fn parse_year(s: &str) -> Option<Year> {
    parse_int_prefix(s).and_then(|v| Year::try_from(v).ok())
}

/// Parses a column header as a population-year column. Unlike
/// [`parse_year`], the whole header must be digits so that columns such as
/// `"2nd source"` are not mistaken for years.
#[must_use]
pub fn parse_year_header(s: &str) -> Option<Year> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parses a population cell. Returns `None` if blank, non-numeric, or
/// negative.
#[must_use]
pub fn parse_population(s: &str) -> Option<u64> {
    parse_int_prefix(s).and_then(|v| u64::try_from(v).ok())
}

/// Converts a JSON cell into the text form a CSV cell would have.
/// `null` becomes the literal `"null"` the dataset uses for unknown values.
#[must_use]
pub fn json_cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
