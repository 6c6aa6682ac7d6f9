//! Record store builder.
//!
//! Folds raw dataset rows into the nested per-country
//! [`DisasterStore`]: population by year, and disaster statistics by year
//! and type. A later row for the same (country, year, type) triple replaces
//! the earlier one.

use std::collections::BTreeMap;

use disaster_map_disaster_models::{
    CountryRecord, DisasterStats, DisasterStore, DisasterType, StatValue, fields,
};

use crate::DataError;
use crate::parsing::{parse_population, parse_year};
use crate::progress::{NullProgress, ProgressCallback};
use crate::schema::{ColumnKind, RowSchema};

/// Rows between progress updates.
const PROGRESS_CHUNK: usize = 1_000;

/// One raw dataset row: column header to cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: BTreeMap<String, String>,
}

impl RawRow {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a cell, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, header: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(header, value);
        self
    }

    /// Sets a cell.
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(header.into(), value.into());
    }

    /// Cell text for `header`, if present.
    #[must_use]
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells.get(header).map(String::as_str)
    }

    /// Column headers present on this row.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Iterates `(header, cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Result of building a store: the store plus every row that was skipped.
#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    /// The pristine record store.
    pub store: DisasterStore,
    /// Rows that were skipped, in input order.
    pub errors: Vec<DataError>,
}

/// Builds the record store from raw rows.
#[must_use]
pub fn build(rows: &[RawRow]) -> BuildOutcome {
    build_with_progress(rows, &NullProgress)
}

/// Builds the record store from raw rows, reporting progress.
#[must_use]
pub fn build_with_progress(rows: &[RawRow], progress: &dyn ProgressCallback) -> BuildOutcome {
    let schema = RowSchema::from_headers(rows.iter().flat_map(RawRow::headers));
    if !rows.is_empty() && !schema.has_identity_columns() {
        log::warn!(
            "Dataset is missing one of '{}', '{}', '{}'; every row will be skipped",
            fields::COUNTRY_NAME,
            fields::YEAR,
            fields::DISASTER_TYPE
        );
    }

    progress.set_total(rows.len() as u64);
    progress.set_message("Building record store".to_string());

    let mut outcome = BuildOutcome::default();

    for (i, row) in rows.iter().enumerate() {
        if let Err(e) = merge_row(&mut outcome.store, &schema, row, i + 1) {
            log::warn!("Skipping malformed row: {e}");
            outcome.errors.push(e);
        }

        if (i + 1) % PROGRESS_CHUNK == 0 {
            progress.inc(PROGRESS_CHUNK as u64);
        }
    }
    progress.inc((rows.len() % PROGRESS_CHUNK) as u64);

    log::info!(
        "Built record store: {} countries from {} rows ({} skipped)",
        outcome.store.len(),
        rows.len(),
        outcome.errors.len()
    );
    progress.finish(format!(
        "record store built -- {} countries",
        outcome.store.len()
    ));

    outcome
}

/// Reads a required identifying cell, treating blank text as missing.
fn required<'a>(row: &'a RawRow, field: &'static str, row_num: usize) -> Result<&'a str, DataError> {
    row.get(field)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(DataError::MissingField {
            row: row_num,
            field,
        })
}

fn merge_row(
    store: &mut DisasterStore,
    schema: &RowSchema,
    row: &RawRow,
    row_num: usize,
) -> Result<(), DataError> {
    let country = required(row, fields::COUNTRY_NAME, row_num)?;
    let year_raw = required(row, fields::YEAR, row_num)?;
    let year = parse_year(year_raw).ok_or_else(|| DataError::InvalidYear {
        row: row_num,
        value: year_raw.to_string(),
    })?;
    let type_raw = required(row, fields::DISASTER_TYPE, row_num)?;
    let disaster_type: DisasterType =
        type_raw
            .parse()
            .map_err(|_| DataError::UnknownDisasterType {
                row: row_num,
                value: type_raw.to_string(),
            })?;

    let record = store
        .entry(country.to_string())
        .or_insert_with(|| CountryRecord::new(country));

    let mut stats = DisasterStats::default();

    for (header, cell) in row.iter() {
        match schema.kind(header) {
            ColumnKind::Population(pop_year) => {
                if let Some(population) = parse_population(cell) {
                    record.population.insert(pop_year, population);
                }
            }
            ColumnKind::Stat => {
                stats
                    .values
                    .insert(header.to_string(), StatValue::parse(cell));
            }
            ColumnKind::CountryName | ColumnKind::Year | ColumnKind::DisasterType => {}
        }
    }

    record
        .disaster
        .entry(year)
        .or_default()
        .insert(disaster_type, stats);

    Ok(())
}
