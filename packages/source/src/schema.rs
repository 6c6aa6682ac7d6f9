//! Explicit column schema for disaster dataset rows.
//!
//! Each header is classified once, up front: the three identifying columns,
//! the known statistic columns, and population columns whose header is a
//! year. Rows are then read through the schema instead of inspecting every
//! field name on every row.

use std::collections::BTreeMap;

use disaster_map_disaster_models::{Year, fields};

use crate::parsing::parse_year_header;

/// How a column is interpreted by the store builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// The `Country Name` column.
    CountryName,
    /// The `Year` column.
    Year,
    /// The `Disaster Type` column.
    DisasterType,
    /// A disaster statistic, stored on the (year, type) entry.
    Stat,
    /// Population for the given year.
    Population(Year),
}

impl ColumnKind {
    /// Classifies a single header.
    #[must_use]
    pub fn of(header: &str) -> Self {
        match header {
            fields::COUNTRY_NAME => Self::CountryName,
            fields::YEAR => Self::Year,
            fields::DISASTER_TYPE => Self::DisasterType,
            h if fields::KNOWN_STATS.contains(&h) => Self::Stat,
            h => parse_year_header(h).map_or(Self::Stat, Self::Population),
        }
    }
}

/// Column classification for a whole dataset.
#[derive(Debug, Clone, Default)]
pub struct RowSchema {
    columns: BTreeMap<String, ColumnKind>,
}

impl RowSchema {
    /// Builds a schema from the dataset headers. Headers that are neither
    /// known nor year-shaped are kept as extra statistics.
    #[must_use]
    pub fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut columns = BTreeMap::new();

        for header in headers {
            let header = header.as_ref();
            if columns.contains_key(header) {
                continue;
            }
            let kind = ColumnKind::of(header);
            if kind == ColumnKind::Stat && !fields::KNOWN_STATS.contains(&header) {
                log::debug!("Treating unrecognized column '{header}' as a disaster statistic");
            }
            columns.insert(header.to_string(), kind);
        }

        let populations = columns
            .values()
            .filter(|k| matches!(k, ColumnKind::Population(_)))
            .count();
        log::debug!(
            "Schema: {} columns, {populations} population-year columns",
            columns.len()
        );

        Self { columns }
    }

    /// Looks up how `header` is interpreted. Headers not seen when the
    /// schema was built are classified on the fly.
    #[must_use]
    pub fn kind(&self, header: &str) -> ColumnKind {
        self.columns
            .get(header)
            .copied()
            .unwrap_or_else(|| ColumnKind::of(header))
    }

    /// Years that have a population column, ascending.
    #[must_use]
    pub fn population_years(&self) -> Vec<Year> {
        let mut years: Vec<Year> = self
            .columns
            .values()
            .filter_map(|k| match k {
                ColumnKind::Population(year) => Some(*year),
                _ => None,
            })
            .collect();
        years.sort_unstable();
        years
    }

    /// Whether every identifying column is present.
    #[must_use]
    pub fn has_identity_columns(&self) -> bool {
        [
            ColumnKind::CountryName,
            ColumnKind::Year,
            ColumnKind::DisasterType,
        ]
        .iter()
        .all(|needed| self.columns.values().any(|k| k == needed))
    }
}
