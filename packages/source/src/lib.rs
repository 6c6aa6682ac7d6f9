#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Disaster dataset loading and record store construction.
//!
//! Raw tabular rows (CSV or JSON) are classified against an explicit
//! [`schema::RowSchema`] and folded into the nested per-country
//! [`DisasterStore`](disaster_map_disaster_models::DisasterStore) by
//! [`store::build`]. [`load`] fetches the dataset from disk or HTTP.

pub mod load;
pub mod parsing;
pub mod progress;
pub mod schema;
pub mod store;

/// Errors that can occur while fetching or decoding a dataset.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding failed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON decoding failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The dataset decoded but produced no usable records.
    #[error("Dataset at {location} contains no usable records")]
    NoRecords {
        /// Where the dataset was loaded from.
        location: String,
    },
}

/// A malformed row. Reported and skipped; loading continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    /// A required identifying column is absent or blank.
    #[error("row {row}: missing required field '{field}'")]
    MissingField {
        /// 1-based data row number.
        row: usize,
        /// Name of the missing column.
        field: &'static str,
    },

    /// The year column does not hold an integer.
    #[error("row {row}: invalid year '{value}'")]
    InvalidYear {
        /// 1-based data row number.
        row: usize,
        /// The offending cell text.
        value: String,
    },

    /// The disaster type is not one of the known types.
    #[error("row {row}: unknown disaster type '{value}'")]
    UnknownDisasterType {
        /// 1-based data row number.
        row: usize,
        /// The offending cell text.
        value: String,
    },
}

impl DataError {
    /// The 1-based data row the error refers to.
    #[must_use]
    pub const fn row(&self) -> usize {
        match self {
            Self::MissingField { row, .. }
            | Self::InvalidYear { row, .. }
            | Self::UnknownDisasterType { row, .. } => *row,
        }
    }
}

