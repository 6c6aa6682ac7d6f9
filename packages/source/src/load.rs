//! Dataset fetching and decoding.
//!
//! The dataset is read from a local path or downloaded over HTTP, decoded
//! from CSV or JSON into [`RawRow`]s, and folded into the record store.
//! This is the only asynchronous step of the pipeline; nothing downstream
//! starts until it has completed.

use std::path::PathBuf;
use std::sync::Arc;

use crate::SourceError;
use crate::parsing::json_cell_text;
use crate::progress::ProgressCallback;
use crate::store::{BuildOutcome, RawRow, build_with_progress};

/// Where a dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetLocation {
    /// A file on the local filesystem.
    Path(PathBuf),
    /// An `http://` or `https://` URL.
    Url(String),
}

impl DatasetLocation {
    /// Interprets `s` as a URL if it has an HTTP scheme, otherwise as a path.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            Self::Url(s.to_string())
        } else {
            Self::Path(PathBuf::from(s))
        }
    }

    /// Guesses the format from the file extension.
    #[must_use]
    pub fn format(&self) -> DatasetFormat {
        let name = match self {
            Self::Path(path) => path.to_string_lossy().to_ascii_lowercase(),
            Self::Url(url) => url
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .to_ascii_lowercase(),
        };
        if name.ends_with(".json") {
            DatasetFormat::Json
        } else {
            DatasetFormat::Csv
        }
    }
}

impl std::fmt::Display for DatasetLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Encoding of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// A JSON array of flat objects.
    Json,
}

/// Reads the raw bytes of a dataset.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be read or the HTTP request
/// fails or returns an error status.
pub async fn fetch_bytes(location: &DatasetLocation) -> Result<Vec<u8>, SourceError> {
    match location {
        DatasetLocation::Path(path) => {
            log::info!("Reading dataset from {}", path.display());
            Ok(tokio::fs::read(path).await?)
        }
        DatasetLocation::Url(url) => {
            log::info!("Downloading dataset from {url}");
            let response = reqwest::get(url).await?.error_for_status()?;
            let bytes = response.bytes().await?;
            log::debug!("Downloaded {} bytes from {url}", bytes.len());
            Ok(bytes.to_vec())
        }
    }
}

/// Decodes CSV bytes into rows keyed by the header row.
///
/// # Errors
///
/// Returns [`SourceError::Csv`] if the CSV is malformed.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<RawRow>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .enumerate()
            .filter_map(|(i, header)| record.get(i).map(|cell| (header.clone(), cell.to_owned())))
            .collect();
        rows.push(row);
    }

    log::debug!("Parsed {} CSV rows with {} columns", rows.len(), headers.len());
    Ok(rows)
}

/// Decodes a JSON array of flat objects into rows.
///
/// # Errors
///
/// Returns [`SourceError::Json`] if the document is not an array of objects.
pub fn parse_json(bytes: &[u8]) -> Result<Vec<RawRow>, SourceError> {
    let objects: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_slice(bytes)?;

    let rows: Vec<RawRow> = objects
        .iter()
        .map(|object| {
            object
                .iter()
                .map(|(key, value)| (key.clone(), json_cell_text(value)))
                .collect()
        })
        .collect();

    log::debug!("Parsed {} JSON rows", rows.len());
    Ok(rows)
}

/// Decodes dataset bytes in the given format.
///
/// # Errors
///
/// Returns [`SourceError`] if decoding fails.
pub fn parse_rows(bytes: &[u8], format: DatasetFormat) -> Result<Vec<RawRow>, SourceError> {
    match format {
        DatasetFormat::Csv => parse_csv(bytes),
        DatasetFormat::Json => parse_json(bytes),
    }
}

/// Fetches, decodes, and builds the pristine record store.
///
/// Malformed rows are reported in [`BuildOutcome::errors`] and skipped.
///
/// # Errors
///
/// Returns [`SourceError`] if the dataset cannot be fetched or decoded, or
/// if it yields no usable records at all.
pub async fn load_store(
    location: &DatasetLocation,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<BuildOutcome, SourceError> {
    let bytes = fetch_bytes(location).await?;
    let rows = parse_rows(&bytes, location.format())?;
    log::info!("Loaded {} rows from {location}", rows.len());

    let outcome = build_with_progress(&rows, progress.as_ref());

    if outcome.store.is_empty() {
        return Err(SourceError::NoRecords {
            location: location.to_string(),
        });
    }

    Ok(outcome)
}
