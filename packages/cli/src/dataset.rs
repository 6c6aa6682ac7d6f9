//! Loads the pristine store with a progress bar.

use std::sync::Arc;

use disaster_map_cli_utils::{IndicatifProgress, MultiProgress};
use disaster_map_dashboard::DashboardConfig;
use disaster_map_disaster_models::{DisasterStore, YearRange, year_bounds};
use disaster_map_source::SourceError;
use disaster_map_source::load::{DatasetLocation, load_store};

/// A loaded dataset and its full year range.
pub struct Dataset {
    pub store: Arc<DisasterStore>,
    pub bounds: YearRange,
}

/// Loads the dataset named by `config.data_path`.
///
/// # Errors
///
/// Returns an error if the dataset cannot be fetched or decoded, or holds
/// no records.
pub async fn load(config: &DashboardConfig, multi: &MultiProgress) -> Result<Dataset, SourceError> {
    let location = DatasetLocation::parse(&config.data_path);
    let progress = IndicatifProgress::rows_bar(multi, &format!("Loading {location}"));

    let outcome = load_store(&location, &progress).await?;
    if !outcome.errors.is_empty() {
        log::warn!(
            "{} malformed rows were skipped (first: {})",
            outcome.errors.len(),
            outcome.errors[0]
        );
    }

    let bounds = year_bounds(&outcome.store).ok_or_else(|| SourceError::NoRecords {
        location: location.to_string(),
    })?;

    Ok(Dataset {
        store: Arc::new(outcome.store),
        bounds,
    })
}
