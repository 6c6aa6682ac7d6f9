#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the disaster map server.
//!
//! The view payloads themselves are the dashboard's view types; this crate
//! only holds the envelope types that are specific to HTTP.

use disaster_map_disaster_models::{DisasterType, Metric, YearRange};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// A metric the charts can display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMetric {
    /// Value accepted by the `metric` query parameter.
    pub id: Metric,
    /// Human-readable axis label.
    pub label: String,
}

impl From<Metric> for ApiMetric {
    fn from(metric: Metric) -> Self {
        Self {
            id: metric,
            label: metric.label().to_string(),
        }
    }
}

/// Everything a frontend needs to build its controls.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMeta {
    /// Full year range of the dataset.
    pub years: YearRange,
    /// Every known disaster type, in bar chart order.
    pub disaster_types: Vec<DisasterType>,
    /// Every selectable metric.
    pub metrics: Vec<ApiMetric>,
    /// Default metric.
    pub default_metric: Metric,
    /// Every country in the dataset, sorted.
    pub countries: Vec<String>,
}

/// Query parameters for the views endpoint.
///
/// Kept as text so invalid values can be reported as JSON errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewQueryParams {
    /// First year, defaults to the dataset's first year.
    pub start: Option<String>,
    /// Last year, defaults to the dataset's last year.
    pub end: Option<String>,
    /// Selected country name.
    pub country: Option<String>,
    /// Selected disaster type name, e.g. `Flood`.
    pub disaster_type: Option<String>,
    /// Metric id, e.g. `death`.
    pub metric: Option<String>,
}

/// Error body returned with 4xx responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// What went wrong.
    pub error: String,
}

impl ApiError {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_serializes_with_label() {
        let json = serde_json::to_value(ApiMetric::from(Metric::Damage)).unwrap();
        assert_eq!(json["id"], "damage");
        assert_eq!(json["label"], "Total Damage ($)");
    }

    #[test]
    fn query_params_use_camel_case() {
        let params: ViewQueryParams =
            serde_json::from_str(r#"{"disasterType":"Flood","start":"1970"}"#).unwrap();
        assert_eq!(params.disaster_type.as_deref(), Some("Flood"));
        assert_eq!(params.start.as_deref(), Some("1970"));
        assert!(params.metric.is_none());
    }
}
