#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived view types consumed by the dashboard charts.
//!
//! These are the narrow data contract between the statistic pipeline and
//! whatever renders the map, bar chart, and line chart: plain numbers keyed
//! by country, disaster type, or year.

use std::collections::BTreeMap;

use disaster_map_disaster_models::{DisasterType, Metric, Year};
use serde::{Serialize, Serializer};

/// Deaths-per-capita for one country and year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    /// Deaths divided by a known, non-zero population.
    Defined(f64),
    /// Population was missing or zero for that year.
    Undefined,
}

impl Ratio {
    /// The ratio value, or `None` when undefined.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(v),
            Self::Undefined => None,
        }
    }

    /// Whether the ratio has a value.
    #[must_use]
    pub const fn is_defined(self) -> bool {
        matches!(self, Self::Defined(_))
    }
}

/// Serialized as a number, or `null` when undefined.
impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// Ratios for one country.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRatios {
    /// Ratio per disaster year.
    pub yearly: BTreeMap<Year, Ratio>,
    /// Average ratio over the selected range, once computed. `None` means
    /// no data for this country.
    pub average: Option<f64>,
}

impl CountryRatios {
    /// Sum of every defined yearly ratio.
    #[must_use]
    pub fn defined_sum(&self) -> f64 {
        self.yearly.values().filter_map(|r| r.value()).sum()
    }
}

/// Aggregated totals for one disaster type, one bar of the bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarDatum {
    /// The disaster type this bar represents.
    #[serde(rename = "type")]
    pub disaster_type: DisasterType,
    /// Total people affected.
    pub affected: i64,
    /// Total damage.
    pub damage: i64,
    /// Total deaths.
    pub death: i64,
    /// Number of recorded (country, year) events.
    pub frequency: i64,
}

impl BarDatum {
    /// A bar with every total at zero.
    #[must_use]
    pub const fn empty(disaster_type: DisasterType) -> Self {
        Self {
            disaster_type,
            affected: 0,
            damage: 0,
            death: 0,
            frequency: 0,
        }
    }

    /// The total for `metric`.
    #[must_use]
    pub const fn value(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Affected => self.affected,
            Metric::Damage => self.damage,
            Metric::Death => self.death,
            Metric::Frequency => self.frequency,
        }
    }
}

/// One point of a yearly series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePoint {
    /// The year.
    pub year: Year,
    /// The metric total for that year.
    pub value: i64,
}

/// Choropleth data for one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDatum {
    /// Country name, matching the map topology's country names.
    pub country_name: String,
    /// Average death ratio over the selected range, `None` for no data.
    pub average_ratio: Option<f64>,
    /// `average_ratio` normalized by the maximum, in `[0, 1]`.
    pub intensity: Option<f64>,
    /// Fill colour as `#rrggbb`.
    pub fill: String,
}

/// Totals for one country, shown in the map tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySummary {
    /// Country name.
    pub country_name: String,
    /// Total deaths across every year and type.
    pub total_deaths: i64,
    /// Total people affected.
    pub total_affected: i64,
    /// Total damage.
    pub total_damage: i64,
    /// Number of (year, type) events.
    pub events: u64,
    /// First disaster year, if any.
    pub first_year: Option<Year>,
    /// Last disaster year, if any.
    pub last_year: Option<Year>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_serializes_as_number_or_null() {
        assert_eq!(serde_json::to_string(&Ratio::Defined(0.5)).unwrap(), "0.5");
        assert_eq!(serde_json::to_string(&Ratio::Undefined).unwrap(), "null");
    }

    #[test]
    fn bar_datum_selects_metric() {
        let bar = BarDatum {
            disaster_type: DisasterType::Storm,
            affected: 1,
            damage: 2,
            death: 3,
            frequency: 4,
        };
        assert_eq!(bar.value(Metric::Affected), 1);
        assert_eq!(bar.value(Metric::Damage), 2);
        assert_eq!(bar.value(Metric::Death), 3);
        assert_eq!(bar.value(Metric::Frequency), 4);

        let json = serde_json::to_value(bar).unwrap();
        assert_eq!(json["type"], "Storm");
    }

    #[test]
    fn defined_sum_skips_undefined_years() {
        let ratios = CountryRatios {
            yearly: BTreeMap::from([(1970, Ratio::Defined(0.25)), (1971, Ratio::Undefined)]),
            average: None,
        };
        assert!((ratios.defined_sum() - 0.25).abs() < f64::EPSILON);
    }
}
