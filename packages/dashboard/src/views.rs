//! Views derived from the pristine store for one selection.
//!
//! Each chart filters on every dimension except its own: the map ignores
//! the selected country, the bar chart ignores the selected type, and the
//! line chart honours both. All three respect the year range.

use disaster_map_analytics::{aggregate, color, filter, ratio};
use disaster_map_analytics_models::{BarDatum, LinePoint, MapDatum};
use disaster_map_disaster_models::{DisasterStore, DisasterType, Metric, YearRange};
use serde::Serialize;

use crate::selection::Selection;

/// Choropleth data: one entry per country.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Range the averages were taken over.
    pub years: YearRange,
    /// Per-country average ratio and fill.
    pub countries: Vec<MapDatum>,
    /// Largest average ratio, 0 when no country has one.
    pub max_ratio: f64,
    /// Country highlighted on the map.
    pub selected_country: Option<String>,
}

/// Bar chart data: one bar per disaster type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarView {
    /// Totals per type, always one per known type.
    pub bars: Vec<BarDatum>,
    /// Metric the bars are sized by.
    pub metric: Metric,
    /// Highlighted bar.
    pub selected_type: Option<DisasterType>,
}

/// Line chart data: one point per year of the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    /// Range covered by the series.
    pub years: YearRange,
    /// Metric the series tracks.
    pub metric: Metric,
    /// Metric totals per year.
    pub series: Vec<LinePoint>,
    /// Event counts per year.
    pub counts: Vec<u64>,
}

/// Everything the charts need for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViews {
    /// The selection these views were derived for.
    pub selection: Selection,
    /// Choropleth view.
    pub map: MapView,
    /// Bar chart view.
    pub bar: BarView,
    /// Line chart view.
    pub line: LineView,
}

fn map_view(data: &DisasterStore, selection: &Selection) -> MapView {
    let ratios = ratio::ratios_over(data, selection.years);
    let max_ratio = ratio::max_ratio(&ratios);

    let countries = data
        .iter()
        .map(|(name, record)| {
            let average_ratio = ratios.get(name).and_then(|r| r.average);
            let intensity = color::intensity(average_ratio, max_ratio);
            MapDatum {
                country_name: record.country_name.clone(),
                average_ratio,
                intensity,
                fill: color::choropleth_fill(intensity),
            }
        })
        .collect();

    MapView {
        years: selection.years,
        countries,
        max_ratio,
        selected_country: selection.country.clone(),
    }
}

/// Derives every view from the pristine store. `pristine` is only read.
#[must_use]
pub fn derive_views(pristine: &DisasterStore, selection: &Selection) -> DashboardViews {
    let years = selection.years;
    let country = selection.country.as_deref();
    let base = filter::Filters::new().years(years);

    let map_data = filter::apply(pristine, &base.clone().disaster_type(selection.disaster_type));
    let bar_data = filter::apply(pristine, &base.clone().country(country));
    let line_data = filter::apply(
        pristine,
        &base.disaster_type(selection.disaster_type).country(country),
    );

    log::debug!(
        "Derived views for {years} (country={country:?}, type={:?}, metric={})",
        selection.disaster_type,
        selection.metric,
    );

    DashboardViews {
        selection: selection.clone(),
        map: map_view(&map_data, selection),
        bar: BarView {
            bars: aggregate::to_bar_data(&bar_data),
            metric: selection.metric,
            selected_type: selection.disaster_type,
        },
        line: LineView {
            years,
            metric: selection.metric,
            series: aggregate::to_line_series(&line_data, years, selection.metric),
            counts: aggregate::to_line_data(&line_data, years),
        },
    }
}
