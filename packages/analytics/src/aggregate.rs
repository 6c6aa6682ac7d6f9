//! Aggregations feeding the bar chart, the line chart, and tooltips.

use std::collections::BTreeMap;

use disaster_map_analytics_models::{BarDatum, CountrySummary, LinePoint};
use disaster_map_disaster_models::{
    DisasterStats, DisasterStore, DisasterType, Metric, Year, YearRange, fields,
};

/// Totals per disaster type across every country and year.
///
/// Always returns one entry per known disaster type, in
/// [`DisasterType::all`] order, including all-zero entries for types absent
/// from `data`. Unknown cells (`"null"`, blanks) count as 0.
#[must_use]
pub fn to_bar_data(data: &DisasterStore) -> Vec<BarDatum> {
    let mut totals: BTreeMap<DisasterType, BarDatum> = DisasterType::all()
        .iter()
        .map(|ty| (*ty, BarDatum::empty(*ty)))
        .collect();

    for record in data.values() {
        for (_, disaster_type, stats) in record.events() {
            let bar = totals
                .entry(disaster_type)
                .or_insert_with(|| BarDatum::empty(disaster_type));
            bar.affected = bar
                .affected
                .saturating_add(stats.count_or_zero(fields::TOTAL_AFFECTED));
            bar.damage = bar
                .damage
                .saturating_add(stats.count_or_zero(fields::TOTAL_DAMAGE));
            bar.death = bar
                .death
                .saturating_add(stats.count_or_zero(fields::TOTAL_DEATHS));
            bar.frequency = bar.frequency.saturating_add(1);
        }
    }

    DisasterType::all()
        .iter()
        .map(|ty| totals.get(ty).copied().unwrap_or_else(|| BarDatum::empty(*ty)))
        .collect()
}

/// Number of recorded events per year of `range`, across every country and
/// disaster type. Years without events yield 0.
#[must_use]
pub fn to_line_data(data: &DisasterStore, range: YearRange) -> Vec<u64> {
    range
        .years()
        .map(|year| {
            data.values()
                .filter_map(|record| record.disaster.get(&year))
                .map(|by_type| by_type.len() as u64)
                .sum()
        })
        .collect()
}

/// Value contributed by one stats entry to `metric`.
fn metric_value(stats: &DisasterStats, metric: Metric) -> i64 {
    metric.field().map_or(1, |field| stats.count_or_zero(field))
}

/// A year-labelled series of `metric` over `range`. For
/// [`Metric::Frequency`] the values equal [`to_line_data`].
#[must_use]
pub fn to_line_series(data: &DisasterStore, range: YearRange, metric: Metric) -> Vec<LinePoint> {
    let mut by_year: BTreeMap<Year, i64> = range.years().map(|year| (year, 0)).collect();

    for record in data.values() {
        for (year, _, stats) in record.events() {
            if let Some(total) = by_year.get_mut(&year) {
                *total = total.saturating_add(metric_value(stats, metric));
            }
        }
    }

    by_year
        .into_iter()
        .map(|(year, value)| LinePoint { year, value })
        .collect()
}

/// Sum of `field` over every year and disaster type recorded for
/// `country_name`. Non-numeric cells are skipped; unknown countries total 0.
/// Totals saturate at [`i64::MAX`].
#[must_use]
pub fn get_total(data: &DisasterStore, country_name: &str, field: &str) -> i64 {
    data.get(country_name).map_or(0, |record| {
        record
            .events()
            .filter_map(|(_, _, stats)| stats.count(field))
            .fold(0, i64::saturating_add)
    })
}

/// Tooltip totals for one country, or `None` if it is not in `data`.
#[must_use]
pub fn country_summary(data: &DisasterStore, country_name: &str) -> Option<CountrySummary> {
    let record = data.get(country_name)?;

    Some(CountrySummary {
        country_name: record.country_name.clone(),
        total_deaths: get_total(data, country_name, fields::TOTAL_DEATHS),
        total_affected: get_total(data, country_name, fields::TOTAL_AFFECTED),
        total_damage: get_total(data, country_name, fields::TOTAL_DAMAGE),
        events: record.event_count() as u64,
        first_year: record.disaster.keys().next().copied(),
        last_year: record.disaster.keys().next_back().copied(),
    })
}
