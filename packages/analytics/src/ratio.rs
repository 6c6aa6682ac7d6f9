//! Death-to-population ratios for the choropleth.
//!
//! Yearly ratios divide a country's summed deaths by that year's
//! population. A missing or zero population yields [`Ratio::Undefined`],
//! which the map renders as "no data" rather than as a zero ratio.
//!
//! The average ratio divides the sum of defined yearly ratios by the
//! length of the selected range, `end - start`, not by the number of years
//! that have a ratio. Dashboards built on this data have always coloured
//! the map that way, so the divisor is kept.

use std::collections::BTreeMap;

use disaster_map_analytics_models::{CountryRatios, Ratio};
use disaster_map_disaster_models::{CountryRecord, DisasterStore, Year, YearRange};

/// Total deaths recorded for `record` in `year`, counting unknown or
/// non-numeric cells as 0.
#[must_use]
pub fn deaths_in_year(record: &CountryRecord, year: Year) -> i64 {
    record
        .disaster
        .get(&year)
        .map_or(0, |by_type| {
            by_type
                .values()
                .map(|stats| stats.total_deaths().unwrap_or(0))
                .fold(0, i64::saturating_add)
        })
}

/// The death ratio of `record` for `year`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ratio_for_year(record: &CountryRecord, year: Year) -> Ratio {
    match record.population.get(&year) {
        Some(&population) if population > 0 => {
            Ratio::Defined(deaths_in_year(record, year) as f64 / population as f64)
        }
        _ => Ratio::Undefined,
    }
}

/// Computes yearly ratios for every disaster year of every country.
/// The returned [`CountryRatios::average`] fields are left unset.
#[must_use]
pub fn compute_ratios(data: &DisasterStore) -> BTreeMap<String, CountryRatios> {
    data.iter()
        .map(|(name, record)| {
            let yearly = record
                .disaster
                .keys()
                .map(|year| (*year, ratio_for_year(record, *year)))
                .collect();
            (
                name.clone(),
                CountryRatios {
                    yearly,
                    average: None,
                },
            )
        })
        .collect()
}

/// Returns a copy of `ratios` with each country's average set over `range`.
///
/// Countries without any defined yearly ratio get no average. A
/// single-year range has a zero divisor and also yields no average.
#[must_use]
pub fn average_ratios(
    ratios: &BTreeMap<String, CountryRatios>,
    range: YearRange,
) -> BTreeMap<String, CountryRatios> {
    let divisor = f64::from(range.span());

    ratios
        .iter()
        .map(|(name, country)| {
            let has_data = country.yearly.values().any(|r| r.is_defined());
            let average = (has_data && divisor > 0.0).then(|| country.defined_sum() / divisor);
            (
                name.clone(),
                CountryRatios {
                    yearly: country.yearly.clone(),
                    average,
                },
            )
        })
        .collect()
}

/// Computes yearly ratios and averages in one step.
#[must_use]
pub fn ratios_over(data: &DisasterStore, range: YearRange) -> BTreeMap<String, CountryRatios> {
    average_ratios(&compute_ratios(data), range)
}

/// The largest average ratio across all countries, or 0 if none has one.
#[must_use]
pub fn max_ratio(ratios: &BTreeMap<String, CountryRatios>) -> f64 {
    ratios
        .values()
        .filter_map(|c| c.average)
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn bermuda_end_to_end() {
        let data = fixtures::sample_store();
        let ratios = compute_ratios(&data);
        let bermuda = &ratios["Bermuda"];

        assert!(close(bermuda.yearly[&1970].value().unwrap(), 5.0 / 50_000.0));
        assert!(close(bermuda.yearly[&1971].value().unwrap(), 10.0 / 52_000.0));
        assert!(bermuda.average.is_none());

        let averaged = average_ratios(&ratios, YearRange::new(1970, 1971).unwrap());
        let expected = (5.0 / 50_000.0 + 10.0 / 52_000.0) / 1.0;
        assert!(close(averaged["Bermuda"].average.unwrap(), expected));
    }

    #[test]
    fn missing_population_is_undefined_not_zero() {
        let data = fixtures::sample_store();
        let ratios = compute_ratios(&data);
        let chile = &ratios["Chile"];

        assert!(chile.yearly[&1960].is_defined());
        assert_eq!(chile.yearly[&1962], Ratio::Undefined);
        assert_eq!(chile.yearly[&1965], Ratio::Undefined);
    }

    #[test]
    fn zero_population_is_undefined() {
        let mut data = fixtures::sample_store();
        if let Some(bermuda) = data.get_mut("Bermuda") {
            bermuda.population.insert(1970, 0);
        }
        let ratios = compute_ratios(&data);
        assert_eq!(ratios["Bermuda"].yearly[&1970], Ratio::Undefined);
    }

    #[test]
    fn average_divides_by_range_length() {
        let data = fixtures::sample_store();
        let averaged = ratios_over(&data, YearRange::new(1960, 1970).unwrap());
        let chile = averaged["Chile"].average.unwrap();
        assert!(close(chile, (1655.0 / 7_600_000.0) / 10.0));
    }

    #[test]
    fn single_year_range_has_no_average() {
        let data = fixtures::sample_store();
        let averaged = ratios_over(&data, YearRange::new(1970, 1970).unwrap());
        assert!(averaged.values().all(|c| c.average.is_none()));
        assert!(close(max_ratio(&averaged), 0.0));
    }

    #[test]
    fn country_without_defined_ratio_has_no_average() {
        let mut data = fixtures::sample_store();
        if let Some(chile) = data.get_mut("Chile") {
            chile.population.clear();
        }
        let averaged = ratios_over(&data, YearRange::new(1960, 2015).unwrap());
        assert!(averaged["Chile"].average.is_none());
        assert!(averaged["Bermuda"].average.is_some());
    }

    #[test]
    fn widest_range_still_averages() {
        let data = fixtures::sample_store();
        let range = YearRange::new(Year::MIN, Year::MAX).unwrap();
        let averaged = ratios_over(&data, range);
        let expected = (5.0 / 50_000.0 + 10.0 / 52_000.0) / f64::from(u32::MAX);
        assert!(close(averaged["Bermuda"].average.unwrap(), expected));
    }

    #[test]
    fn huge_death_counts_saturate() {
        let max = i64::MAX.to_string();
        let mut record = disaster_map_disaster_models::CountryRecord::new("Bermuda");
        fixtures::insert(
            &mut record,
            1970,
            disaster_map_disaster_models::DisasterType::Storm,
            fixtures::stats(&max, "0", "0"),
        );
        fixtures::insert(
            &mut record,
            1970,
            disaster_map_disaster_models::DisasterType::Flood,
            fixtures::stats("1", "0", "0"),
        );
        assert_eq!(deaths_in_year(&record, 1970), i64::MAX);
    }

    #[test]
    fn max_ratio_of_empty_is_zero() {
        assert!(close(max_ratio(&BTreeMap::new()), 0.0));
    }

    #[test]
    fn max_ratio_picks_largest_average() {
        let data = fixtures::sample_store();
        let averaged = ratios_over(&data, YearRange::new(1960, 1971).unwrap());
        let bermuda = averaged["Bermuda"].average.unwrap();
        let chile = averaged["Chile"].average.unwrap();
        assert!(close(max_ratio(&averaged), bermuda.max(chile)));
    }

    #[test]
    fn unknown_deaths_count_as_zero() {
        let data = fixtures::sample_store();
        assert_eq!(deaths_in_year(&data["Chile"], 1962), 0);
        assert_eq!(deaths_in_year(&data["Chile"], 1999), 0);
    }
}
