//! The filter stage.
//!
//! Three independent filters, each over one dimension of the store, plus
//! [`apply`] which composes them in a fixed order: country, then disaster
//! type, then time. Every filter returns a new store.

use disaster_map_disaster_models::{CountryRecord, DisasterStore, DisasterType, YearRange};

/// Keeps only population and disaster entries whose year lies in `range`.
/// Countries are kept even if every entry is filtered out.
#[must_use]
pub fn filter_by_time(data: &DisasterStore, range: YearRange) -> DisasterStore {
    data.iter()
        .map(|(name, record)| {
            let filtered = CountryRecord {
                country_name: record.country_name.clone(),
                population: record
                    .population
                    .iter()
                    .filter(|(year, _)| range.contains(**year))
                    .map(|(year, pop)| (*year, *pop))
                    .collect(),
                disaster: record
                    .disaster
                    .iter()
                    .filter(|(year, _)| range.contains(**year))
                    .map(|(year, by_type)| (*year, by_type.clone()))
                    .collect(),
            };
            (name.clone(), filtered)
        })
        .collect()
}

/// Keeps only disaster entries of the given types and drops years left
/// without any. An empty `types` slice means no selection and returns an
/// unchanged copy.
#[must_use]
pub fn filter_by_disaster_type(data: &DisasterStore, types: &[DisasterType]) -> DisasterStore {
    if types.is_empty() {
        return data.clone();
    }

    data.iter()
        .map(|(name, record)| {
            let disaster = record
                .disaster
                .iter()
                .filter_map(|(year, by_type)| {
                    let kept: std::collections::BTreeMap<_, _> = by_type
                        .iter()
                        .filter(|(ty, _)| types.contains(*ty))
                        .map(|(ty, stats)| (*ty, stats.clone()))
                        .collect();
                    (!kept.is_empty()).then_some((*year, kept))
                })
                .collect();

            let filtered = CountryRecord {
                country_name: record.country_name.clone(),
                population: record.population.clone(),
                disaster,
            };
            (name.clone(), filtered)
        })
        .collect()
}

/// Keeps only the named countries. An empty `names` slice means no
/// selection and returns an unchanged copy.
#[must_use]
pub fn filter_by_countries<S: AsRef<str>>(data: &DisasterStore, names: &[S]) -> DisasterStore {
    if names.is_empty() {
        return data.clone();
    }

    data.iter()
        .filter(|(name, _)| names.iter().any(|n| n.as_ref() == name.as_str()))
        .map(|(name, record)| (name.clone(), record.clone()))
        .collect()
}

/// A combined filter over every dimension. Empty or unset dimensions do
/// not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    /// Year range to keep.
    pub years: Option<YearRange>,
    /// Disaster types to keep.
    pub disaster_types: Vec<DisasterType>,
    /// Countries to keep.
    pub countries: Vec<String>,
}

impl Filters {
    /// Filters that keep everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to `range`.
    #[must_use]
    pub fn years(mut self, range: YearRange) -> Self {
        self.years = Some(range);
        self
    }

    /// Restricts to one disaster type, or leaves types unfiltered for `None`.
    #[must_use]
    pub fn disaster_type(mut self, disaster_type: Option<DisasterType>) -> Self {
        self.disaster_types = disaster_type.into_iter().collect();
        self
    }

    /// Restricts to one country, or leaves countries unfiltered for `None`.
    #[must_use]
    pub fn country(mut self, country: Option<&str>) -> Self {
        self.countries = country.map(str::to_string).into_iter().collect();
        self
    }
}

/// Applies every dimension of `filters`, in the order country, disaster type,
/// time.
#[must_use]
pub fn apply(data: &DisasterStore, filters: &Filters) -> DisasterStore {
    let by_country = filter_by_countries(data, &filters.countries);
    let by_type = filter_by_disaster_type(&by_country, &filters.disaster_types);
    match filters.years {
        Some(range) => filter_by_time(&by_type, range),
        None => by_type,
    }
}
