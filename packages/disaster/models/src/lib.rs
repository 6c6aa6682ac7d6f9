#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Disaster type taxonomy, display metrics, and record store types.
//!
//! This crate defines the canonical disaster taxonomy and the nested
//! per-country record structure shared by the loader, the filter and
//! statistic stages, the dashboard orchestration, and the API server.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Calendar year as it appears in the dataset.
pub type Year = i32;

/// Well-known column names of the disaster dataset.
pub mod fields {
    /// Country the row belongs to.
    pub const COUNTRY_NAME: &str = "Country Name";
    /// Year of the disaster events.
    pub const YEAR: &str = "Year";
    /// Disaster type name (one of [`super::DisasterType`]).
    pub const DISASTER_TYPE: &str = "Disaster Type";
    /// Total deaths for the (country, year, type) triple.
    pub const TOTAL_DEATHS: &str = "Total deaths";
    /// Total number of people affected.
    pub const TOTAL_AFFECTED: &str = "Total affected";
    /// Total damage in currency units.
    pub const TOTAL_DAMAGE: &str = "Total damage";
    /// Number of people injured.
    pub const INJURED: &str = "Injured";
    /// Number of people left homeless.
    pub const HOMELESS: &str = "Homeless";
    /// Number of people affected (excluding injured/homeless).
    pub const AFFECTED: &str = "Affected";
    /// Number of recorded occurrences.
    pub const OCCURRENCE: &str = "Occurrence";
    /// ISO country code.
    pub const COUNTRY_CODE: &str = "Country Code";
    /// Disaster subtype name.
    pub const DISASTER_SUBTYPE: &str = "Disaster Subtype";

    /// Non-identifying columns known to hold disaster statistics.
    pub const KNOWN_STATS: &[&str] = &[
        TOTAL_DEATHS,
        TOTAL_AFFECTED,
        TOTAL_DAMAGE,
        INJURED,
        HOMELESS,
        AFFECTED,
        OCCURRENCE,
        COUNTRY_CODE,
        DISASTER_SUBTYPE,
    ];
}

/// Natural disaster types tracked by the dataset.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum DisasterType {
    /// River, coastal, and flash floods
    #[serde(rename = "Flood")]
    #[strum(serialize = "Flood")]
    Flood,
    /// Prolonged water shortage
    #[serde(rename = "Drought")]
    #[strum(serialize = "Drought")]
    Drought,
    /// Wet mass movement of earth
    #[serde(rename = "Landslide")]
    #[strum(serialize = "Landslide")]
    Landslide,
    /// Ground shaking and tsunamis
    #[serde(rename = "Earthquake")]
    #[strum(serialize = "Earthquake")]
    Earthquake,
    /// Heat and cold waves, severe winter conditions
    #[serde(rename = "Extreme temperature")]
    #[strum(serialize = "Extreme temperature")]
    ExtremeTemperature,
    /// Locust and other insect infestations
    #[serde(rename = "Insect infestation")]
    #[strum(serialize = "Insect infestation")]
    InsectInfestation,
    /// Rockfall, subsidence, and other dry mass movement
    #[serde(rename = "Mass movement (dry)")]
    #[strum(serialize = "Mass movement (dry)")]
    MassMovementDry,
    /// Tropical cyclones, convective and extra-tropical storms
    #[serde(rename = "Storm")]
    #[strum(serialize = "Storm")]
    Storm,
    /// Bacterial, viral, and parasitic disease outbreaks
    #[serde(rename = "Epidemic")]
    #[strum(serialize = "Epidemic")]
    Epidemic,
    /// Forest and land fires
    #[serde(rename = "Wildfire")]
    #[strum(serialize = "Wildfire")]
    Wildfire,
    /// Eruptions, ash fall, lahars
    #[serde(rename = "Volcanic activity")]
    #[strum(serialize = "Volcanic activity")]
    VolcanicActivity,
    /// Animal attacks
    #[serde(rename = "Animal accident")]
    #[strum(serialize = "Animal accident")]
    AnimalAccident,
    /// Extra-terrestrial impacts
    #[serde(rename = "Impact")]
    #[strum(serialize = "Impact")]
    Impact,
}

impl DisasterType {
    /// Returns all variants of this enum in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Flood,
            Self::Drought,
            Self::Landslide,
            Self::Earthquake,
            Self::ExtremeTemperature,
            Self::InsectInfestation,
            Self::MassMovementDry,
            Self::Storm,
            Self::Epidemic,
            Self::Wildfire,
            Self::VolcanicActivity,
            Self::AnimalAccident,
            Self::Impact,
        ]
    }
}

/// The measure a chart displays.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Metric {
    /// Number of people affected
    Affected,
    /// Total damage in currency units
    Damage,
    /// Total deaths
    #[default]
    Death,
    /// Number of recorded events
    Frequency,
}

impl Metric {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Affected, Self::Damage, Self::Death, Self::Frequency]
    }

    /// Human-readable label for selectors and axis titles.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Affected => "Number of People Affected",
            Self::Damage => "Total Damage ($)",
            Self::Death => "Total Death",
            Self::Frequency => "Frequency",
        }
    }

    /// The statistic column summed for this metric, or `None` for
    /// [`Metric::Frequency`] which counts entries instead.
    #[must_use]
    pub const fn field(self) -> Option<&'static str> {
        match self {
            Self::Affected => Some(fields::TOTAL_AFFECTED),
            Self::Damage => Some(fields::TOTAL_DAMAGE),
            Self::Death => Some(fields::TOTAL_DEATHS),
            Self::Frequency => None,
        }
    }
}

/// An inclusive range of years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct YearRange {
    start: Year,
    end: Year,
}

impl YearRange {
    /// Creates a range covering `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is after `end`.
    pub const fn new(start: Year, end: Year) -> Result<Self, InvalidYearRangeError> {
        if start > end {
            return Err(InvalidYearRangeError { start, end });
        }
        Ok(Self { start, end })
    }

    /// First year of the range.
    #[must_use]
    pub const fn start(self) -> Year {
        self.start
    }

    /// Last year of the range (inclusive).
    #[must_use]
    pub const fn end(self) -> Year {
        self.end
    }

    /// Whether `year` lies within the range.
    #[must_use]
    pub const fn contains(self, year: Year) -> bool {
        year >= self.start && year <= self.end
    }

    /// Years between the first and last year, `end - start`.
    #[must_use]
    pub const fn span(self) -> u32 {
        self.end.abs_diff(self.start)
    }

    /// Number of years covered, counting both ends.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn len(self) -> usize {
        self.span() as usize + 1
    }

    /// Always `false`; a valid range covers at least one year.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        false
    }

    /// Iterates every year in the range in ascending order.
    pub fn years(self) -> impl Iterator<Item = Year> {
        self.start..=self.end
    }

    /// Narrows `self` to lie within `bounds`. Ranges entirely outside
    /// the bounds collapse onto the nearest bound.
    #[must_use]
    pub fn clamp_to(self, bounds: Self) -> Self {
        let start = self.start.clamp(bounds.start, bounds.end);
        let end = self.end.clamp(bounds.start, bounds.end);
        Self { start, end }
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Error returned when a [`YearRange`] would start after it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidYearRangeError {
    /// Requested first year.
    pub start: Year,
    /// Requested last year.
    pub end: Year,
}

impl std::fmt::Display for InvalidYearRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid year range {}-{}: start is after end",
            self.start, self.end
        )
    }
}

impl std::error::Error for InvalidYearRangeError {}

/// A single statistic cell.
///
/// Numeric-looking text is coerced to an integer; anything else, including
/// the literal `"null"` the dataset uses for unknown values, is kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    /// An integer count or amount.
    Int(i64),
    /// A non-numeric cell, kept verbatim.
    Text(String),
}

impl StatValue {
    /// Coerces raw cell text, reading the leading integer the way the
    /// dashboard always has (`"12.7"` becomes 12, `"null"` stays text).
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        parse_int_prefix(raw).map_or_else(|| Self::Text(raw.to_string()), Self::Int)
    }

    /// The integer value, or `None` for text cells.
    #[must_use]
    pub const fn as_count(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

/// Parses the leading integer of `raw`, ignoring leading whitespace and
/// anything after the digits. Returns `None` if there are no digits.
#[must_use]
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let value: i64 = digits[..len].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Statistics for one (country, year, disaster type) triple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisasterStats {
    /// Statistic column name to cell value.
    pub values: BTreeMap<String, StatValue>,
}

impl DisasterStats {
    /// Looks up a statistic cell by column name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&StatValue> {
        self.values.get(field)
    }

    /// Integer value of `field`, or `None` if absent or non-numeric.
    #[must_use]
    pub fn count(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(StatValue::as_count)
    }

    /// Integer value of `field`, treating absent or non-numeric cells as 0.
    #[must_use]
    pub fn count_or_zero(&self, field: &str) -> i64 {
        self.count(field).unwrap_or(0)
    }

    /// Total deaths, if known.
    #[must_use]
    pub fn total_deaths(&self) -> Option<i64> {
        self.count(fields::TOTAL_DEATHS)
    }

    /// Total people affected, if known.
    #[must_use]
    pub fn total_affected(&self) -> Option<i64> {
        self.count(fields::TOTAL_AFFECTED)
    }

    /// Total damage, if known.
    #[must_use]
    pub fn total_damage(&self) -> Option<i64> {
        self.count(fields::TOTAL_DAMAGE)
    }

    /// Number of recorded occurrences, if known.
    #[must_use]
    pub fn occurrence(&self) -> Option<i64> {
        self.count(fields::OCCURRENCE)
    }
}

/// Disaster statistics for one year, keyed by disaster type.
pub type YearDisasters = BTreeMap<DisasterType, DisasterStats>;

/// All data recorded for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    /// Unique country name.
    pub country_name: String,
    /// Population by year. Sparse: not every year is present.
    pub population: BTreeMap<Year, u64>,
    /// Disaster statistics by year, then by type.
    pub disaster: BTreeMap<Year, YearDisasters>,
}

impl CountryRecord {
    /// Creates an empty record for `country_name`.
    #[must_use]
    pub fn new(country_name: impl Into<String>) -> Self {
        Self {
            country_name: country_name.into(),
            population: BTreeMap::new(),
            disaster: BTreeMap::new(),
        }
    }

    /// Number of (year, type) entries recorded for this country.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.disaster.values().map(BTreeMap::len).sum()
    }

    /// Iterates every `(year, type, stats)` entry in year order.
    pub fn events(&self) -> impl Iterator<Item = (Year, DisasterType, &DisasterStats)> {
        self.disaster.iter().flat_map(|(year, by_type)| {
            by_type
                .iter()
                .map(move |(disaster_type, stats)| (*year, *disaster_type, stats))
        })
    }
}

/// The record store: every country's data keyed by country name.
pub type DisasterStore = BTreeMap<String, CountryRecord>;

/// Returns the smallest range covering every population and disaster year
/// in `store`, or `None` if the store holds no years at all.
#[must_use]
pub fn year_bounds(store: &DisasterStore) -> Option<YearRange> {
    let years = store.values().flat_map(|record| {
        record
            .population
            .keys()
            .chain(record.disaster.keys())
            .copied()
    });

    let (min, max) = years.fold(None, |acc: Option<(Year, Year)>, year| match acc {
        None => Some((year, year)),
        Some((lo, hi)) => Some((lo.min(year), hi.max(year))),
    })?;

    YearRange::new(min, max).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disaster_type_names_roundtrip() {
        for ty in DisasterType::all() {
            let parsed: DisasterType = ty.to_string().parse().unwrap();
            assert_eq!(parsed, *ty);
        }
        assert_eq!(DisasterType::all().len(), 13);
        assert_eq!(
            "Mass movement (dry)".parse::<DisasterType>().unwrap(),
            DisasterType::MassMovementDry
        );
        assert!("Meteor shower".parse::<DisasterType>().is_err());
    }

    #[test]
    fn disaster_type_serializes_as_display_name() {
        let json = serde_json::to_string(&DisasterType::ExtremeTemperature).unwrap();
        assert_eq!(json, "\"Extreme temperature\"");
    }

    #[test]
    fn metric_parses_lowercase() {
        assert_eq!("frequency".parse::<Metric>().unwrap(), Metric::Frequency);
        assert_eq!(Metric::Damage.to_string(), "damage");
        assert_eq!(Metric::Death.field(), Some(fields::TOTAL_DEATHS));
        assert_eq!(Metric::Frequency.field(), None);
    }

    #[test]
    fn year_range_rejects_inverted_bounds() {
        assert!(YearRange::new(1971, 1970).is_err());
        let range = YearRange::new(1960, 1965).unwrap();
        assert_eq!(range.len(), 6);
        assert_eq!(range.span(), 5);
        assert!(range.contains(1960));
        assert!(range.contains(1965));
        assert!(!range.contains(1966));
    }

    #[test]
    fn widest_year_range_has_a_span() {
        let range = YearRange::new(Year::MIN, Year::MAX).unwrap();
        assert_eq!(range.span(), u32::MAX);
    }

    #[test]
    fn year_range_clamps_to_bounds() {
        let bounds = YearRange::new(1960, 2015).unwrap();
        let wide = YearRange::new(1900, 2100).unwrap();
        assert_eq!(wide.clamp_to(bounds), bounds);

        let outside = YearRange::new(2020, 2030).unwrap();
        let clamped = outside.clamp_to(bounds);
        assert_eq!((clamped.start(), clamped.end()), (2015, 2015));
    }

    #[test]
    fn stat_value_coerces_integer_prefix() {
        assert_eq!(StatValue::parse("12"), StatValue::Int(12));
        assert_eq!(StatValue::parse(" 12.7"), StatValue::Int(12));
        assert_eq!(StatValue::parse("-3"), StatValue::Int(-3));
        assert_eq!(StatValue::parse("null"), StatValue::Text("null".to_string()));
        assert_eq!(StatValue::parse(""), StatValue::Text(String::new()));
        assert_eq!(StatValue::parse("-"), StatValue::Text("-".to_string()));
    }

    #[test]
    fn year_bounds_spans_population_and_disasters() {
        let mut record = CountryRecord::new("Bermuda");
        record.population.insert(1960, 44_400);
        record
            .disaster
            .entry(1987)
            .or_default()
            .insert(DisasterType::Storm, DisasterStats::default());

        let mut store = DisasterStore::new();
        assert!(year_bounds(&store).is_none());

        store.insert(record.country_name.clone(), record);
        let bounds = year_bounds(&store).unwrap();
        assert_eq!((bounds.start(), bounds.end()), (1960, 1987));
    }
}
