//! Shared in-memory stores for unit tests.

use disaster_map_disaster_models::{
    CountryRecord, DisasterStats, DisasterStore, DisasterType, StatValue, Year,
};

/// Builds a stats entry from raw cell text, the way the loader would.
pub fn stats(deaths: &str, affected: &str, damage: &str) -> DisasterStats {
    let mut stats = DisasterStats::default();
    stats
        .values
        .insert("Total deaths".to_string(), StatValue::parse(deaths));
    stats
        .values
        .insert("Total affected".to_string(), StatValue::parse(affected));
    stats
        .values
        .insert("Total damage".to_string(), StatValue::parse(damage));
    stats
}

pub fn insert(record: &mut CountryRecord, year: Year, ty: DisasterType, entry: DisasterStats) {
    record.disaster.entry(year).or_default().insert(ty, entry);
}

/// Bermuda: storms and floods in 1970-1971 with population for both years.
/// Chile: events in 1960, 1962, and 1965 with population for 1960 only.
pub fn sample_store() -> DisasterStore {
    let mut bermuda = CountryRecord::new("Bermuda");
    bermuda.population.insert(1970, 50_000);
    bermuda.population.insert(1971, 52_000);
    insert(&mut bermuda, 1970, DisasterType::Storm, stats("5", "100", "null"));
    insert(&mut bermuda, 1971, DisasterType::Flood, stats("10", "null", "2000"));

    let mut chile = CountryRecord::new("Chile");
    chile.population.insert(1960, 7_600_000);
    insert(
        &mut chile,
        1960,
        DisasterType::Earthquake,
        stats("1655", "2000000", "550000"),
    );
    insert(&mut chile, 1962, DisasterType::Flood, stats("null", "3000", "null"));
    insert(&mut chile, 1965, DisasterType::Drought, stats("0", "500", "0"));

    DisasterStore::from([
        ("Bermuda".to_string(), bermuda),
        ("Chile".to_string(), chile),
    ])
}
