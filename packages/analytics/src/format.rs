//! Display formatting for chart labels and tooltips.

use disaster_map_disaster_models::{Metric, YearRange};

const SUFFIXES: [&str; 3] = ["K", "M", "B"];

/// Rounds to one decimal place.
fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Short form of a number: `1500` -> `"1.5K"`, `2_000_000` -> `"2M"`,
/// `3.2e9` -> `"3.2B"`. Values under a thousand are rounded to an integer.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn value_format_short(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs.round() < 1000.0 {
        let whole = abs.round() as u64;
        if whole == 0 {
            return "0".to_string();
        }
        return format!("{sign}{whole}");
    }

    let mut tier = 0;
    let mut scaled = abs / 1000.0;
    while round1(scaled) >= 1000.0 && tier + 1 < SUFFIXES.len() {
        scaled /= 1000.0;
        tier += 1;
    }

    let text = format!("{:.1}", round1(scaled));
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{sign}{text}{}", SUFFIXES[tier])
}

/// Short form of a metric total, with a currency sign for damage.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_metric_value(metric: Metric, value: i64) -> String {
    let short = value_format_short(value as f64);
    match metric {
        Metric::Damage => format!("${short}"),
        Metric::Affected | Metric::Death | Metric::Frequency => short,
    }
}

/// A death ratio as deaths per million people, or `"no data"`.
#[must_use]
pub fn format_ratio_per_million(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) if r.is_finite() => format!("{:.2} per million", r * 1_000_000.0),
        _ => "no data".to_string(),
    }
}

/// `"1970"` for a single year, `"1960 to 2015"` otherwise.
#[must_use]
pub fn format_year_range(range: YearRange) -> String {
    if range.start() == range.end() {
        range.start().to_string()
    } else {
        format!("{} to {}", range.start(), range.end())
    }
}
