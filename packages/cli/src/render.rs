//! Plain-text renderers for the dashboard views.
//!
//! Each `render_*` function is pure and returns the text block; the
//! [`TerminalMap`], [`TerminalBars`], and [`TerminalLine`] charts print
//! those blocks whenever the dashboard pushes new views.

use std::fmt::Write as _;

use disaster_map_analytics::format::{
    format_metric_value, format_ratio_per_million, format_year_range, value_format_short,
};
use disaster_map_dashboard::{BarView, Chart, LineView, MapView};

/// Width of a full-scale bar, in characters.
const BAR_WIDTH: usize = 30;

/// Countries listed by the map renderer.
const MAP_ROWS: usize = 10;

const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar(fraction: f64) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    "#".repeat((fraction * BAR_WIDTH as f64).round() as usize)
}

/// The countries with the highest average ratio, one per line.
#[must_use]
pub fn render_map(view: &MapView) -> String {
    let mut ranked: Vec<_> = view
        .countries
        .iter()
        .filter_map(|c| c.average_ratio.map(|avg| (c, avg)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let no_data = view.countries.len() - ranked.len();

    let mut out = format!(
        "Deaths per capita, {} (max {})\n",
        format_year_range(view.years),
        format_ratio_per_million(Some(view.max_ratio))
    );

    for (country, average) in ranked.iter().take(MAP_ROWS) {
        let marker = if view.selected_country.as_deref() == Some(country.country_name.as_str()) {
            '*'
        } else {
            ' '
        };
        writeln!(
            out,
            "{marker} {:<28} {:<width$} {}",
            country.country_name,
            bar(country.intensity.unwrap_or(0.0)),
            format_ratio_per_million(Some(*average)),
            width = BAR_WIDTH,
        )
        .unwrap();
    }

    if ranked.len() > MAP_ROWS {
        writeln!(out, "  ... {} more", ranked.len() - MAP_ROWS).unwrap();
    }
    if no_data > 0 {
        writeln!(out, "  {no_data} countries with no data").unwrap();
    }

    out
}

/// One bar per disaster type, scaled to the largest.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn render_bars(view: &BarView) -> String {
    let max = view
        .bars
        .iter()
        .map(|b| b.value(view.metric))
        .max()
        .unwrap_or(0);

    let mut out = format!("{}\n", view.metric.label());

    for datum in &view.bars {
        let value = datum.value(view.metric);
        let fraction = if max > 0 { value as f64 / max as f64 } else { 0.0 };
        let marker = if view.selected_type == Some(datum.disaster_type) {
            '*'
        } else {
            ' '
        };
        writeln!(
            out,
            "{marker} {:<22} {:<width$} {}",
            datum.disaster_type.to_string(),
            bar(fraction),
            format_metric_value(view.metric, value),
            width = BAR_WIDTH,
        )
        .unwrap();
    }

    out
}

/// A one-line sparkline of `values`, scaled between their min and max.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn sparkline(values: &[i64]) -> String {
    let (Some(min), Some(max)) = (values.iter().min(), values.iter().max()) else {
        return String::new();
    };
    let span = (max - min) as f64;

    values
        .iter()
        .map(|v| {
            if max == min {
                SPARKS[0]
            } else {
                let idx = ((*v - min) as f64 / span * (SPARKS.len() - 1) as f64).round() as usize;
                SPARKS[idx.min(SPARKS.len() - 1)]
            }
        })
        .collect()
}

/// The yearly series as a sparkline with its peak.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn render_line(view: &LineView) -> String {
    let values: Vec<i64> = view.series.iter().map(|p| p.value).collect();
    let peak = view.series.iter().max_by_key(|p| p.value);
    let events: u64 = view.counts.iter().sum();

    let mut out = format!(
        "{} by year, {} ({} events)\n",
        view.metric.label(),
        format_year_range(view.years),
        value_format_short(events as f64)
    );
    writeln!(
        out,
        "  {} {} {}",
        view.years.start(),
        sparkline(&values),
        view.years.end()
    )
    .unwrap();
    if let Some(peak) = peak.filter(|p| p.value > 0) {
        writeln!(
            out,
            "  peak {} in {}",
            format_metric_value(view.metric, peak.value),
            peak.year
        )
        .unwrap();
    }

    out
}

/// Prints [`render_map`] on every update.
pub struct TerminalMap;

impl Chart<MapView> for TerminalMap {
    fn update(&mut self, view: &MapView) {
        println!("{}", render_map(view));
    }
}

/// Prints [`render_bars`] on every update.
pub struct TerminalBars;

impl Chart<BarView> for TerminalBars {
    fn update(&mut self, view: &BarView) {
        println!("{}", render_bars(view));
    }
}

/// Prints [`render_line`] on every update.
pub struct TerminalLine;

impl Chart<LineView> for TerminalLine {
    fn update(&mut self, view: &LineView) {
        println!("{}", render_line(view));
    }
}

#[cfg(test)]
mod tests {
    use disaster_map_analytics_models::{BarDatum, LinePoint, MapDatum};
    use disaster_map_disaster_models::{DisasterType, Metric, YearRange};

    use super::*;

    #[test]
    fn sparkline_scales_between_min_and_max() {
        assert_eq!(sparkline(&[0, 7, 14]), "▁▅█");
        assert_eq!(sparkline(&[3, 3]), "▁▁");
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn bars_mark_selection_and_scale() {
        let mut flood = BarDatum::empty(DisasterType::Flood);
        flood.death = 10;
        let mut storm = BarDatum::empty(DisasterType::Storm);
        storm.death = 5;

        let text = render_bars(&BarView {
            bars: vec![flood, storm],
            metric: Metric::Death,
            selected_type: Some(DisasterType::Storm),
        });
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Total Death");
        assert!(lines[1].starts_with("  Flood"));
        assert!(lines[1].contains(&"#".repeat(BAR_WIDTH)));
        assert!(lines[2].starts_with("* Storm"));
        assert!(lines[2].contains(&"#".repeat(BAR_WIDTH / 2)));
        assert!(!lines[2].contains(&"#".repeat(BAR_WIDTH / 2 + 1)));
    }

    #[test]
    fn map_lists_ranked_countries_and_no_data() {
        let datum = |name: &str, avg: Option<f64>, intensity: Option<f64>| MapDatum {
            country_name: name.to_string(),
            average_ratio: avg,
            intensity,
            fill: String::new(),
        };
        let text = render_map(&MapView {
            years: YearRange::new(1970, 1971).unwrap(),
            countries: vec![
                datum("Bermuda", Some(0.0001), Some(0.5)),
                datum("Chile", Some(0.0002), Some(1.0)),
                datum("Atlantis", None, None),
            ],
            max_ratio: 0.0002,
            selected_country: Some("Bermuda".to_string()),
        });
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Deaths per capita, 1970 to 1971 (max 200.00 per million)");
        assert!(lines[1].starts_with("  Chile"));
        assert!(lines[2].starts_with("* Bermuda"));
        assert!(lines[2].ends_with("100.00 per million"));
        assert_eq!(lines[3], "  1 countries with no data");
    }

    #[test]
    fn line_reports_peak() {
        let text = render_line(&LineView {
            years: YearRange::new(1960, 1962).unwrap(),
            metric: Metric::Damage,
            series: vec![
                LinePoint { year: 1960, value: 0 },
                LinePoint { year: 1961, value: 2_500_000 },
                LinePoint { year: 1962, value: 0 },
            ],
            counts: vec![0, 2, 0],
        });

        assert!(text.starts_with("Total Damage ($) by year, 1960 to 1962 (2 events)"));
        assert!(text.contains("1960 ▁█▁ 1962"));
        assert!(text.contains("peak $2.5M in 1961"));
    }
}
