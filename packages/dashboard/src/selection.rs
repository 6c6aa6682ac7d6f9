//! The current cross-filter selection and the events that change it.

use disaster_map_disaster_models::{DisasterType, Metric, Year, YearRange};
use serde::Serialize;

/// What the user currently has selected across every chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Year range from the time slider.
    pub years: YearRange,
    /// Country clicked on the map.
    pub country: Option<String>,
    /// Disaster type clicked on the bar chart.
    pub disaster_type: Option<DisasterType>,
    /// Metric shown by the bar and line charts.
    pub metric: Metric,
}

impl Selection {
    /// The full-range selection with nothing clicked.
    #[must_use]
    pub const fn new(years: YearRange, metric: Metric) -> Self {
        Self {
            years,
            country: None,
            disaster_type: None,
            metric,
        }
    }

    /// Applies `event`, clamping year ranges to `bounds`. [`SelectionEvent::Reset`]
    /// returns to the full `bounds` with `default_metric`.
    ///
    /// Returns whether the selection changed.
    pub fn apply(
        &mut self,
        event: SelectionEvent,
        bounds: YearRange,
        default_metric: Metric,
    ) -> bool {
        let before = self.clone();

        match event {
            SelectionEvent::SetYears(range) => self.years = range.clamp_to(bounds),
            SelectionEvent::SelectCountry(country) => self.country = country,
            SelectionEvent::SelectDisasterType(disaster_type) => {
                self.disaster_type = disaster_type;
            }
            SelectionEvent::SetMetric(metric) => self.metric = metric,
            SelectionEvent::Reset => *self = Self::new(bounds, default_metric),
        }

        *self != before
    }
}

/// A change to the [`Selection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// Replace the year range. Clamped to the dataset's bounds.
    SetYears(YearRange),
    /// Select a country, or clear it with `None`.
    SelectCountry(Option<String>),
    /// Select a disaster type, or clear it with `None`.
    SelectDisasterType(Option<DisasterType>),
    /// Switch the bar and line chart metric.
    SetMetric(Metric),
    /// Return to the initial selection.
    Reset,
}

/// A user gesture reported by one of the charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// A bar of the bar chart was clicked.
    BarClicked(DisasterType),
    /// A country of the map was clicked.
    CountryClicked(String),
    /// The time slider moved. The ends may arrive in either order.
    SliderChanged(Year, Year),
    /// The metric dropdown changed.
    MetricChanged(Metric),
    /// The reset button was clicked.
    ResetClicked,
}

impl Interaction {
    /// Translates the gesture into selection events, given what is
    /// currently selected.
    ///
    /// Clicking a bar selects its type and clears the country; clicking the
    /// selected bar again clears the type. Clicking a country toggles it and
    /// leaves the disaster type alone.
    #[must_use]
    pub fn into_events(self, current: &Selection) -> Vec<SelectionEvent> {
        match self {
            Self::BarClicked(ty) => {
                if current.disaster_type == Some(ty) {
                    vec![SelectionEvent::SelectDisasterType(None)]
                } else {
                    vec![
                        SelectionEvent::SelectDisasterType(Some(ty)),
                        SelectionEvent::SelectCountry(None),
                    ]
                }
            }
            Self::CountryClicked(name) => {
                if current.country.as_deref() == Some(name.as_str()) {
                    vec![SelectionEvent::SelectCountry(None)]
                } else {
                    vec![SelectionEvent::SelectCountry(Some(name))]
                }
            }
            Self::SliderChanged(a, b) => {
                match YearRange::new(a.min(b), a.max(b)) {
                    Ok(range) => vec![SelectionEvent::SetYears(range)],
                    Err(_) => Vec::new(),
                }
            }
            Self::MetricChanged(metric) => vec![SelectionEvent::SetMetric(metric)],
            Self::ResetClicked => vec![SelectionEvent::Reset],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> YearRange {
        YearRange::new(1960, 2015).unwrap()
    }

    #[test]
    fn bar_click_selects_type_and_clears_country() {
        let mut selection = Selection::new(bounds(), Metric::Death);
        selection.country = Some("Chile".to_string());

        let events = Interaction::BarClicked(DisasterType::Flood).into_events(&selection);
        for event in events {
            selection.apply(event, bounds(), Metric::Death);
        }

        assert_eq!(selection.disaster_type, Some(DisasterType::Flood));
        assert_eq!(selection.country, None);
    }

    #[test]
    fn clicking_selected_bar_clears_type() {
        let mut selection = Selection::new(bounds(), Metric::Death);
        selection.disaster_type = Some(DisasterType::Flood);

        let events = Interaction::BarClicked(DisasterType::Flood).into_events(&selection);
        assert_eq!(events, vec![SelectionEvent::SelectDisasterType(None)]);
    }

    #[test]
    fn country_click_keeps_type_and_toggles() {
        let mut selection = Selection::new(bounds(), Metric::Death);
        selection.disaster_type = Some(DisasterType::Storm);

        for event in Interaction::CountryClicked("Bermuda".to_string()).into_events(&selection) {
            selection.apply(event, bounds(), Metric::Death);
        }
        assert_eq!(selection.country.as_deref(), Some("Bermuda"));
        assert_eq!(selection.disaster_type, Some(DisasterType::Storm));

        for event in Interaction::CountryClicked("Bermuda".to_string()).into_events(&selection) {
            selection.apply(event, bounds(), Metric::Death);
        }
        assert_eq!(selection.country, None);
    }

    #[test]
    fn slider_orders_and_clamps() {
        let mut selection = Selection::new(bounds(), Metric::Death);
        let events = Interaction::SliderChanged(2030, 1990).into_events(&selection);
        for event in events {
            selection.apply(event, bounds(), Metric::Death);
        }
        assert_eq!(selection.years, YearRange::new(1990, 2015).unwrap());
    }

    #[test]
    fn reset_restores_initial_selection() {
        let mut selection = Selection::new(bounds(), Metric::Affected);
        selection.country = Some("Chile".to_string());
        selection.metric = Metric::Damage;

        assert!(selection.apply(SelectionEvent::Reset, bounds(), Metric::Affected));
        assert_eq!(selection, Selection::new(bounds(), Metric::Affected));
        assert!(!selection.apply(SelectionEvent::Reset, bounds(), Metric::Affected));
    }
}
