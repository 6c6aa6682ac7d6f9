#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Cross-filter dashboard state.
//!
//! A [`Dashboard`] owns the pristine record store, the current
//! [`Selection`], and the attached charts. Every change goes through
//! [`Dashboard::apply`], which updates the selection, re-derives every
//! view from the pristine store, and pushes the views to each chart.
//! Charts report clicks as [`Interaction`]s via [`Dashboard::handle`].

pub mod chart;
pub mod config;
pub mod selection;
pub mod views;

use std::sync::Arc;

use disaster_map_disaster_models::{DisasterStore, Metric, YearRange};

pub use chart::{Chart, ChartSet};
pub use config::{ConfigError, DashboardConfig};
pub use selection::{Interaction, Selection, SelectionEvent};
pub use views::{BarView, DashboardViews, LineView, MapView, derive_views};

/// Selection state plus the charts that render it.
#[derive(Debug)]
pub struct Dashboard {
    pristine: Arc<DisasterStore>,
    bounds: YearRange,
    default_metric: Metric,
    selection: Selection,
    views: DashboardViews,
    charts: ChartSet,
}

impl Dashboard {
    /// Creates a dashboard over `pristine` and pushes the initial views to
    /// `charts`.
    ///
    /// `bounds` is the dataset's full year range; `initial` is where the
    /// slider starts and is clamped to it.
    #[must_use]
    pub fn new(
        pristine: Arc<DisasterStore>,
        bounds: YearRange,
        initial: YearRange,
        metric: Metric,
        mut charts: ChartSet,
    ) -> Self {
        let selection = Selection::new(initial.clamp_to(bounds), metric);
        let views = derive_views(&pristine, &selection);
        charts.push(&views);

        log::info!(
            "Dashboard ready: {} countries, years {bounds}, {} charts",
            pristine.len(),
            charts.len()
        );

        Self {
            pristine,
            bounds,
            default_metric: metric,
            selection,
            views,
            charts,
        }
    }

    /// Applies one selection change, re-derives every view, and pushes the
    /// views to the charts.
    ///
    /// Views are re-derived and pushed even when the selection is
    /// unchanged.
    pub fn apply(&mut self, event: SelectionEvent) -> &DashboardViews {
        if self
            .selection
            .apply(event, self.bounds, self.default_metric)
        {
            log::debug!("Selection changed: {:?}", self.selection);
        }
        self.refresh()
    }

    /// Translates a chart gesture into selection events and applies them.
    /// Views are pushed once, after the last event.
    pub fn handle(&mut self, interaction: Interaction) -> &DashboardViews {
        log::debug!("Handling {interaction:?}");
        for event in interaction.into_events(&self.selection) {
            self.selection
                .apply(event, self.bounds, self.default_metric);
        }
        self.refresh()
    }

    fn refresh(&mut self) -> &DashboardViews {
        self.views = derive_views(&self.pristine, &self.selection);
        self.charts.push(&self.views);
        &self.views
    }

    /// The current selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The views last pushed to the charts.
    #[must_use]
    pub const fn views(&self) -> &DashboardViews {
        &self.views
    }

    /// The dataset's full year range.
    #[must_use]
    pub const fn bounds(&self) -> YearRange {
        self.bounds
    }

    /// The unfiltered store.
    #[must_use]
    pub fn pristine(&self) -> &DisasterStore {
        &self.pristine
    }
}

#[cfg(test)]
pub(crate) fn test_store() -> DisasterStore {
    use disaster_map_source::store::{RawRow, build};

    let row = |country: &str, year: &str, ty: &str, deaths: &str, affected: &str, damage: &str| {
        RawRow::new()
            .with("Country Name", country)
            .with("Year", year)
            .with("Disaster Type", ty)
            .with("Total deaths", deaths)
            .with("Total affected", affected)
            .with("Total damage", damage)
    };

    let rows = vec![
        row("Bermuda", "1970", "Storm", "5", "100", "null")
            .with("1970", "50000")
            .with("1971", "52000"),
        row("Bermuda", "1971", "Flood", "10", "null", "2000"),
        row("Chile", "1960", "Earthquake", "1655", "2000000", "550000").with("1960", "7600000"),
        row("Chile", "1962", "Flood", "null", "3000", "null"),
        row("Chile", "1965", "Drought", "0", "500", "0"),
    ];

    build(&rows).store
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use disaster_map_disaster_models::DisasterType;

    use super::*;

    fn bounds() -> YearRange {
        YearRange::new(1960, 1971).unwrap()
    }

    fn dashboard_with_log() -> (Dashboard, Rc<RefCell<Vec<BarView>>>) {
        let pushed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pushed);
        let charts = ChartSet::new().with_bar(move |view: &BarView| {
            sink.borrow_mut().push(view.clone());
        });
        let dashboard = Dashboard::new(
            Arc::new(test_store()),
            bounds(),
            bounds(),
            Metric::Death,
            charts,
        );
        (dashboard, pushed)
    }

    #[test]
    fn new_pushes_initial_views() {
        let (dashboard, pushed) = dashboard_with_log();
        assert_eq!(pushed.borrow().len(), 1);
        assert_eq!(dashboard.selection(), &Selection::new(bounds(), Metric::Death));
        assert_eq!(pushed.borrow()[0], dashboard.views().bar);
    }

    #[test]
    fn every_event_pushes_views() {
        let (mut dashboard, pushed) = dashboard_with_log();

        dashboard.apply(SelectionEvent::SetMetric(Metric::Damage));
        dashboard.apply(SelectionEvent::SetMetric(Metric::Damage));
        dashboard.handle(Interaction::BarClicked(DisasterType::Flood));

        let pushed = pushed.borrow();
        assert_eq!(pushed.len(), 4);
        assert_eq!(pushed[1].metric, Metric::Damage);
        assert_eq!(pushed[3].selected_type, Some(DisasterType::Flood));
    }

    #[test]
    fn interactions_cross_filter() {
        let (mut dashboard, _) = dashboard_with_log();

        dashboard.handle(Interaction::CountryClicked("Chile".to_string()));
        let views = dashboard.handle(Interaction::BarClicked(DisasterType::Earthquake));
        assert_eq!(views.selection.country, None);
        assert_eq!(views.selection.disaster_type, Some(DisasterType::Earthquake));

        let views = dashboard.handle(Interaction::CountryClicked("Chile".to_string()));
        assert_eq!(views.selection.country.as_deref(), Some("Chile"));
        assert_eq!(views.selection.disaster_type, Some(DisasterType::Earthquake));
        assert_eq!(views.line.counts.iter().sum::<u64>(), 1);

        let views = dashboard.handle(Interaction::ResetClicked);
        assert_eq!(views.selection, Selection::new(bounds(), Metric::Death));
    }

    #[test]
    fn slider_is_clamped_to_bounds() {
        let (mut dashboard, _) = dashboard_with_log();
        let views = dashboard.handle(Interaction::SliderChanged(1900, 1965));
        assert_eq!(views.selection.years, YearRange::new(1960, 1965).unwrap());
        assert_eq!(views.line.counts, vec![1, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn pristine_store_survives_interactions() {
        let (mut dashboard, _) = dashboard_with_log();
        let snapshot = test_store();

        dashboard.handle(Interaction::CountryClicked("Bermuda".to_string()));
        dashboard.handle(Interaction::BarClicked(DisasterType::Storm));
        dashboard.handle(Interaction::SliderChanged(1970, 1970));

        assert_eq!(dashboard.pristine(), &snapshot);
    }
}
