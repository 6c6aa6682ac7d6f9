//! The seam between the dashboard and whatever draws it.

use crate::views::{BarView, DashboardViews, LineView, MapView};

/// Something that redraws itself from a view.
pub trait Chart<V> {
    /// Redraws from `view`. Called after every selection change.
    fn update(&mut self, view: &V);
}

impl<V, F: FnMut(&V)> Chart<V> for F {
    fn update(&mut self, view: &V) {
        self(view);
    }
}

/// Every chart attached to a dashboard, grouped by the view it consumes.
#[derive(Default)]
pub struct ChartSet {
    maps: Vec<Box<dyn Chart<MapView>>>,
    bars: Vec<Box<dyn Chart<BarView>>>,
    lines: Vec<Box<dyn Chart<LineView>>>,
}

impl ChartSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a map renderer.
    #[must_use]
    pub fn with_map(mut self, chart: impl Chart<MapView> + 'static) -> Self {
        self.maps.push(Box::new(chart));
        self
    }

    /// Attaches a bar chart renderer.
    #[must_use]
    pub fn with_bar(mut self, chart: impl Chart<BarView> + 'static) -> Self {
        self.bars.push(Box::new(chart));
        self
    }

    /// Attaches a line chart renderer.
    #[must_use]
    pub fn with_line(mut self, chart: impl Chart<LineView> + 'static) -> Self {
        self.lines.push(Box::new(chart));
        self
    }

    /// Number of attached charts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.maps.len() + self.bars.len() + self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pushes each view to the charts that consume it.
    pub fn push(&mut self, views: &DashboardViews) {
        for chart in &mut self.maps {
            chart.update(&views.map);
        }
        for chart in &mut self.bars {
            chart.update(&views.bar);
        }
        for chart in &mut self.lines {
            chart.update(&views.line);
        }
    }
}

impl std::fmt::Debug for ChartSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartSet")
            .field("maps", &self.maps.len())
            .field("bars", &self.bars.len())
            .field("lines", &self.lines.len())
            .finish()
    }
}
