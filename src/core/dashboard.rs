use crate::core::aggregator::pie_chart;
use crate::core::catalog::site_options;
use crate::core::filter::scatter_chart;
use crate::core::store::RecordStore;
use crate::domain::model::{PayloadRange, PieChart, ScatterChart, SiteOption, SiteSelection};
use crate::domain::ports::{ChartKind, ChartSurface, ChartUpdate};
use crate::utils::error::Result;
use serde::Serialize;
use std::sync::Arc;

/// Range slider geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderSpec {
    bounds: PayloadRange,
    step: f64,
}

impl SliderSpec {
    pub const DEFAULT_STEP: f64 = 1000.0;
    pub const DEFAULT_MAX: f64 = 10000.0;

    pub fn new(min: f64, max: f64, step: f64) -> Result<Self> {
        crate::utils::validation::validate_ordered_bounds("slider", min, max)?;
        crate::utils::validation::validate_positive_number("slider.step", step)?;
        Ok(Self {
            bounds: PayloadRange::new(min, max)?,
            step,
        })
    }

    /// Slider covering the observed payloads, widened outward to whole steps.
    pub fn from_observed(bounds: Option<PayloadRange>, step: f64) -> Result<Self> {
        let Some(bounds) = bounds else {
            return Self::new(0.0, Self::DEFAULT_MAX, step);
        };
        crate::utils::validation::validate_positive_number("slider.step", step)?;

        let min = (bounds.min() / step).floor() * step;
        let mut max = (bounds.max() / step).ceil() * step;
        if max <= min {
            max = min + step;
        }
        Self::new(min, max, step)
    }

    pub fn bounds(&self) -> PayloadRange {
        self.bounds
    }

    pub fn min(&self) -> f64 {
        self.bounds.min()
    }

    pub fn max(&self) -> f64 {
        self.bounds.max()
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Tick positions, one per step from `min` through `max`.
    pub fn marks(&self) -> Vec<f64> {
        let (min, max) = (self.min(), self.max());
        let count = ((max - min) / self.step).floor() as usize;
        let mut marks: Vec<f64> = (0..=count).map(|i| min + i as f64 * self.step).collect();
        if marks.last().is_some_and(|last| *last < max) {
            marks.push(max);
        }
        marks
    }
}

/// One user's control values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlState {
    pub site: SiteSelection,
    pub range: PayloadRange,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    SiteChanged(SiteSelection),
    RangeChanged(PayloadRange),
}

impl ControlEvent {
    pub fn site(value: &str) -> Self {
        Self::SiteChanged(SiteSelection::parse(value))
    }

    pub fn range(min: f64, max: f64) -> Result<Self> {
        Ok(Self::RangeChanged(PayloadRange::new(min, max)?))
    }
}

/// Both charts for the current control values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub pie: PieChart,
    pub scatter: ScatterChart,
}

/// Reacts to control changes by recomputing the affected charts and pushing
/// them to subscribed surfaces. The record store is shared; control state is
/// owned by each dashboard instance.
pub struct Dashboard {
    store: Arc<RecordStore>,
    slider: SliderSpec,
    state: ControlState,
    surfaces: Vec<(ChartKind, Box<dyn ChartSurface>)>,
}

impl Dashboard {
    /// Starts on "ALL" with the range spanning the observed payloads.
    pub fn new(store: Arc<RecordStore>, slider: SliderSpec) -> Self {
        let range = store
            .payload_bounds()
            .map(|observed| observed.clamp_to(&slider.bounds()))
            .unwrap_or_else(|| slider.bounds());
        Self {
            store,
            slider,
            state: ControlState {
                site: SiteSelection::All,
                range,
            },
            surfaces: Vec::new(),
        }
    }

    pub fn with_state(store: Arc<RecordStore>, slider: SliderSpec, site: SiteSelection, range: PayloadRange) -> Self {
        let mut dashboard = Self::new(store, slider);
        dashboard.state = ControlState {
            site,
            range: range.clamp_to(&slider.bounds()),
        };
        dashboard
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn slider(&self) -> &SliderSpec {
        &self.slider
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn site_options(&self) -> Vec<SiteOption> {
        site_options(&self.store)
    }

    pub fn subscribe(&mut self, kind: ChartKind, surface: Box<dyn ChartSurface>) {
        self.surfaces.push((kind, surface));
    }

    pub fn pie(&self) -> PieChart {
        pie_chart(&self.store, &self.state.site)
    }

    pub fn scatter(&self) -> ScatterChart {
        scatter_chart(&self.store, &self.state.site, &self.state.range)
    }

    pub fn snapshot(&self) -> DashboardView {
        DashboardView {
            pie: self.pie(),
            scatter: self.scatter(),
        }
    }

    /// Applies a control change and returns the charts it invalidated, after
    /// they have been pushed to every matching surface.
    pub fn dispatch(&mut self, event: ControlEvent) -> Vec<ChartUpdate> {
        let updates = match event {
            ControlEvent::SiteChanged(site) => {
                tracing::debug!("Site selection changed to {}", site);
                self.state.site = site;
                vec![ChartUpdate::Pie(self.pie()), ChartUpdate::Scatter(self.scatter())]
            }
            ControlEvent::RangeChanged(range) => {
                self.state.range = range.clamp_to(&self.slider.bounds());
                tracing::debug!(
                    "Payload range changed to [{}, {}]",
                    self.state.range.min(),
                    self.state.range.max()
                );
                vec![ChartUpdate::Scatter(self.scatter())]
            }
        };

        for update in &updates {
            for (kind, surface) in self.surfaces.iter_mut() {
                if *kind == update.kind() {
                    surface.rebind(update);
                }
            }
        }
        updates
    }

    /// Parses raw control values (as submitted by a form or query string) and
    /// applies them in selector-then-slider order.
    pub fn apply_controls(&mut self, site: Option<&str>, min: Option<f64>, max: Option<f64>) -> Result<Vec<ChartUpdate>> {
        let mut updates = Vec::new();
        if let Some(site) = site {
            updates.extend(self.dispatch(ControlEvent::site(site)));
        }
        if min.is_some() || max.is_some() {
            let min = min.unwrap_or(self.state.range.min());
            let max = max.unwrap_or(self.state.range.max());
            updates.extend(self.dispatch(ControlEvent::range(min, max)?));
        }
        Ok(updates)
    }
}
