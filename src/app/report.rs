use crate::core::dashboard::Dashboard;
use crate::domain::model::{PayloadRange, PieChart, SiteSelection};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;

/// What the dashboard shows for one set of control values, in a form suitable
/// for the terminal or a JSON file.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub generated_at: DateTime<Utc>,
    pub site: SiteSelection,
    pub range: PayloadRange,
    pub total_records: usize,
    pub pie: PieChart,
    pub scatter_title: String,
    pub filtered_records: usize,
    pub filtered_successes: usize,
}

impl SelectionReport {
    pub fn from_dashboard(dashboard: &Dashboard) -> Self {
        let view = dashboard.snapshot();
        let state = dashboard.state();
        Self {
            generated_at: Utc::now(),
            site: state.site.clone(),
            range: state.range,
            total_records: dashboard.store().len(),
            filtered_successes: view.scatter.points.iter().filter(|p| p.class == 1).count(),
            filtered_records: view.scatter.points.len(),
            scatter_title: view.scatter.title,
            pie: view.pie,
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.pie.title);
        if self.pie.slices.is_empty() {
            let _ = writeln!(out, "  (no launches)");
        }
        let total = self.pie.total();
        for slice in &self.pie.slices {
            let share = if total > 0 {
                slice.value as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            let _ = writeln!(out, "  {:<20} {:>5} {:>6.1}%", slice.label, slice.value, share);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.scatter_title);
        let _ = writeln!(
            out,
            "  payload {} - {} kg: {} of {} launches, {} successful",
            self.range.min(),
            self.range.max(),
            self.filtered_records,
            self.total_records,
            self.filtered_successes
        );
        out
    }
}
