use crate::app::report::SelectionReport;
use crate::core::dashboard::{ControlEvent, Dashboard, SliderSpec};
use crate::core::filter::filter_records;
use crate::core::store::RecordStore;
use crate::domain::model::{PayloadRange, SiteSelection, REQUIRED_COLUMNS};
use crate::domain::ports::{ChartKind, Storage};
use crate::render::{SvgSurface, DEFAULT_CHART_SIZE};
use crate::utils::error::{DashError, Result};
use std::io::Write;
use std::sync::Arc;
use zip::write::{FileOptions, ZipWriter};

pub const SNAPSHOT_FILE: &str = "dashboard_snapshot.zip";

/// Writes the dashboard state for one selection as a ZIP bundle: both charts as
/// SVG, the filtered rows as CSV and a JSON summary.
pub struct SnapshotExporter<S: Storage> {
    storage: S,
    output_path: String,
    chart_size: (u32, u32),
}

impl<S: Storage> SnapshotExporter<S> {
    pub fn new(storage: S, output_path: impl Into<String>) -> Self {
        Self {
            storage,
            output_path: output_path.into(),
            chart_size: DEFAULT_CHART_SIZE,
        }
    }

    pub fn with_chart_size(mut self, chart_size: (u32, u32)) -> Self {
        self.chart_size = chart_size;
        self
    }

    /// Drives a dashboard through the requested control changes and returns the
    /// path of the written bundle.
    pub async fn export(
        &self,
        store: Arc<RecordStore>,
        slider: SliderSpec,
        site: &SiteSelection,
        range: Option<PayloadRange>,
    ) -> Result<String> {
        let mut dashboard = Dashboard::new(store, slider);
        let (pie_surface, pie_svg) = SvgSurface::new(self.chart_size);
        let (scatter_surface, scatter_svg) = SvgSurface::new(self.chart_size);
        dashboard.subscribe(ChartKind::Pie, Box::new(pie_surface));
        dashboard.subscribe(ChartKind::Scatter, Box::new(scatter_surface));

        dashboard.dispatch(ControlEvent::SiteChanged(site.clone()));
        if let Some(range) = range {
            dashboard.dispatch(ControlEvent::RangeChanged(range));
        }

        let pie_svg = pie_svg
            .latest()
            .ok_or_else(|| DashError::render("pie chart was not rendered"))?;
        let scatter_svg = scatter_svg
            .latest()
            .ok_or_else(|| DashError::render("scatter chart was not rendered"))?;
        let report = SelectionReport::from_dashboard(&dashboard);
        let filtered_csv = self.filtered_csv(&dashboard)?;

        tracing::debug!(
            "Creating snapshot with {} filtered records",
            report.filtered_records
        );

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("pie.svg", FileOptions::default())?;
            zip.write_all(pie_svg.as_bytes())?;

            zip.start_file::<_, ()>("scatter.svg", FileOptions::default())?;
            zip.write_all(scatter_svg.as_bytes())?;

            zip.start_file::<_, ()>("filtered.csv", FileOptions::default())?;
            zip.write_all(&filtered_csv)?;

            zip.start_file::<_, ()>("summary.json", FileOptions::default())?;
            zip.write_all(serde_json::to_string_pretty(&report)?.as_bytes())?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing snapshot ({} bytes) to storage", zip_data.len());
        self.storage.write_file(SNAPSHOT_FILE, &zip_data).await?;

        let output_path = format!("{}/{}", self.output_path, SNAPSHOT_FILE);
        tracing::info!("Snapshot saved to {}", output_path);
        Ok(output_path)
    }

    fn filtered_csv(&self, dashboard: &Dashboard) -> Result<Vec<u8>> {
        let state = dashboard.state();
        // Header is written up front so an empty selection still names its columns.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(REQUIRED_COLUMNS)?;
        for record in filter_records(dashboard.store().records(), &state.site, &state.range) {
            writer.serialize(record)?;
        }
        writer
            .into_inner()
            .map_err(|e| DashError::IoError(e.into_error()))
    }
}
