//! SVG rendering of the pie and scatter charts.
//!
//! Both charts are drawn with [`plotters`] into an in-memory SVG document, so the
//! same output feeds the HTML page, the `/charts/*.svg` endpoints and snapshot
//! exports. Empty inputs render a chart frame with a notice instead of failing.

use crate::domain::model::{PieChart, ScatterChart};
use crate::domain::ports::{ChartSurface, ChartUpdate};
use crate::utils::error::{DashError, Result};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::sync::{Arc, Mutex};

pub const DEFAULT_CHART_SIZE: (u32, u32) = (720, 480);

const EMPTY_NOTICE: &str = "No launches match the current selection";

/// Qualitative palette; slices and booster categories cycle through it.
const PALETTE: [RGBColor; 10] = [
    RGBColor(99, 110, 250),
    RGBColor(239, 85, 59),
    RGBColor(0, 204, 150),
    RGBColor(171, 99, 250),
    RGBColor(255, 161, 90),
    RGBColor(25, 211, 243),
    RGBColor(255, 102, 146),
    RGBColor(182, 232, 128),
    RGBColor(255, 151, 255),
    RGBColor(254, 203, 82),
];

fn color_at(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

fn draw_err<E: std::fmt::Display>(e: E) -> DashError {
    DashError::render(e.to_string())
}

fn draw_notice(area: &DrawingArea<SVGBackend<'_>, Shift>) -> Result<()> {
    let (width, height) = area.dim_in_pixel();
    let style = ("sans-serif", 18)
        .into_font()
        .color(&RGBColor(120, 120, 120))
        .pos(Pos::new(HPos::Center, VPos::Center));
    area.draw(&Text::new(
        EMPTY_NOTICE,
        ((width / 2) as i32, (height / 2) as i32),
        style,
    ))
    .map_err(draw_err)
}

/// Renders a pie chart. Zero-valued slices are left out of the drawing.
pub fn render_pie_svg(chart: &PieChart, size: (u32, u32)) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        let area = root
            .titled(&chart.title, ("sans-serif", 22))
            .map_err(draw_err)?;

        let visible: Vec<_> = chart.slices.iter().filter(|s| s.value > 0).collect();
        if visible.is_empty() {
            draw_notice(&area)?;
        } else {
            let (width, height) = area.dim_in_pixel();
            let center = ((width / 2) as i32, (height / 2) as i32);
            let radius = f64::from(width.min(height)) * 0.35;
            let sizes: Vec<f64> = visible.iter().map(|s| s.value as f64).collect();
            let colors: Vec<RGBColor> = (0..visible.len()).map(color_at).collect();
            let labels: Vec<String> = visible
                .iter()
                .map(|s| format!("{} ({})", s.label, s.value))
                .collect();

            let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
            pie.label_style(("sans-serif", 14).into_font().color(&BLACK));
            pie.percentages(("sans-serif", 13).into_font().color(&WHITE));
            area.draw(&pie).map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
    }
    Ok(svg)
}

/// Horizontal span of the scatter plot: the selected range with a little padding
/// so points on the bounds stay visible.
fn x_axis_span(chart: &ScatterChart) -> (f64, f64) {
    let (min, max) = (chart.range.min(), chart.range.max());
    let pad = ((max - min) * 0.05).max(100.0);
    (min - pad, max + pad)
}

/// Renders payload mass against outcome class, one colored series per booster
/// version category.
pub fn render_scatter_svg(chart: &ScatterChart, size: (u32, u32)) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let (x_min, x_max) = x_axis_span(chart);
        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 20))
            .margin(16)
            .x_label_area_size(44)
            .y_label_area_size(48)
            .build_cartesian_2d(x_min..x_max, -0.25f64..1.25f64)
            .map_err(draw_err)?;

        ctx.configure_mesh()
            .x_desc("Payload Mass (kg)")
            .y_desc("class")
            .y_label_formatter(&|y| {
                if (y - y.round()).abs() < 1e-9 {
                    format!("{:.0}", y)
                } else {
                    String::new()
                }
            })
            .draw()
            .map_err(draw_err)?;

        for (index, category) in chart.categories().into_iter().enumerate() {
            let color = color_at(index);
            let points = chart
                .points
                .iter()
                .filter(|p| p.booster_version_category == category)
                .map(|p| Circle::new((p.payload_mass_kg, f64::from(p.class)), 5, color.filled()));

            ctx.draw_series(points)
                .map_err(draw_err)?
                .label(category)
                .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
        }

        if chart.points.is_empty() {
            draw_notice(&root)?;
        } else {
            ctx.configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
    }
    Ok(svg)
}

pub fn render_update(update: &ChartUpdate, size: (u32, u32)) -> Result<String> {
    match update {
        ChartUpdate::Pie(pie) => render_pie_svg(pie, size),
        ChartUpdate::Scatter(scatter) => render_scatter_svg(scatter, size),
    }
}

/// Chart surface that keeps the most recent rendering as an SVG document.
pub struct SvgSurface {
    size: (u32, u32),
    latest: Arc<Mutex<Option<String>>>,
}

/// Read side of an [`SvgSurface`], kept by whoever needs the rendered output.
#[derive(Clone)]
pub struct SvgHandle {
    latest: Arc<Mutex<Option<String>>>,
}

impl SvgSurface {
    pub fn new(size: (u32, u32)) -> (Self, SvgHandle) {
        let latest = Arc::new(Mutex::new(None));
        (
            Self {
                size,
                latest: latest.clone(),
            },
            SvgHandle { latest },
        )
    }
}

impl SvgHandle {
    pub fn latest(&self) -> Option<String> {
        self.latest.lock().ok().and_then(|svg| svg.clone())
    }
}

impl ChartSurface for SvgSurface {
    fn rebind(&mut self, update: &ChartUpdate) {
        match render_update(update, self.size) {
            Ok(svg) => {
                if let Ok(mut latest) = self.latest.lock() {
                    *latest = Some(svg);
                }
            }
            Err(e) => tracing::warn!("Failed to redraw {:?} chart: {}", update.kind(), e),
        }
    }
}
