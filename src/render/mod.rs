pub mod charts;
pub mod page;

pub use charts::{render_pie_svg, render_scatter_svg, SvgHandle, SvgSurface, DEFAULT_CHART_SIZE};
