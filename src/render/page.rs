use crate::core::dashboard::{ControlState, SliderSpec};
use crate::domain::model::SiteOption;

pub const PAGE_HEADING: &str = "SpaceX Launch Records Dashboard";
const SITE_PLACEHOLDER: &str = "Select a Launch Site here";

/// Escapes text for use inside HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Formats a slider value without a trailing `.0` for whole kilograms.
pub fn format_kg(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

fn site_dropdown(options: &[SiteOption], state: &ControlState) -> String {
    let mut html = format!(
        "<select id=\"site-dropdown\" name=\"site\" aria-label=\"{}\" onchange=\"this.form.submit()\">\n",
        SITE_PLACEHOLDER
    );
    for option in options {
        let selected = if option.value == state.site.value() {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "  <option value=\"{}\"{}>{}</option>\n",
            escape_html(&option.value),
            selected,
            escape_html(&option.label)
        ));
    }
    html.push_str("</select>\n");
    html
}

fn payload_slider(slider: &SliderSpec, state: &ControlState) -> String {
    let mut html = String::from("<datalist id=\"payload-marks\">\n");
    for mark in slider.marks() {
        let value = format_kg(mark);
        html.push_str(&format!(
            "  <option value=\"{}\" label=\"{}\"></option>\n",
            value, value
        ));
    }
    html.push_str("</datalist>\n");

    for (name, value) in [("min", state.range.min()), ("max", state.range.max())] {
        html.push_str(&format!(
            "<input type=\"range\" id=\"payload-slider-{name}\" name=\"{name}\" min=\"{}\" max=\"{}\" step=\"{}\" value=\"{}\" list=\"payload-marks\" onchange=\"this.form.submit()\">\n",
            format_kg(slider.min()),
            format_kg(slider.max()),
            format_kg(slider.step()),
            format_kg(value),
        ));
    }
    html.push_str(&format!(
        "<output>{} - {} kg</output>\n",
        format_kg(state.range.min()),
        format_kg(state.range.max())
    ));
    html
}

/// Full dashboard page. The charts are embedded SVG documents; the controls
/// resubmit the form so the server recomputes them for the new values.
pub fn render_page(
    options: &[SiteOption],
    slider: &SliderSpec,
    state: &ControlState,
    pie_svg: &str,
    scatter_svg: &str,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{heading}</title>
<style>
  body {{ font-family: sans-serif; margin: 2rem auto; max-width: 960px; }}
  h1 {{ text-align: center; color: #503D36; font-size: 40px; }}
  select, input[type=range] {{ width: 100%; }}
  .chart {{ margin: 1rem 0; }}
</style>
</head>
<body>
<h1>{heading}</h1>
<form method="get" action="/">
{dropdown}<br>
<div class="chart" id="success-pie-chart">
{pie}
</div>
<br>
<p>Payload range (Kg):</p>
{slider}<noscript><button type="submit">Update</button></noscript>
</form>
<div class="chart" id="success-payload-scatter-chart">
{scatter}
</div>
</body>
</html>
"#,
        heading = PAGE_HEADING,
        dropdown = site_dropdown(options, state),
        pie = pie_svg,
        slider = payload_slider(slider, state),
        scatter = scatter_svg,
    )
}
