use crate::core::dashboard::Dashboard;
use crate::domain::model::{PieChart, ScatterChart, SiteOption};
use crate::render::charts::{render_pie_svg, render_scatter_svg};
use crate::render::page::render_page;
use crate::server::AppState;
use crate::utils::error::{DashError, ErrorSeverity};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

/// Control values carried in the query string. Each request is its own
/// session: missing values fall back to the dashboard defaults. Bounds stay raw
/// text here so malformed numbers are reported like any other bad range.
#[derive(Debug, Default, Deserialize)]
pub struct ControlQuery {
    pub site: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
}

fn parse_bound(name: &str, raw: Option<&str>) -> Result<Option<f64>, DashError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| DashError::InvalidRange {
            min: f64::NAN,
            max: f64::NAN,
            reason: format!("{} '{}' is not a number", name, raw),
        })
}

impl IntoResponse for DashError {
    fn into_response(self) -> Response {
        let status = match self.severity() {
            ErrorSeverity::Low => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }
        let body = serde_json::json!({
            "error": self.user_friendly_message(),
            "suggestion": self.recovery_suggestion(),
        });
        (status, Json(body)).into_response()
    }
}

fn session(state: &AppState, query: &ControlQuery) -> Result<Dashboard, DashError> {
    let min = parse_bound("min", query.min.as_deref())?;
    let max = parse_bound("max", query.max.as_deref())?;
    let mut dashboard = Dashboard::new(state.store.clone(), state.slider);
    dashboard.apply_controls(query.site.as_deref(), min, max)?;
    Ok(dashboard)
}

fn svg_response(svg: String) -> Response {
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response()
}

pub async fn index_handler(
    State(state): State<AppState>,
    Query(query): Query<ControlQuery>,
) -> Result<Html<String>, DashError> {
    let dashboard = session(&state, &query)?;
    let view = dashboard.snapshot();
    let pie_svg = render_pie_svg(&view.pie, state.chart_size)?;
    let scatter_svg = render_scatter_svg(&view.scatter, state.chart_size)?;

    Ok(Html(render_page(
        &dashboard.site_options(),
        dashboard.slider(),
        dashboard.state(),
        &pie_svg,
        &scatter_svg,
    )))
}

pub async fn sites_handler(State(state): State<AppState>) -> Json<Vec<SiteOption>> {
    Json(crate::core::catalog::site_options(&state.store))
}

pub async fn pie_handler(
    State(state): State<AppState>,
    Query(query): Query<ControlQuery>,
) -> Result<Json<PieChart>, DashError> {
    Ok(Json(session(&state, &query)?.pie()))
}

pub async fn scatter_handler(
    State(state): State<AppState>,
    Query(query): Query<ControlQuery>,
) -> Result<Json<ScatterChart>, DashError> {
    Ok(Json(session(&state, &query)?.scatter()))
}

pub async fn pie_svg_handler(
    State(state): State<AppState>,
    Query(query): Query<ControlQuery>,
) -> Result<Response, DashError> {
    let pie = session(&state, &query)?.pie();
    Ok(svg_response(render_pie_svg(&pie, state.chart_size)?))
}

pub async fn scatter_svg_handler(
    State(state): State<AppState>,
    Query(query): Query<ControlQuery>,
) -> Result<Response, DashError> {
    let scatter = session(&state, &query)?.scatter();
    Ok(svg_response(render_scatter_svg(&scatter, state.chart_size)?))
}

pub async fn healthz_handler() -> &'static str {
    "ok"
}
