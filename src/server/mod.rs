pub mod handlers;

use crate::core::dashboard::SliderSpec;
use crate::core::store::RecordStore;
use crate::render::DEFAULT_CHART_SIZE;
use crate::utils::error::{DashError, Result};
use crate::utils::validation::validate_socket_addr;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared by every request: the read-only store and the slider geometry.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub slider: SliderSpec,
    pub chart_size: (u32, u32),
}

impl AppState {
    pub fn new(store: Arc<RecordStore>, slider: SliderSpec) -> Self {
        Self {
            store,
            slider,
            chart_size: DEFAULT_CHART_SIZE,
        }
    }

    pub fn with_chart_size(mut self, chart_size: (u32, u32)) -> Self {
        self.chart_size = chart_size;
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/healthz", get(handlers::healthz_handler))
        .route("/api/sites", get(handlers::sites_handler))
        .route("/api/pie", get(handlers::pie_handler))
        .route("/api/scatter", get(handlers::scatter_handler))
        .route("/charts/pie.svg", get(handlers::pie_svg_handler))
        .route("/charts/scatter.svg", get(handlers::scatter_svg_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the dashboard until Ctrl-C.
pub async fn serve(state: AppState, bind: &str) -> Result<()> {
    let addr = validate_socket_addr("server.bind", bind)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Dashboard listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DashError::ServerError {
            message: e.to_string(),
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server");
}
