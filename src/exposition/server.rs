//! Prometheus scrape endpoint

use super::metrics;
use crate::{collector::Collector, error::MonitorError, network};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

pub const METRICS_PATH: &str = "/metrics";

pub fn router(collector: Arc<Collector>) -> Router {
    Router::new()
        .route(METRICS_PATH, get(scrape))
        .with_state(collector)
}

/// Each scrape runs its own collection pass and renders into its own buffer.
async fn scrape(State(collector): State<Arc<Collector>>) -> Response {
    let leases = collector.snapshot().await;
    tracing::debug!("Scrape collected {} lease(s)", leases.len());

    match metrics::render(&leases) {
        Ok(body) => ([(header::CONTENT_TYPE, metrics::content_type())], body).into_response(),
        Err(e) => {
            tracing::error!("Failed to render metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Binds `listen` and serves scrapes until the server fails.
///
/// Bind errors are returned before anything is served.
pub async fn serve(listen: &str, collector: Arc<Collector>) -> Result<(), MonitorError> {
    let listener = network::new_tokio_listener(listen)?;
    tracing::info!("listen on {}", listen);

    axum::serve(listener, router(collector)).await?;
    Ok(())
}
