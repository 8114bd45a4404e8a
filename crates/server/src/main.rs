use std::net::SocketAddr;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use shared::{
    error::{ApiError, ApiException, ErrorCode},
    protocol::{AnalysisReport, AnalyzeShipmentRequest},
    ANALYZE_SHIPMENT_PATH,
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;

use config::{load_settings, Settings};

#[derive(Debug, Serialize)]
struct BannerResponse {
    message: &'static str,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let app = build_router(&settings);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "demo analysis server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(settings: &Settings) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route(ANALYZE_SHIPMENT_PATH, post(http_analyze_shipment))
        .route("/analyze-shipment", post(http_analyze_shipment))
        .layer(RequestBodyLimitLayer::new(settings.max_body_bytes))
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "Logistics Multi-Agent API is running",
    })
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_analyze_shipment(
    Json(req): Json<AnalyzeShipmentRequest>,
) -> Result<Json<AnalysisReport>, (StatusCode, Json<ApiError>)> {
    api::analyze_shipment(&req).map(Json).map_err(|err| {
        warn!(tracking_id = %req.tracking_id, error = %err, "analysis rejected");
        error_response(err)
    })
}

fn error_response(err: ApiException) -> (StatusCode, Json<ApiError>) {
    let status = match err.code() {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
    };
    (status, Json(ApiError::from(err)))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
