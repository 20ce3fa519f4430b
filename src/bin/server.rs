//! IsoVis comparison HTTP server

use axum::{
    extract::Json,
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use log::{info, warn};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use isovis_engine::api::{self, ApiResponse, ComparisonRequest, ModelData};
use isovis_engine::config::ServiceConfig;
use isovis_engine::error::IsoVisResult;
use isovis_engine::results::AnalysisResults;
use isovis_engine::summary::summarize;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn reply<T: Serialize>(result: IsoVisResult<T>) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = if result.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(ApiResponse::from(result)))
}

async fn comparison_summary(Json(request): Json<ComparisonRequest>) -> impl IntoResponse {
    reply(api::compare(request))
}

async fn results_summary(Json(results): Json<AnalysisResults>) -> impl IntoResponse {
    reply(Ok(summarize(&results)))
}

async fn validate_model(Json(model): Json<ModelData>) -> impl IntoResponse {
    reply(api::check_model(model))
}

fn cors_layer(config: &ServiceConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.cors_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

fn router(config: &ServiceConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/comparison/summary", post(comparison_summary))
        .route("/api/v1/results/summary", post(results_summary))
        .route("/api/v1/models/validate", post(validate_model))
        .layer(cors_layer(config))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ServiceConfig::from_env()?;
    let app = router(&config);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("IsoVis server listening on http://{}", addr);
    info!("  Health check: GET  /health");
    info!("  Comparison:   POST /api/v1/comparison/summary");
    info!("  Results:      POST /api/v1/results/summary");
    info!("  Model check:  POST /api/v1/models/validate");

    axum::serve(listener, app).await?;
    Ok(())
}
