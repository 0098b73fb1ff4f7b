//! Vigil API Server
//!
//! Serves the service banner and a liveness probe over HTTP. Browser
//! dashboards poll these from arbitrary origins, so CORS is wide open.

mod config;

use axum::{Json, Router, routing::get};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::ServerConfig;

/// Service banner returned from the root route.
#[derive(Debug, Serialize)]
struct RootResponse {
    message: &'static str,
}

/// Liveness probe payload.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "vigil API running",
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "vigil-api",
    })
}

fn build_router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .layer(cors)
}

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_level)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    config.log_startup();

    let app = build_router();

    let listener = tokio::net::TcpListener::bind(config.http_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
