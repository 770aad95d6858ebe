mod routes;
mod controllers;
mod services;
mod models;
mod api_docs;
mod shared_state;
mod config;
mod error;
mod telemetry;

use std::net::SocketAddr;
use axum::{Router, routing::get, response::Html};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use crate::routes::sizing_routes::sizing_routes;
use utoipa::OpenApi;
use utoipa_scalar::Scalar;
use crate::api_docs::ApiDoc;
use crate::shared_state::AppState;
use crate::config::Config;

const CONFIG_ENV: &str = "PV_SIZING_CONFIG";

#[tokio::main]
async fn main() {
    // 1. Load configuration
    let config_path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| "config.json".to_string());
    let (config, found) = match Config::load_or_default(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {}: {}", config_path, e);
            return;
        }
    };

    // 2. Logging
    telemetry::init_tracing(&config.logging);
    if found {
        info!(path = %config_path, "configuration loaded");
    } else {
        warn!(path = %config_path, "configuration file not found, using built-in defaults");
    }

    // 3. Shared state
    let state = AppState::new(config.defaults.clone());

    // 4. Start Axum HTTP server
    let app = Router::new()
        .nest("/api", sizing_routes(state))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("API Server listening on http://{}", addr);
    info!("Scalar UI: http://{}/scalar", addr);

    if let Err(e) = axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
    {
        error!(error = %e, "server terminated");
    }
}
