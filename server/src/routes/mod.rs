//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the extraction API and stitches it with Leptos SSR
//! rendering under a single Axum router. When the Leptos configuration is
//! unavailable the server still answers the API, with a JSON banner at `/`.

pub mod extract;

use std::path::PathBuf;

use axum::Router;
use axum::http::{HeaderValue, StatusCode};
use axum::response::Json;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use serde_json::{Value, json};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::CorsOrigin;
use crate::state::AppState;

/// Extraction API routes shared by the SSR app and the CLI.
pub fn api_routes(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origin);

    Router::new()
        .route("/api/extract_channel", get(extract::extract_channel))
        .route("/api/comments", get(extract::list_comments))
        .route("/api/clear_scraped_data", post(extract::clear_scraped_data))
        .route("/healthz", get(healthz))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes plus the JSON banner at `/`, used when no frontend is mounted.
pub fn api_app(state: AppState) -> Router {
    api_routes(state).route("/", get(root))
}

/// Leptos SSR frontend at `/` + API routes + `/pkg` assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // Serve Leptos static assets (WASM, CSS, JS) from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

fn cors_layer(origin: &CorsOrigin) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin {
        CorsOrigin::Any => layer.allow_origin(Any),
        CorsOrigin::Exact(origin) => match HeaderValue::from_str(origin) {
            Ok(value) => layer.allow_origin(value),
            Err(_) => {
                tracing::warn!(%origin, "invalid CORS_ALLOW_ORIGIN; allowing any origin");
                layer.allow_origin(Any)
            }
        },
    }
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "YouTube Comment Extractor API" }))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
