#![recursion_limit = "256"]

mod config;
mod error;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    if let Ok(path) = dotenv {
        tracing::info!(path = %path.display(), "loaded .env");
    }

    let config = config::ServerConfig::from_env();
    let port = config.port;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        ytdlp_bin = %config.ytdlp_bin,
        max_attempts = config.tuning.max_attempts,
        "extractor configured"
    );

    let source = Arc::new(services::ytdlp::YtDlp::new(config.ytdlp_bin.clone(), config.ytdlp_timeout));
    let ledger = services::ledger::Ledger::load(config.ledger_path()).await;
    let state = state::AppState::new(config, source, ledger);

    // Frontend is optional: without Leptos config the API still serves.
    let app = match routes::leptos_app(state.clone()) {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!(error = %e, "leptos frontend not configured; serving API only");
            routes::api_app(state)
        }
    };

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "comment extractor listening");
    axum::serve(listener, app).await.expect("server failed");
}
