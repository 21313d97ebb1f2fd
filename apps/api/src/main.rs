mod config;
mod errors;
mod interview;
mod oracle;
mod resume;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::oracle::{ChatCompletionClient, Oracle};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::InMemoryStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interviewer API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize oracle client
    let oracle = ChatCompletionClient::from_config(&config)?;
    info!(
        "Oracle client initialized (model: {}, base: {})",
        oracle.model(),
        config.oracle_base_url
    );

    // Sessions and profiles live for the process lifetime only
    let store = Arc::new(InMemoryStore::new());

    if let Some(dir) = &config.static_dir {
        info!("Serving frontend from {dir}");
    }

    let state = AppState {
        oracle: Arc::new(oracle),
        profiles: store.clone(),
        sessions: store,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
