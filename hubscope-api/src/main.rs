//! HTTP service exposing model listing, enrichment, and context reports.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod cache;
mod error;
mod handlers;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use hubscope_fetch::{FetchContext, FetchSettings};
use hubscope_providers::token_from_env;

use crate::cache::ListingCache;
use crate::routes::{create_router, AppState, ServiceConfig};

#[derive(Parser)]
#[command(name = "hubscope-api", about = "HubScope REST API server", version)]
struct Cli {
    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Listing cache lifetime in seconds
    #[arg(long, default_value_t = 300)]
    cache_ttl: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log_level.as_str())
        .init();

    let mut settings = FetchSettings::default();
    if let Some(token) = token_from_env() {
        tracing::info!("Using Hugging Face token from environment");
        settings = settings.with_token(token);
    }
    let ctx = FetchContext::with_settings(settings).context("Failed to build HTTP client")?;

    let state = AppState {
        ctx: Arc::new(ctx),
        cache: Arc::new(ListingCache::new(Duration::from_secs(cli.cache_ttl))),
        config: Arc::new(ServiceConfig::default()),
    };
    let app = create_router(state);

    let addr = SocketAddr::new(cli.host.parse().context("Invalid host address")?, cli.port);
    tracing::info!(addr = %addr, "Starting API server");

    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind API server")?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
