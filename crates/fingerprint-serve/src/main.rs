//! Fingerprint Serve - HTTP server resolving nodes and thumbnails to fingerprints.

use axum::http::Request;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use fingerprint_core::metrics::{init_metrics, start_metrics_server};
use fingerprint_serve::{AppState, Config, router};

/// Content fingerprint server.
#[derive(Parser, Debug)]
#[command(name = "fingerprint-serve")]
#[command(about = "HTTP server resolving content nodes and thumbnails to fingerprints", long_about = None)]
struct Args {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load .env file if it exists
    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let bind_addr = config.bind_addr.clone();

    if let Some(port) = config.metrics_port {
        start_metrics_server(port, init_metrics()).await?;
    }

    let state = AppState::new(config)?;

    let app = router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "starting fingerprint server");

    axum::serve(listener, app).await?;

    Ok(())
}
