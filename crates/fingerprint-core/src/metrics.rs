//! Prometheus metrics helpers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fingerprint_core::metrics::{init_metrics, start_metrics_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let handle = init_metrics();
//!     start_metrics_server(9091, handle).await.unwrap();
//!
//!     fingerprint_core::metrics::record_resolve("resolved");
//! }
//! ```
//!
//! # Metric Naming Conventions
//!
//! - Prefix: `fingerprint_`
//! - Suffix: unit or type (e.g. `_total`)
//! - Labels: low cardinality only (`outcome`, `capability`)

use axum::{Router, routing::get};
use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;

/// Resolutions by outcome (`resolved`, `node_missing`, `property_or_thumbnail_missing`).
pub const RESOLVE_TOTAL: &str = "fingerprint_resolve_total";

/// URL rewrite overrides composed over framework capabilities.
pub const OVERRIDES_INSTALLED_TOTAL: &str = "fingerprint_overrides_installed_total";

/// Initialize the Prometheus metrics recorder.
///
/// # Panics
///
/// Panics if called more than once (the recorder can only be installed once).
pub fn init_metrics() -> PrometheusHandle {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder");

    register_metrics();

    handle
}

/// Like [`init_metrics`] but returns `None` if a recorder is already installed.
pub fn try_init_metrics() -> Option<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder().ok()?;
    register_metrics();
    Some(handle)
}

/// Serve `/metrics` on `port` from a background task.
pub async fn start_metrics_server(
    port: u16,
    handle: PrometheusHandle,
) -> Result<(), std::io::Error> {
    let app = Router::new().route(
        "/metrics",
        get(move || {
            let handle = handle.clone();
            async move { handle.render() }
        }),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Metrics server listening on http://{}/metrics", addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "metrics server stopped");
        }
    });

    Ok(())
}

fn register_metrics() {
    describe_counter!(
        RESOLVE_TOTAL,
        "Node/thumbnail fingerprint resolutions (label: outcome)"
    );
    describe_counter!(
        OVERRIDES_INSTALLED_TOTAL,
        "URL rewrite overrides composed over framework capabilities (label: capability)"
    );
}

/// Count one resolution with its outcome label.
#[inline]
pub fn record_resolve(outcome: &'static str) {
    metrics::counter!(RESOLVE_TOTAL, "outcome" => outcome).increment(1);
}

/// Count one installed override.
#[inline]
pub fn record_override_installed(capability: &'static str) {
    metrics::counter!(OVERRIDES_INSTALLED_TOTAL, "capability" => capability).increment(1);
}
