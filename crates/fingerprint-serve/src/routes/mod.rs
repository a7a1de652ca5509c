//! Route definitions for the fingerprint service.
//!
//! ## Routes
//!
//! - `GET /health` - Health check (JSON)
//! - `GET /api/node/{store_type}/{store_id}/{id}/fingerprints` - Default content property
//! - `GET /api/node/{store_type}/{store_id}/{id}/fingerprints/{name}` - Named property or thumbnail

mod fingerprints;
mod health;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

pub use self::fingerprints::FingerprintResponse;

/// Build the complete service router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/node/{store_type}/{store_id}/{id}/fingerprints",
            get(fingerprints::node_fingerprints),
        )
        .route(
            "/node/{store_type}/{store_id}/{id}/fingerprints/{name}",
            get(fingerprints::named_fingerprints),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .with_state(state)
}
