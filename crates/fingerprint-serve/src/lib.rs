//! Fingerprint Serve - HTTP endpoint for content fingerprints.
//!
//! Resolves a content node, one of its content properties, or one of its
//! thumbnails to the fingerprints of the binary payload it refers to.
//!
//! # Architecture
//!
//! - **AppState**: Shared application state (repository, configuration)
//! - **Routes**: Endpoint handlers
//! - **ApiError**: Not-found responses carry a redirect flag for the caller
//!
//! # URL Pattern
//!
//! ```text
//! GET /api/node/{store_type}/{store_id}/{id}/fingerprints[/{name}]
//! ```

pub mod config;
mod error;
mod routes;
mod state;

pub use self::config::Config;
pub use self::error::ApiError;
pub use self::routes::{FingerprintResponse, router};
pub use self::state::AppState;
