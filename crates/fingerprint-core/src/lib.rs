//! Core types and logic for content fingerprints.
//!
//! This crate provides:
//! - Node references (`storeType://storeId/nodeId`) and the repository capabilities
//! - Resolution of a node's content property or same-named thumbnail
//! - Content fingerprint digests and their stored text form
//! - URL rewriting overrides for the document UI, with their registry
//! - An in-memory repository loaded from JSON snapshots
//! - Prometheus metrics helpers
//! - Shared error types

mod error;
pub mod fingerprint;
pub mod memory;
pub mod metrics;
pub mod model;
mod node_ref;
pub mod resolve;
pub mod rewrite;

pub use error::{Error, Result};
pub use fingerprint::{
    ContentFingerprint, DigestType, compute_fingerprints, fingerprints_of, merge_fingerprints,
    on_content_property_update, parse_digest_types,
};
pub use memory::{MemoryRepository, NodeRecord};
pub use model::{ContentNode, PROP_CONTENT, Repository};
pub use node_ref::NodeRef;
pub use resolve::{FingerprintContext, ResolveError, resolve, resolve_node_ref};
