//! Fingerprint lookup for a node, content property or thumbnail.
//!
//! Handles
//! `GET /api/node/{store_type}/{store_id}/{id}/fingerprints[/{name}]`, where
//! `name` is a content property (default `cm:content`) or a thumbnail name.

use axum::Json;
use axum::extract::{Path, State};
use fingerprint_core::{ContentNode, FingerprintContext, fingerprints_of, metrics, resolve};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Path parameters of the node-only route.
#[derive(Debug, Deserialize)]
pub struct NodePath {
    store_type: String,
    store_id: String,
    id: String,
}

/// Path parameters of the named property/thumbnail route.
#[derive(Debug, Deserialize)]
pub struct NamedPath {
    store_type: String,
    store_id: String,
    id: String,
    name: String,
}

/// Resolved entity as rendered to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeModel {
    node_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

/// One fingerprint of the resolved content property.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintModel {
    digest_type: String,
    digest_value: String,
}

/// Successful response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintResponse {
    node: NodeModel,
    content_property: String,
    fingerprints: Vec<FingerprintModel>,
}

impl<N: ContentNode> From<FingerprintContext<N>> for FingerprintResponse {
    fn from(ctx: FingerprintContext<N>) -> Self {
        let fingerprints = fingerprints_of(&ctx.target, &ctx.content_property)
            .into_iter()
            .map(|print| FingerprintModel {
                digest_type: print.digest_type,
                digest_value: print.digest_value,
            })
            .collect();

        Self {
            node: NodeModel {
                node_ref: ctx.target.node_ref().to_string(),
                name: ctx.target.name().map(str::to_string),
            },
            content_property: ctx.content_property,
            fingerprints,
        }
    }
}

/// Fingerprints of the node's default content property (or its `cm:content` thumbnail).
pub async fn node_fingerprints(
    State(state): State<AppState>,
    Path(path): Path<NodePath>,
) -> Result<Json<FingerprintResponse>, ApiError> {
    lookup(&state, &path.store_type, &path.store_id, &path.id, None)
}

/// Fingerprints of a named content property or thumbnail.
pub async fn named_fingerprints(
    State(state): State<AppState>,
    Path(path): Path<NamedPath>,
) -> Result<Json<FingerprintResponse>, ApiError> {
    lookup(
        &state,
        &path.store_type,
        &path.store_id,
        &path.id,
        Some(path.name.as_str()),
    )
}

fn lookup(
    state: &AppState,
    store_type: &str,
    store_id: &str,
    id: &str,
    name: Option<&str>,
) -> Result<Json<FingerprintResponse>, ApiError> {
    match resolve(&*state.repository, store_type, store_id, id, name) {
        Ok(ctx) => {
            metrics::record_resolve("resolved");
            Ok(Json(ctx.into()))
        }
        Err(err) => {
            metrics::record_resolve(err.outcome());
            Err(err.into())
        }
    }
}
