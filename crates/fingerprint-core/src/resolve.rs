//! Node and thumbnail resolution.
//!
//! A request names a node and optionally a content property or thumbnail. The
//! property wins when the node carries it; otherwise a thumbnail of that name is
//! looked up, and its payload always lives under `cm:content`.

use thiserror::Error;

use crate::model::{ContentNode, PROP_CONTENT, Repository};
use crate::node_ref::NodeRef;

/// The resolved entity and the property holding its binary payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FingerprintContext<N> {
    /// The original node, or the thumbnail substituted for it.
    pub target: N,
    /// Content property on `target`.
    pub content_property: String,
}

/// Resolution failures. Both map to a not-found response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The reference does not resolve to any node.
    #[error("{node_ref} does not exist")]
    NodeNotFound { node_ref: NodeRef },

    /// The node has neither the named property nor a thumbnail of that name.
    #[error("Thumbnail or content property {name} of {node_ref} does not exist")]
    PropertyOrThumbnailNotFound { name: String, node_ref: NodeRef },
}

impl ResolveError {
    /// Reference of the node the request was about.
    pub fn node_ref(&self) -> &NodeRef {
        match self {
            Self::NodeNotFound { node_ref } => node_ref,
            Self::PropertyOrThumbnailNotFound { node_ref, .. } => node_ref,
        }
    }

    /// Short label used for logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::NodeNotFound { .. } => "node_missing",
            Self::PropertyOrThumbnailNotFound { .. } => "property_or_thumbnail_missing",
        }
    }
}

/// Resolve a node reference plus optional property/thumbnail name.
///
/// An absent or empty name means `cm:content`.
pub fn resolve<R: Repository>(
    repo: &R,
    store_type: &str,
    store_id: &str,
    node_id: &str,
    name: Option<&str>,
) -> Result<FingerprintContext<R::Node>, ResolveError> {
    resolve_node_ref(repo, &NodeRef::new(store_type, store_id, node_id), name)
}

/// Same as [`resolve`] for an already built reference.
pub fn resolve_node_ref<R: Repository>(
    repo: &R,
    node_ref: &NodeRef,
    name: Option<&str>,
) -> Result<FingerprintContext<R::Node>, ResolveError> {
    let node = repo
        .find_node(node_ref)
        .ok_or_else(|| ResolveError::NodeNotFound {
            node_ref: node_ref.clone(),
        })?;

    let name = name.filter(|n| !n.is_empty()).unwrap_or(PROP_CONTENT);

    if node.has_property(name) {
        tracing::debug!(node = %node_ref, property = name, "resolved content property");
        return Ok(FingerprintContext {
            target: node,
            content_property: name.to_string(),
        });
    }

    match repo.find_thumbnail(&node, name) {
        Some(thumbnail) => {
            tracing::debug!(
                node = %node_ref,
                thumbnail = %thumbnail.node_ref(),
                thumbnail_name = name,
                "resolved thumbnail"
            );
            Ok(FingerprintContext {
                target: thumbnail,
                content_property: PROP_CONTENT.to_string(),
            })
        }
        None => Err(ResolveError::PropertyOrThumbnailNotFound {
            name: name.to_string(),
            node_ref: node_ref.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryRepository, NodeRecord};

    fn node(id: &str) -> NodeRef {
        NodeRef::new("workspace", "SpacesStore", id)
    }

    fn repository() -> MemoryRepository {
        MemoryRepository::new()
            // plain document
            .with_node(
                NodeRecord::new(node("doc"))
                    .with_property("cm:content", "store://doc.bin")
                    .with_property("hack:rendition", "store://rendition.bin")
                    .with_thumbnail("doclib", node("doc-doclib")),
            )
            .with_node(NodeRecord::new(node("doc-doclib")).with_property("cm:content", "store://t.png"))
            // node without content but with a thumbnail named like the default property
            .with_node(
                NodeRecord::new(node("123"))
                    .with_property("cm:content", serde_json::Value::Null)
                    .with_thumbnail("cm:content", node("123-thumb")),
            )
            .with_node(NodeRecord::new(node("123-thumb")).with_property("cm:content", "store://x"))
            // node with nothing
            .with_node(NodeRecord::new(node("empty")))
    }

    #[test]
    fn test_default_content_property() {
        let ctx = resolve(&repository(), "workspace", "SpacesStore", "doc", None).unwrap();
        assert_eq!(ctx.target.node_ref, node("doc"));
        assert_eq!(ctx.content_property, "cm:content");
    }

    #[test]
    fn test_empty_name_defaults_to_content() {
        let ctx = resolve(&repository(), "workspace", "SpacesStore", "doc", Some("")).unwrap();
        assert_eq!(ctx.content_property, "cm:content");
    }

    #[test]
    fn test_named_property() {
        let ctx = resolve(
            &repository(),
            "workspace",
            "SpacesStore",
            "doc",
            Some("hack:rendition"),
        )
        .unwrap();
        assert_eq!(ctx.target.node_ref, node("doc"));
        assert_eq!(ctx.content_property, "hack:rendition");
    }

    #[test]
    fn test_thumbnail_resets_property_name() {
        let ctx = resolve(&repository(), "workspace", "SpacesStore", "doc", Some("doclib")).unwrap();
        assert_eq!(ctx.target.node_ref, node("doc-doclib"));
        assert_eq!(ctx.content_property, "cm:content");
    }

    #[test]
    fn test_null_content_falls_back_to_same_named_thumbnail() {
        let ctx = resolve(&repository(), "workspace", "SpacesStore", "123", None).unwrap();
        assert_eq!(ctx.target.node_ref, node("123-thumb"));
        assert_eq!(ctx.content_property, "cm:content");
    }

    #[test]
    fn test_missing_node() {
        let err = resolve(&repository(), "workspace", "SpacesStore", "999", None).unwrap_err();
        assert_eq!(
            err,
            ResolveError::NodeNotFound {
                node_ref: node("999")
            }
        );
        assert_eq!(err.to_string(), "workspace://SpacesStore/999 does not exist");
        assert_eq!(err.outcome(), "node_missing");
    }

    #[test]
    fn test_missing_property_and_thumbnail() {
        let err = resolve(&repository(), "workspace", "SpacesStore", "empty", Some("webpreview"))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("webpreview"));
        assert!(msg.contains("workspace://SpacesStore/empty"));
        assert_eq!(err.node_ref(), &node("empty"));
        assert_eq!(err.outcome(), "property_or_thumbnail_missing");
    }

    #[test]
    fn test_missing_default_property_and_thumbnail() {
        let err = resolve(&repository(), "workspace", "SpacesStore", "empty", None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Thumbnail or content property cm:content of workspace://SpacesStore/empty does not exist"
        );
    }
}
