//! Content model constants and the repository capabilities the resolver relies on.

use serde_json::Value;

use crate::node_ref::NodeRef;

/// Default content property holding a node's primary binary payload.
pub const PROP_CONTENT: &str = "cm:content";

/// Display name of a node.
pub const PROP_NAME: &str = "cm:name";

/// Namespace URI of the fingerprint model.
pub const FINGERPRINT_NAMESPACE_URI: &str = "http://hackathon2013.alfresco.org/model/fingerprint/1.0";

/// Namespace prefix of the fingerprint model.
pub const FINGERPRINT_NAMESPACE_PREFIX: &str = "hack";

/// Multi-valued property holding the content fingerprints of a node.
pub const PROP_FINGERPRINTS: &str = "hack:fingerprints";

/// Store type of the standard spaces store.
pub const STORE_TYPE_WORKSPACE: &str = "workspace";

/// Store id of the standard spaces store.
pub const STORE_ID_SPACES_STORE: &str = "SpacesStore";

/// A content node owned by the repository.
pub trait ContentNode {
    /// Reference identifying this node.
    fn node_ref(&self) -> &NodeRef;

    /// Raw value of a property. Implementations may return `Value::Null`;
    /// use [`ContentNode::property`] to treat that as absent.
    fn raw_property(&self, name: &str) -> Option<&Value>;

    /// Value of a property, `None` when missing or null.
    fn property(&self, name: &str) -> Option<&Value> {
        self.raw_property(name).filter(|value| !value.is_null())
    }

    /// Whether the node carries a non-null value for `name`.
    fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    /// The node's `cm:name`, when it is a string.
    fn name(&self) -> Option<&str> {
        self.property(PROP_NAME).and_then(Value::as_str)
    }
}

/// Read access to the document repository.
///
/// Lookups may block; timeouts and retries belong to the implementation.
pub trait Repository: Send + Sync {
    /// Node type handed out by this repository.
    type Node: ContentNode;

    /// Look up a node, `None` when the reference does not resolve.
    fn find_node(&self, node_ref: &NodeRef) -> Option<Self::Node>;

    /// Look up the thumbnail rendition of `node` called `thumbnail_name`.
    fn find_thumbnail(&self, node: &Self::Node, thumbnail_name: &str) -> Option<Self::Node>;
}

impl<R: Repository + ?Sized> Repository for std::sync::Arc<R> {
    type Node = R::Node;

    fn find_node(&self, node_ref: &NodeRef) -> Option<Self::Node> {
        (**self).find_node(node_ref)
    }

    fn find_thumbnail(&self, node: &Self::Node, thumbnail_name: &str) -> Option<Self::Node> {
        (**self).find_thumbnail(node, thumbnail_name)
    }
}
