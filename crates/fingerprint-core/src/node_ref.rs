//! Node references.
//!
//! A node is addressed by the store it lives in and its id within that store,
//! written as `storeType://storeId/nodeId` (e.g. `workspace://SpacesStore/123`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Composite identifier of a content node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeRef {
    store_type: String,
    store_id: String,
    node_id: String,
}

impl NodeRef {
    /// Build a reference from its three segments.
    pub fn new(
        store_type: impl Into<String>,
        store_id: impl Into<String>,
        node_id: impl Into<String>,
    ) -> Self {
        Self {
            store_type: store_type.into(),
            store_id: store_id.into(),
            node_id: node_id.into(),
        }
    }

    pub fn store_type(&self) -> &str {
        &self.store_type
    }

    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// The `storeType://storeId` part of the reference.
    pub fn store_ref(&self) -> String {
        format!("{}://{}", self.store_type, self.store_id)
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}/{}", self.store_type, self.store_id, self.node_id)
    }
}

impl FromStr for NodeRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| Error::InvalidNodeRef {
            value: s.to_string(),
            reason,
        };

        let (store_type, rest) = s
            .split_once("://")
            .ok_or_else(|| invalid("missing '://' separator"))?;
        let (store_id, node_id) = rest
            .split_once('/')
            .ok_or_else(|| invalid("missing '/' before node id"))?;

        if store_type.is_empty() || store_id.is_empty() || node_id.is_empty() {
            return Err(invalid("empty segment"));
        }

        Ok(Self::new(store_type, store_id, node_id))
    }
}

impl TryFrom<String> for NodeRef {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NodeRef> for String {
    fn from(node_ref: NodeRef) -> Self {
        node_ref.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_three_part_path() {
        let node_ref = NodeRef::new("workspace", "SpacesStore", "123");
        assert_eq!(node_ref.to_string(), "workspace://SpacesStore/123");
        assert_eq!(node_ref.store_ref(), "workspace://SpacesStore");
    }

    #[test]
    fn test_parse() {
        let node_ref: NodeRef = "archive://SpacesStore/abc-def".parse().unwrap();
        assert_eq!(node_ref.store_type(), "archive");
        assert_eq!(node_ref.store_id(), "SpacesStore");
        assert_eq!(node_ref.node_id(), "abc-def");
    }

    #[test]
    fn test_parse_rejects_missing_scheme_separator() {
        let err = "workspace/SpacesStore/123".parse::<NodeRef>().unwrap_err();
        assert!(matches!(err, Error::InvalidNodeRef { .. }));
    }

    #[test]
    fn test_parse_rejects_missing_node_id() {
        assert!("workspace://SpacesStore".parse::<NodeRef>().is_err());
        assert!("workspace://SpacesStore/".parse::<NodeRef>().is_err());
        assert!("://SpacesStore/123".parse::<NodeRef>().is_err());
    }

    #[test]
    fn test_serde_uses_string_form() {
        let node_ref = NodeRef::new("workspace", "SpacesStore", "123");
        let json = serde_json::to_string(&node_ref).unwrap();
        assert_eq!(json, "\"workspace://SpacesStore/123\"");

        let back: NodeRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node_ref);
        assert!(serde_json::from_str::<NodeRef>("\"nope\"").is_err());
    }
}
