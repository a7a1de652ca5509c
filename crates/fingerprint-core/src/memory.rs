//! In-memory repository backed by a JSON snapshot.
//!
//! Snapshot format:
//!
//! ```json
//! {
//!   "nodes": [
//!     {
//!       "nodeRef": "workspace://SpacesStore/123",
//!       "properties": { "cm:name": "report.pdf", "cm:content": "store://2013/1/1/abc.bin" },
//!       "thumbnails": { "doclib": "workspace://SpacesStore/123-doclib" }
//!     }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::fingerprint::ContentFingerprint;
use crate::model::{ContentNode, PROP_FINGERPRINTS, PROP_NAME, Repository};
use crate::node_ref::NodeRef;

/// A node as held by [`MemoryRepository`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub node_ref: NodeRef,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
    /// Thumbnail name -> reference of the thumbnail node.
    #[serde(default)]
    pub thumbnails: BTreeMap<String, NodeRef>,
}

impl NodeRecord {
    pub fn new(node_ref: NodeRef) -> Self {
        Self {
            node_ref,
            properties: BTreeMap::new(),
            thumbnails: BTreeMap::new(),
        }
    }

    pub fn with_name(self, name: &str) -> Self {
        self.with_property(PROP_NAME, Value::String(name.to_string()))
    }

    pub fn with_property(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }

    pub fn with_thumbnail(mut self, name: &str, thumbnail: NodeRef) -> Self {
        self.thumbnails.insert(name.to_string(), thumbnail);
        self
    }

    /// Store `prints` under `hack:fingerprints`; an empty list removes the property.
    pub fn store_fingerprints(&mut self, prints: &[ContentFingerprint]) {
        if prints.is_empty() {
            self.properties.remove(PROP_FINGERPRINTS);
            return;
        }
        let values = prints
            .iter()
            .map(|print| Value::String(print.to_string()))
            .collect();
        self.properties
            .insert(PROP_FINGERPRINTS.to_string(), Value::Array(values));
    }
}

impl ContentNode for NodeRecord {
    fn node_ref(&self) -> &NodeRef {
        &self.node_ref
    }

    fn raw_property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(default)]
    nodes: Vec<NodeRecord>,
}

/// Repository holding every node in a hash map.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    nodes: HashMap<NodeRef, NodeRecord>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON snapshot.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(snapshot.nodes.into_iter().collect())
    }

    /// Read and parse a JSON snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let repo = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), nodes = repo.len(), "repository snapshot loaded");
        Ok(repo)
    }

    /// Add or replace a node.
    pub fn insert(&mut self, record: NodeRecord) {
        self.nodes.insert(record.node_ref.clone(), record);
    }

    pub fn with_node(mut self, record: NodeRecord) -> Self {
        self.insert(record);
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl FromIterator<NodeRecord> for MemoryRepository {
    fn from_iter<I: IntoIterator<Item = NodeRecord>>(iter: I) -> Self {
        let mut repo = Self::new();
        for record in iter {
            repo.insert(record);
        }
        repo
    }
}

impl Repository for MemoryRepository {
    type Node = NodeRecord;

    fn find_node(&self, node_ref: &NodeRef) -> Option<NodeRecord> {
        self.nodes.get(node_ref).cloned()
    }

    fn find_thumbnail(&self, node: &NodeRecord, thumbnail_name: &str) -> Option<NodeRecord> {
        let thumbnail_ref = node.thumbnails.get(thumbnail_name)?;
        let thumbnail = self.nodes.get(thumbnail_ref);
        if thumbnail.is_none() {
            tracing::warn!(
                node = %node.node_ref,
                thumbnail = %thumbnail_ref,
                thumbnail_name,
                "thumbnail reference points to a missing node"
            );
        }
        thumbnail.cloned()
    }
}
