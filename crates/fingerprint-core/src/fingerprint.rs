//! Content fingerprints.
//!
//! A fingerprint is a message digest of the binary payload held by a content
//! property. Nodes keep their fingerprints under `hack:fingerprints`, each
//! entry written as `property|digestType|digestValue`.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::Serialize;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::error::{Error, Result};
use crate::model::{ContentNode, PROP_FINGERPRINTS, STORE_ID_SPACES_STORE, STORE_TYPE_WORKSPACE};
use crate::node_ref::NodeRef;

/// Read buffer used while digesting content (10 KiB).
const BUF_SIZE: usize = 10 << 10;

/// Supported message digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DigestType {
    #[serde(rename = "SHA-224")]
    Sha224,
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-384")]
    Sha384,
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl DigestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha224 => "SHA-224",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }

    fn hasher(&self) -> Hasher {
        match self {
            Self::Sha224 => Hasher::Sha224(Sha224::new()),
            Self::Sha256 => Hasher::Sha256(Sha256::new()),
            Self::Sha384 => Hasher::Sha384(Sha384::new()),
            Self::Sha512 => Hasher::Sha512(Sha512::new()),
        }
    }
}

enum Hasher {
    Sha224(Sha224),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
}

impl Hasher {
    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Sha224(h) => h.update(data),
            Self::Sha256(h) => h.update(data),
            Self::Sha384(h) => h.update(data),
            Self::Sha512(h) => h.update(data),
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            Self::Sha224(h) => hex::encode(h.finalize()),
            Self::Sha256(h) => hex::encode(h.finalize()),
            Self::Sha384(h) => hex::encode(h.finalize()),
            Self::Sha512(h) => hex::encode(h.finalize()),
        }
    }
}

impl fmt::Display for DigestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestType {
    type Err = Error;

    /// Accepts `SHA-256`, `sha256`, `Sha-256` and so on.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match normalized.as_str() {
            "SHA224" => Ok(Self::Sha224),
            "SHA256" => Ok(Self::Sha256),
            "SHA384" => Ok(Self::Sha384),
            "SHA512" => Ok(Self::Sha512),
            _ => Err(Error::UnknownDigestType(s.to_string())),
        }
    }
}

/// Parse a comma-separated digest list such as `SHA-256,SHA-512`.
pub fn parse_digest_types(list: &str) -> Result<Vec<DigestType>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

/// Digest of one content property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFingerprint {
    pub content_property: String,
    pub digest_type: String,
    /// Lowercase hex.
    pub digest_value: String,
}

impl ContentFingerprint {
    pub fn new(
        content_property: impl Into<String>,
        digest_type: impl Into<String>,
        digest_value: impl Into<String>,
    ) -> Self {
        Self {
            content_property: content_property.into(),
            digest_type: digest_type.into(),
            digest_value: digest_value.into(),
        }
    }
}

impl fmt::Display for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}",
            self.content_property, self.digest_type, self.digest_value
        )
    }
}

impl FromStr for ContentFingerprint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let fragments: Vec<&str> = s.split('|').collect();
        match fragments.as_slice() {
            [property, digest_type, value] => Ok(Self::new(*property, *digest_type, *value)),
            _ => Err(Error::InvalidFingerprint(s.to_string())),
        }
    }
}

/// Only nodes of the standard spaces store get fingerprinted.
pub fn is_fingerprinted_store(node_ref: &NodeRef) -> bool {
    node_ref.store_type() == STORE_TYPE_WORKSPACE && node_ref.store_id() == STORE_ID_SPACES_STORE
}

/// Stream `reader` once and compute one fingerprint per digest type.
pub fn compute_fingerprints<R: Read>(
    mut reader: R,
    content_property: &str,
    digest_types: &[DigestType],
) -> Result<Vec<ContentFingerprint>> {
    let mut hashers: Vec<(DigestType, Hasher)> =
        digest_types.iter().map(|t| (*t, t.hasher())).collect();

    let mut buffer = vec![0u8; BUF_SIZE];
    let mut total = 0usize;
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        total += read;
        for (_, hasher) in hashers.iter_mut() {
            hasher.update(&buffer[..read]);
        }
    }

    tracing::debug!(
        property = content_property,
        bytes = total,
        digests = digest_types.len(),
        "content digested"
    );

    Ok(hashers
        .into_iter()
        .map(|(digest_type, hasher)| {
            ContentFingerprint::new(content_property, digest_type.as_str(), hasher.finalize_hex())
        })
        .collect())
}

/// Replace the fingerprints of `content_property` with `fresh`.
///
/// Fingerprints of other properties stay valid and keep their order.
pub fn merge_fingerprints(
    existing: Vec<ContentFingerprint>,
    content_property: &str,
    fresh: Vec<ContentFingerprint>,
) -> Vec<ContentFingerprint> {
    existing
        .into_iter()
        .filter(|print| print.content_property != content_property)
        .chain(fresh)
        .collect()
}

/// Fingerprints stored on `node` for `content_property`.
///
/// Entries that do not parse are skipped with a warning.
pub fn fingerprints_of<N: ContentNode>(node: &N, content_property: &str) -> Vec<ContentFingerprint> {
    stored_fingerprints(node)
        .into_iter()
        .filter(|print| print.content_property == content_property)
        .collect()
}

fn stored_fingerprints<N: ContentNode>(node: &N) -> Vec<ContentFingerprint> {
    let Some(values) = node.property(PROP_FINGERPRINTS).and_then(|v| v.as_array()) else {
        return Vec::new();
    };

    values
        .iter()
        .filter_map(|value| {
            let text = value.as_str()?;
            match text.parse::<ContentFingerprint>() {
                Ok(print) => Some(print),
                Err(e) => {
                    tracing::warn!(node = %node.node_ref(), error = %e, "skipping stored fingerprint");
                    None
                }
            }
        })
        .collect()
}

/// Recompute fingerprints after `content_property` of `node` changed.
///
/// Returns `None` for nodes outside the standard store, which are never
/// fingerprinted. Otherwise returns the complete list to store on the node:
/// prints of other properties followed by fresh ones for `content_property`.
/// An empty list means the node no longer carries fingerprint data.
pub fn on_content_property_update<N: ContentNode, R: Read>(
    node: &N,
    content_property: &str,
    reader: R,
    digest_types: &[DigestType],
) -> Result<Option<Vec<ContentFingerprint>>> {
    tracing::trace!(node = %node.node_ref(), property = content_property, "content property updated");

    if !is_fingerprinted_store(node.node_ref()) {
        return Ok(None);
    }

    let fresh = if digest_types.is_empty() {
        Vec::new()
    } else {
        compute_fingerprints(reader, content_property, digest_types)?
    };

    Ok(Some(merge_fingerprints(
        stored_fingerprints(node),
        content_property,
        fresh,
    )))
}
