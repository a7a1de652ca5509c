//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use fingerprint_core::DigestType;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080").
    pub bind_addr: String,

    /// JSON repository snapshot to serve from. An empty repository when unset.
    pub repository_path: Option<PathBuf>,

    /// Digests computed by `fingerprint-digest` unless overridden.
    pub digest_types: Vec<DigestType>,

    /// Port of the Prometheus `/metrics` listener. Metrics are off when unset.
    pub metrics_port: Option<u16>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `FINGERPRINT_BIND_ADDR`: Server bind address (default: "0.0.0.0:8080")
    /// - `FINGERPRINT_REPOSITORY_PATH`: JSON repository snapshot
    /// - `FINGERPRINT_DIGEST_TYPES`: Comma-separated digests (default: "SHA-256")
    /// - `FINGERPRINT_METRICS_PORT`: Port for the metrics listener
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("FINGERPRINT_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let repository_path = std::env::var("FINGERPRINT_REPOSITORY_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let digest_list =
            std::env::var("FINGERPRINT_DIGEST_TYPES").unwrap_or_else(|_| "SHA-256".to_string());
        let digest_types = fingerprint_core::parse_digest_types(&digest_list)?;
        if digest_types.is_empty() {
            anyhow::bail!("FINGERPRINT_DIGEST_TYPES must name at least one digest");
        }

        let metrics_port = match std::env::var("FINGERPRINT_METRICS_PORT") {
            Ok(port) => Some(port.trim().parse::<u16>().map_err(|e| {
                anyhow::anyhow!("FINGERPRINT_METRICS_PORT is not a valid port: {e}")
            })?),
            Err(_) => None,
        };

        tracing::info!(
            bind_addr = %bind_addr,
            repository = ?repository_path,
            digest_types = %digest_list,
            metrics_port = ?metrics_port,
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            repository_path,
            digest_types,
            metrics_port,
        })
    }
}
