//! Application state shared across all request handlers.

use std::sync::Arc;

use fingerprint_core::MemoryRepository;

use crate::config::Config;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository the resolver reads from.
    pub repository: Arc<MemoryRepository>,

    /// Application configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state, loading the repository snapshot if configured.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let repository = match &config.repository_path {
            Some(path) => MemoryRepository::load(path)?,
            None => {
                tracing::warn!("no repository snapshot configured, serving an empty repository");
                MemoryRepository::new()
            }
        };

        Ok(Self::with_repository(config, repository))
    }

    /// Create application state around an existing repository.
    pub fn with_repository(config: Config, repository: MemoryRepository) -> Self {
        tracing::info!(nodes = repository.len(), "application state initialized");

        Self {
            repository: Arc::new(repository),
            config: Arc::new(config),
        }
    }
}
