//! Configuration service implementation.
//!
//! Loads `StorefrontConfig` from `<config_dir>/config.toml` and caches it.

use std::sync::{Arc, RwLock};

use lumina_core::config::StorefrontConfig;
use lumina_core::error::Result;

use crate::paths::LuminaPaths;
use crate::storage::AtomicFile;

/// Loads and caches the storefront configuration.
#[derive(Clone)]
pub struct ConfigService {
    paths: LuminaPaths,
    /// Cached configuration, filled on first access.
    config: Arc<RwLock<Option<StorefrontConfig>>>,
}

impl ConfigService {
    pub fn new(paths: LuminaPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Reads `config.toml`. A missing or blank file yields the defaults.
    pub fn load(&self) -> Result<StorefrontConfig> {
        let file = AtomicFile::<StorefrontConfig>::toml(self.paths.config_file());
        match file.load()? {
            Some(config) => {
                tracing::debug!("Loaded config from {}", file.path().display());
                Ok(config)
            }
            None => {
                tracing::debug!(
                    "No config at {}, using defaults",
                    file.path().display()
                );
                Ok(StorefrontConfig::default())
            }
        }
    }

    /// The cached configuration, loading it on first call. An unreadable
    /// file is logged and replaced by the defaults.
    pub fn get_config(&self) -> StorefrontConfig {
        if let Ok(cached) = self.config.read() {
            if let Some(config) = cached.as_ref() {
                return config.clone();
            }
        }

        let loaded = self.load().unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable config file: {}", e);
            StorefrontConfig::default()
        });

        if let Ok(mut cache) = self.config.write() {
            *cache = Some(loaded.clone());
        }
        loaded
    }
}
