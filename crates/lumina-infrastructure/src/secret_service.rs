//! Secret service implementation.
//!
//! Reads API credentials from `secret.json`. The `GEMINI_API_KEY`
//! environment variable takes precedence over the file's key.

use std::sync::{Arc, RwLock};

use lumina_core::config::{GeminiConfig, SecretConfig};
use lumina_core::error::Result;
use lumina_core::secret::SecretService;

use crate::paths::LuminaPaths;
use crate::storage::AtomicFile;

/// Environment variable that overrides the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Loads `secret.json` once and caches it.
#[derive(Clone)]
pub struct SecretServiceImpl {
    paths: LuminaPaths,
    api_key_override: Option<String>,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    /// Uses `GEMINI_API_KEY` from the process environment when set.
    pub fn new(paths: LuminaPaths) -> Self {
        let from_env = std::env::var(GEMINI_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self::with_api_key_override(paths, from_env)
    }

    pub fn with_api_key_override(paths: LuminaPaths, api_key_override: Option<String>) -> Self {
        Self {
            paths,
            api_key_override,
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    fn load_secrets_internal(&self) -> Result<SecretConfig> {
        if let Ok(cached) = self.secrets.read() {
            if let Some(secrets) = cached.as_ref() {
                return Ok(secrets.clone());
            }
        }

        let file = AtomicFile::<SecretConfig>::json(self.paths.secret_file());
        let mut loaded = file.load()?.unwrap_or_default();

        if let Some(api_key) = &self.api_key_override {
            tracing::debug!("Using Gemini API key from {}", GEMINI_API_KEY_ENV);
            let model = loaded.gemini.take().and_then(|gemini| gemini.model);
            loaded.gemini = Some(GeminiConfig {
                api_key: api_key.clone(),
                model,
            });
        }

        if let Ok(mut cache) = self.secrets.write() {
            *cache = Some(loaded.clone());
        }
        Ok(loaded)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        self.load_secrets_internal()
    }
}
