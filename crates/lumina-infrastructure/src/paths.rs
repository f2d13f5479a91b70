//! Path management for Lumina configuration and storage files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/lumina/            # Config directory (overridable with --config-dir)
//! ├── config.toml              # Storefront configuration
//! ├── secret.json              # API keys
//! └── storage.json             # Key-value storage (the persisted wishlist)
//! ```

use std::path::{Path, PathBuf};

use lumina_core::config::{DEFAULT_MODEL, GeminiConfig, SecretConfig};
use lumina_core::error::{LuminaError, Result};

const APP_DIR_NAME: &str = "lumina";

/// Resolves every Lumina file relative to one config directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuminaPaths {
    config_dir: PathBuf,
}

impl LuminaPaths {
    /// Uses `base_dir` when given, otherwise the platform config directory
    /// (`~/.config/lumina` on Linux).
    pub fn new(base_dir: Option<&Path>) -> Result<Self> {
        let config_dir = match base_dir {
            Some(dir) => dir.to_path_buf(),
            None => dirs::config_dir()
                .ok_or_else(|| LuminaError::config("Cannot find home directory"))?
                .join(APP_DIR_NAME),
        };
        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Ensure this file has appropriate permissions (e.g., 600).
    pub fn secret_file(&self) -> PathBuf {
        self.config_dir.join("secret.json")
    }

    /// Backing file of the JSON key-value store.
    pub fn storage_file(&self) -> PathBuf {
        self.config_dir.join("storage.json")
    }

    /// Writes a `secret.json` template if none exists, with permissions 600
    /// on Unix. Returns the path either way.
    pub fn ensure_secret_file(&self) -> Result<PathBuf> {
        let secret_path = self.secret_file();
        if secret_path.exists() {
            return Ok(secret_path);
        }

        std::fs::create_dir_all(&self.config_dir)?;

        let template = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
                model: Some(DEFAULT_MODEL.to_string()),
            }),
        };
        std::fs::write(&secret_path, serde_json::to_string_pretty(&template)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&secret_path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::info!("Created secret template at {}", secret_path.display());
        Ok(secret_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_files_live_under_config_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LuminaPaths::new(Some(temp_dir.path())).unwrap();
        assert_eq!(paths.config_dir(), temp_dir.path());
        assert!(paths.config_file().ends_with("config.toml"));
        assert!(paths.secret_file().ends_with("secret.json"));
        assert!(paths.storage_file().ends_with("storage.json"));
        assert!(paths.storage_file().starts_with(temp_dir.path()));
    }

    #[test]
    fn test_ensure_secret_file_writes_template_once() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LuminaPaths::new(Some(&temp_dir.path().join("nested"))).unwrap();

        let path = paths.ensure_secret_file().unwrap();
        let secrets: SecretConfig =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let gemini = secrets.gemini.unwrap();
        assert!(gemini.api_key.is_empty());
        assert_eq!(gemini.model.as_deref(), Some(DEFAULT_MODEL));

        // An existing file is left alone
        std::fs::write(&path, r#"{"gemini":{"api_key":"kept"}}"#).unwrap();
        paths.ensure_secret_file().unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("kept"));
    }

    #[cfg(unix)]
    #[test]
    fn test_secret_template_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let temp_dir = TempDir::new().unwrap();
        let paths = LuminaPaths::new(Some(temp_dir.path())).unwrap();
        let path = paths.ensure_secret_file().unwrap();
        let mode = std::fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
