//! Secret management service trait.
//!
//! Defines the interface for loading the stylist's API credentials.

use crate::config::SecretConfig;
use crate::error::Result;

/// Service for loading secret configuration.
///
/// Implementations must never log secret values or include them in errors.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration. A missing secret file yields the
    /// default (empty) configuration.
    async fn load_secrets(&self) -> Result<SecretConfig>;
}
