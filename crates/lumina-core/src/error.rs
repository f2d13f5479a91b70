//! Error types for the Lumina storefront engine.

use thiserror::Error;

/// A shared error type for the entire Lumina engine.
///
/// Typed, structured variants with automatic conversion from the common
/// error types via `From`. Most of these are recovered locally by the
/// engine (storage decode, generation failures) and only reach callers
/// from the explicit persistence and configuration entry points.
#[derive(Error, Debug, Clone)]
pub enum LuminaError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The product list violates a catalog invariant
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// The generative-text service failed
    #[error("Generation error: {0}")]
    Generation(String),

    /// A conversation request is already in flight
    #[error("A message is already being answered; wait for the reply before sending another")]
    Busy,

    /// The user message was empty after trimming
    #[error("Cannot send an empty message")]
    EmptyMessage,

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LuminaError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LuminaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LuminaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LuminaError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for LuminaError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for LuminaError {
    fn from(err: minijinja::Error) -> Self {
        Self::Internal(format!("Template rendering failed: {err}"))
    }
}

/// Conversion from anyhow::Error, used at the binary boundary
impl From<anyhow::Error> for LuminaError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, LuminaError>`.
pub type Result<T> = std::result::Result<T, LuminaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let err: LuminaError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        match err {
            LuminaError::Io { message } => assert!(message.contains("PermissionDenied")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_json_error_is_serialization() {
        let err: LuminaError = serde_json::from_str::<Vec<String>>("{not json")
            .unwrap_err()
            .into();
        assert!(err.is_serialization());
        assert!(err.to_string().contains("JSON"));
    }

    #[test]
    fn test_not_found_display() {
        let err = LuminaError::not_found("product", "42");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: product '42'");
    }
}
