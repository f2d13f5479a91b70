//! Adapters for the Lumina storefront: key-value stores, file paths,
//! configuration and secret loading.

pub mod config_service;
pub mod json_file_store;
pub mod memory_store;
pub mod paths;
pub mod secret_service;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::json_file_store::JsonFileKeyValueStore;
pub use crate::memory_store::InMemoryKeyValueStore;
pub use crate::paths::LuminaPaths;
pub use crate::secret_service::{GEMINI_API_KEY_ENV, SecretServiceImpl};
