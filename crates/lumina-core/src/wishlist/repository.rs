//! Durable key-value storage port.

use crate::error::Result;

/// A string key-value store, the shape of browser local storage.
///
/// Implementations live in the infrastructure crate (JSON file, in-memory).
/// Reads of an absent key return `Ok(None)`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}
