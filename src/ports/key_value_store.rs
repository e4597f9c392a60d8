//! Durable client-local key-value storage port.
//!
//! Mirrors browser local storage: synchronous, string values, whole-value
//! replacement. Writes from another tab are last-writer-wins.

use thiserror::Error;

/// Errors from the key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Storage IO error: {0}")]
    Io(String),

    #[error("Storage contents are corrupt: {0}")]
    Corrupt(String),
}

/// Synchronous string storage scoped to the device.
pub trait KeyValueStore: Send + Sync {
    /// Reads a value. Missing keys are `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_display() {
        assert_eq!(
            StorageError::Io("disk full".into()).to_string(),
            "Storage IO error: disk full"
        );
    }

    #[test]
    fn key_value_store_is_object_safe() {
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn KeyValueStore>>();
    }
}
