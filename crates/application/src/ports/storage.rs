//! Key-value storage port
//!
//! Defines the interface for the device's persistent key-value storage.
//! The three credential keys below are independent entries; there is no
//! multi-key transaction, and callers are written to tolerate partial
//! writes between them.

use async_trait::async_trait;
use thiserror::Error;

/// Storage key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "auth_token";

/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Storage key for the serialized user profile.
pub const USER_PROFILE_KEY: &str = "user_profile";

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Port for persistent key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`, replacing any existing entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes the entry under `key`; deleting an absent key is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
