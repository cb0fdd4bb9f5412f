//! File-backed key-value storage.
//!
//! Stands in for the device's persistent key-value storage: a single
//! flat JSON object in one file, read-modify-write per operation. A
//! missing file reads as an empty store; the parent directory is created
//! on first write.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use trove_application::ports::{KeyValueStore, StorageError};

/// JSON-file implementation of the `KeyValueStore` port.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(StorageError::Io(err)),
        }
    }

    async fn save(&self, values: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(StorageError::Io)?;
        }
        let bytes = serde_json::to_vec_pretty(values)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&self.path, bytes).await.map_err(StorageError::Io)
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut values = self.load().await?;
        Ok(values.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.load().await?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.load().await?;
        if values.remove(key).is_some() {
            self.save(&values).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_in(dir: &tempfile::TempDir) -> FileKeyValueStore {
        FileKeyValueStore::new(dir.path().join("trove").join("storage.json"))
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get("auth_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set("auth_token", "tok-1").await.unwrap();
        assert_eq!(
            store.get("auth_token").await.unwrap().as_deref(),
            Some("tok-1")
        );
    }

    #[tokio::test]
    async fn test_values_survive_a_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        FileKeyValueStore::new(&path)
            .set("refresh_token", "ref-1")
            .await
            .unwrap();

        let reopened = FileKeyValueStore::new(&path);
        assert_eq!(
            reopened.get("refresh_token").await.unwrap().as_deref(),
            Some("ref-1")
        );
    }

    #[tokio::test]
    async fn test_remove_deletes_only_that_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set("auth_token", "tok-1").await.unwrap();
        store.set("refresh_token", "ref-1").await.unwrap();
        store.remove("auth_token").await.unwrap();

        assert_eq!(store.get("auth_token").await.unwrap(), None);
        assert_eq!(
            store.get("refresh_token").await.unwrap().as_deref(),
            Some("ref-1")
        );
    }

    #[tokio::test]
    async fn test_remove_of_absent_key_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.remove("auth_token").await.unwrap();
    }
}
