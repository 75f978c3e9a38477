use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::{Mutex, RwLock};

use crate::StorageError;

/// A string-keyed area of JSON values
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;

    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Session-scoped area, gone when the process exits
#[derive(Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

/// Persistent area backed by one JSON object file.
///
/// Every write rewrites the whole file through a temp file and rename,
/// so readers see either the old or the new document.
pub struct JsonFileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Map<String, Value>, StorageError> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        if data.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&data)? {
            Value::Object(map) => Ok(map),
            other => Err(StorageError::Corrupt(format!(
                "{} holds {} instead of an object",
                self.path.display(),
                type_name(&other)
            ))),
        }
    }

    async fn save(&self, map: Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(&Value::Object(map))?;
        tokio::fs::write(&tmp, data).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut map = self.load().await?;
        map.insert(key.to_string(), value);
        self.save(map).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut map = self.load().await?;
        if map.remove(key).is_some() {
            self.save(map).await?;
        }
        Ok(())
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_memory_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").await.unwrap(), None);

        storage.set("k", json!([1, 2])).await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), Some(json!([1, 2])));

        storage.remove("k").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_missing_reads_empty() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("local.json"));
        assert_eq!(storage.get("savedWords").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("local.json");

        JsonFileStorage::new(&path)
            .set("savedWords", json!([{"word": "run"}]))
            .await
            .unwrap();

        let reopened = JsonFileStorage::new(&path);
        assert_eq!(
            reopened.get("savedWords").await.unwrap(),
            Some(json!([{"word": "run"}]))
        );
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("local.json"));

        storage.set("a", json!(1)).await.unwrap();
        storage.set("b", json!(2)).await.unwrap();
        storage.remove("a").await.unwrap();

        assert_eq!(storage.get("a").await.unwrap(), None);
        assert_eq!(storage.get("b").await.unwrap(), Some(json!(2)));
    }

    #[tokio::test]
    async fn test_file_with_non_object_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("local.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = JsonFileStorage::new(&path).get("savedWords").await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }
}
