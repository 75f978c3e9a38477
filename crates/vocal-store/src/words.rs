use std::sync::Arc;

use serde_json::Value;
use vocal_core::WordEntry;

use crate::storage::KeyValueStore;
use crate::{StorageError, StoreError};

/// Key holding the whole saved word list
pub const SAVED_WORDS_KEY: &str = "savedWords";

type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Append-only word list, at most one entry per case-insensitive word
#[derive(Clone)]
pub struct WordStore {
    storage: Arc<dyn KeyValueStore>,
    clock: Clock,
}

impl WordStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            clock: Arc::new(|| chrono::Utc::now().timestamp_millis()),
        }
    }

    /// Replace the epoch-millis clock used to stamp new entries
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Seed an empty list on first run. Returns true if it seeded.
    pub async fn init(&self) -> Result<bool, StorageError> {
        match self.storage.get(SAVED_WORDS_KEY).await? {
            Some(Value::Array(_)) => Ok(false),
            _ => {
                self.storage
                    .set(SAVED_WORDS_KEY, Value::Array(Vec::new()))
                    .await?;
                tracing::info!("Initialized empty saved word list");
                Ok(true)
            }
        }
    }

    /// Stamp and append `entry` unless its word is already saved
    pub async fn add(&self, entry: &WordEntry) -> Result<(), StoreError> {
        let mut words = self.list_all().await?;

        if words.iter().any(|w| w.same_word(&entry.word)) {
            tracing::debug!("'{}' already saved", entry.word);
            return Err(StoreError::AlreadyExists);
        }

        words.push(entry.stamped((self.clock)()));
        let value = serde_json::to_value(&words).map_err(StorageError::from)?;
        self.storage.set(SAVED_WORDS_KEY, value).await?;

        tracing::info!("Saved '{}' ({} words total)", entry.word, words.len());
        Ok(())
    }

    /// Every saved entry in insertion order
    pub async fn list_all(&self) -> Result<Vec<WordEntry>, StorageError> {
        match self.storage.get(SAVED_WORDS_KEY).await? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonFileStorage, MemoryStorage};
    use serde_json::json;

    fn entry(word: &str) -> WordEntry {
        WordEntry {
            word: word.to_string(),
            phonetic: "rʌn".to_string(),
            part_of_speech: "verb".to_string(),
            definition_en: "move fast on foot".to_string(),
            translation_vi: "chạy".to_string(),
            example_en: "N/A".to_string(),
            timestamp: None,
        }
    }

    fn store() -> WordStore {
        WordStore::new(Arc::new(MemoryStorage::new())).with_clock(|| 1_700_000_000_000)
    }

    #[tokio::test]
    async fn test_init_seeds_once() {
        let storage = Arc::new(MemoryStorage::new());
        let words = WordStore::new(storage.clone());

        assert!(words.init().await.unwrap());
        assert_eq!(storage.get(SAVED_WORDS_KEY).await.unwrap(), Some(json!([])));

        words.add(&entry("run")).await.unwrap();
        assert!(!words.init().await.unwrap());
        assert_eq!(words.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_init_repairs_non_array() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(SAVED_WORDS_KEY, json!("oops")).await.unwrap();

        assert!(WordStore::new(storage.clone()).init().await.unwrap());
        assert_eq!(storage.get(SAVED_WORDS_KEY).await.unwrap(), Some(json!([])));
    }

    #[tokio::test]
    async fn test_add_then_list_round_trip() {
        let words = store();
        let original = entry("run");
        words.add(&original).await.unwrap();

        let listed = words.list_all().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].timestamp, Some(1_700_000_000_000));
        assert_eq!(listed[0].unstamped(), original);
    }

    #[tokio::test]
    async fn test_duplicate_ignores_case() {
        let words = store();
        words.add(&entry("run")).await.unwrap();

        let err = words.add(&entry("Run")).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists));
        assert_eq!(err.to_string(), "Word already exists.");

        let listed = words.list_all().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].word, "run");
    }

    #[tokio::test]
    async fn test_preserves_insertion_order() {
        let words = store();
        for word in ["zebra", "apple", "mango"] {
            words.add(&entry(word)).await.unwrap();
        }

        let order: Vec<String> = words
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.word)
            .collect();
        assert_eq!(order, vec!["zebra", "apple", "mango"]);
    }

    #[tokio::test]
    async fn test_list_without_init_is_empty() {
        assert!(store().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_is_store_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("local.json");
        std::fs::write(&path, "not json").unwrap();

        let words = WordStore::new(Arc::new(JsonFileStorage::new(&path)));
        let err = words.add(&entry("run")).await.unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert_eq!(err.to_string(), "Failed to save word.");
    }
}
