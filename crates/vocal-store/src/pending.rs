use std::sync::Arc;

use vocal_core::WordEntry;

use crate::StorageError;
use crate::storage::KeyValueStore;

/// Key of the one-shot popup handoff
pub const PENDING_POPUP_KEY: &str = "wordToShowInPopup";

/// Single-slot mailbox from the router to the next popup activation.
///
/// A second `put` before `take` overwrites the first.
#[derive(Clone)]
pub struct PendingSlot {
    storage: Arc<dyn KeyValueStore>,
}

impl PendingSlot {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    pub async fn put(&self, entry: &WordEntry) -> Result<(), StorageError> {
        let value = serde_json::to_value(entry.unstamped())?;
        self.storage.set(PENDING_POPUP_KEY, value).await
    }

    /// Read and clear the slot. A value that fails to decode is still cleared.
    pub async fn take(&self) -> Result<Option<WordEntry>, StorageError> {
        let Some(value) = self.storage.get(PENDING_POPUP_KEY).await? else {
            return Ok(None);
        };
        self.storage.remove(PENDING_POPUP_KEY).await?;

        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(PENDING_POPUP_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn entry(word: &str) -> WordEntry {
        WordEntry {
            word: word.to_string(),
            phonetic: "N/A".to_string(),
            part_of_speech: "noun".to_string(),
            definition_en: "a thing".to_string(),
            translation_vi: "một thứ".to_string(),
            example_en: "N/A".to_string(),
            timestamp: Some(5),
        }
    }

    #[tokio::test]
    async fn test_take_clears_slot() {
        let slot = PendingSlot::new(Arc::new(MemoryStorage::new()));
        slot.put(&entry("apple")).await.unwrap();

        let taken = slot.take().await.unwrap().unwrap();
        assert_eq!(taken.word, "apple");
        assert!(taken.timestamp.is_none());
        assert!(slot.take().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_second_put_overwrites() {
        let slot = PendingSlot::new(Arc::new(MemoryStorage::new()));
        slot.put(&entry("first")).await.unwrap();
        slot.put(&entry("second")).await.unwrap();

        assert_eq!(slot.take().await.unwrap().unwrap().word, "second");
        assert!(slot.take().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_undecodable_value_is_cleared() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(PENDING_POPUP_KEY, json!({"word": 3})).await.unwrap();

        let slot = PendingSlot::new(storage.clone());
        assert!(slot.take().await.is_err());
        assert_eq!(storage.get(PENDING_POPUP_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear() {
        let slot = PendingSlot::new(Arc::new(MemoryStorage::new()));
        slot.put(&entry("apple")).await.unwrap();
        slot.clear().await.unwrap();
        assert!(slot.take().await.unwrap().is_none());
    }
}
