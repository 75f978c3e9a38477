mod pending;
mod storage;
mod words;

pub use pending::{PENDING_POPUP_KEY, PendingSlot};
pub use storage::{JsonFileStorage, KeyValueStore, MemoryStorage};
pub use words::{SAVED_WORDS_KEY, WordStore};

/// Failure reading or writing a storage area
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage area is corrupt: {0}")]
    Corrupt(String),
}

/// Word store failures. `Display` is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Word already exists.")]
    AlreadyExists,

    #[error("Failed to save word.")]
    Storage(#[from] StorageError),
}
