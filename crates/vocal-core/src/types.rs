use serde::{Deserialize, Serialize};

/// Marker the model uses for fields it cannot fill
pub const NOT_AVAILABLE: &str = "N/A";

/// One analyzed word.
///
/// Field names on the wire follow the stored layout (`partOfSpeech`,
/// `definition_en`, ...), so existing `savedWords` arrays load as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub phonetic: String,
    #[serde(rename = "partOfSpeech")]
    pub part_of_speech: String,
    pub definition_en: String,
    pub translation_vi: String,
    pub example_en: String,
    /// Epoch millis, only present once persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl WordEntry {
    /// Case-insensitive identity used for deduplication
    pub fn same_word(&self, other: &str) -> bool {
        self.word.to_lowercase() == other.to_lowercase()
    }

    /// Copy of this entry carrying a save time
    pub fn stamped(&self, timestamp: i64) -> Self {
        Self {
            timestamp: Some(timestamp),
            ..self.clone()
        }
    }

    /// Copy of this entry without a save time
    pub fn unstamped(&self) -> Self {
        Self {
            timestamp: None,
            ..self.clone()
        }
    }

    /// Translation slot holds an error placeholder like `[translation failed]`
    pub fn has_translation_placeholder(&self) -> bool {
        self.translation_vi.starts_with('[')
    }
}

/// Treats the `N/A` marker and empty text as absent
pub fn available(value: &str) -> Option<&str> {
    if value.is_empty() || value == NOT_AVAILABLE {
        None
    } else {
        Some(value)
    }
}
