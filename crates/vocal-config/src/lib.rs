use std::env;

use serde::{Deserialize, Serialize};

use self::analyzer::AnalyzerConfig;
use self::storage::StorageConfig;
use self::ui::UiConfig;

pub mod analyzer;
pub mod storage;
pub mod ui;

fn default_channel_capacity() -> usize {
    64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analyzer: AnalyzerConfig,
    pub storage: StorageConfig,
    pub ui: UiConfig,

    /// Page → background message queue depth
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            storage: StorageConfig::default(),
            ui: UiConfig::default(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl Config {
    /// Overlay `VOCAL_*` environment variables onto a loaded config
    pub fn apply_env(&mut self) {
        if let Ok(key) = env::var("VOCAL_API_KEY") {
            self.analyzer.api_key = key;
        }

        if let Ok(url) = env::var("VOCAL_API_URL") {
            self.analyzer.api_url = url;
        }

        if let Ok(dir) = env::var("VOCAL_DATA_DIR") {
            self.storage.data_dir = Some(dir);
        }

        if let Some(capacity) = env::var("VOCAL_CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.channel_capacity = capacity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"analyzer": {"api_key": "abc"}}"#).unwrap();
        assert_eq!(config.analyzer.api_key, "abc");
        assert!(config.analyzer.api_url.contains("generateContent"));
        assert_eq!(config.storage.file_name, "local_storage.json");
        assert_eq!(config.ui.menu_offset_y, 40);
        assert_eq!(config.ui.min_word_len, 2);
        assert_eq!(config.channel_capacity, 64);
    }

    #[test]
    fn test_empty_profile_is_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert!(config.analyzer.api_key.is_empty());
        assert!(config.storage.data_dir.is_none());
    }
}
