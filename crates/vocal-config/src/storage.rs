use serde::{Deserialize, Serialize};

fn default_file_name() -> String {
    "local_storage.json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for the persistent area, defaults to the user data dir
    pub data_dir: Option<String>,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            file_name: default_file_name(),
        }
    }
}
