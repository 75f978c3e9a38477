use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use vocal_config::Config;

const CONFIG_FILE: &str = "config.json";

/// Per-user config folder
fn vocal_root() -> anyhow::Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("vocal"))
        .context("No config directory on this platform")
}

/// Write a default profile on first run
pub fn init_user_config() -> anyhow::Result<PathBuf> {
    init_config_in(&vocal_root()?)
}

pub fn init_config_in(root: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(root)?;

    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        fs::write(&path, serde_json::to_string_pretty(&Config::default())?)?;
        tracing::info!("Created default config at {}", path.display());
    }

    Ok(path)
}

/// Load the user profile and apply environment overrides
pub fn load_user_config() -> anyhow::Result<Config> {
    load_config_from(&vocal_root()?)
}

pub fn load_config_from(root: &Path) -> anyhow::Result<Config> {
    let path = root.join(CONFIG_FILE);

    let mut config = if path.exists() {
        let reader = BufReader::new(File::open(&path)?);
        serde_json::from_reader(reader)
            .with_context(|| format!("Invalid config file {}", path.display()))?
    } else {
        tracing::warn!("{} not found, using defaults", path.display());
        Config::default()
    };

    config.apply_env();
    Ok(config)
}

/// File backing the persistent storage area
pub fn local_storage_path(config: &Config) -> anyhow::Result<PathBuf> {
    let dir = match &config.storage.data_dir {
        Some(dir) => PathBuf::from(dir),
        None => dirs::data_dir()
            .map(|dir| dir.join("vocal"))
            .context("No data directory on this platform")?,
    };

    Ok(dir.join(&config.storage.file_name))
}
