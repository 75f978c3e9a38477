use std::sync::Arc;

use tokio::sync::RwLock;
use vocal_config::Config;
use vocal_store::{KeyValueStore, PendingSlot, WordStore};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub words: WordStore,
    pub pending: PendingSlot,
}

impl AppState {
    /// `local` is the persistent area, `session` lives as long as the host
    pub fn new(
        config: Config,
        local: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            words: WordStore::new(local),
            pending: PendingSlot::new(session),
        }
    }
}
