use async_trait::async_trait;
use kanal::AsyncSender;
use vocal_store::StorageError;

use crate::io::HostEvent;

/// Failure to hand a word to the popup or to show it
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("Failed to prepare or open popup.")]
    Prepare(#[from] StorageError),

    #[error("Failed to prepare or open popup.")]
    Open(String),
}

/// Host capability to bring up the popup surface
#[async_trait]
pub trait PopupSurface: Send + Sync {
    async fn open_popup(&self) -> Result<(), SurfaceError>;
}

/// Opens the popup by posting to the host event loop
pub struct ChannelSurface {
    tx: AsyncSender<HostEvent>,
}

impl ChannelSurface {
    pub fn new(tx: AsyncSender<HostEvent>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl PopupSurface for ChannelSurface {
    async fn open_popup(&self) -> Result<(), SurfaceError> {
        self.tx
            .send(HostEvent::OpenPopup)
            .await
            .map_err(|e| SurfaceError::Open(e.to_string()))
    }
}
