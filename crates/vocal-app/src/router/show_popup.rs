use vocal_analyzer::Analyzer;
use vocal_core::{Response, WordEntry};
use vocal_store::PendingSlot;

use crate::surface::{PopupSurface, SurfaceError};

pub async fn handle_show_popup(
    analyzer: &dyn Analyzer,
    pending: &PendingSlot,
    surface: &dyn PopupSurface,
    text: &str,
) -> Response {
    let entry = match analyzer.analyze(text).await {
        Ok(entry) => entry,
        Err(e) => {
            tracing::warn!("Analysis of '{}' failed: {}", text, e);
            return Response::failed(e.to_string());
        }
    };

    match prepare_and_open(pending, surface, &entry).await {
        Ok(()) => Response::ok(),
        Err(e) => {
            tracing::error!("Failed to show popup for '{}': {:?}", entry.word, e);
            // Nothing was shown, so a later popup must not pick the word up
            if let Err(clear_err) = pending.clear().await {
                tracing::error!("Failed to clear pending popup word: {}", clear_err);
            }
            Response::failed(e.to_string())
        }
    }
}

async fn prepare_and_open(
    pending: &PendingSlot,
    surface: &dyn PopupSurface,
    entry: &WordEntry,
) -> Result<(), SurfaceError> {
    pending.put(entry).await?;
    surface.open_popup().await
}
