use std::sync::Arc;

use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;
use vocal_analyzer::Analyzer;
use vocal_core::{Action, Envelope, Response};
use vocal_store::{PendingSlot, WordStore};

use crate::surface::PopupSurface;

pub mod add_word;
pub mod show_popup;

use add_word::handle_add_word;
use show_popup::handle_show_popup;

/// Whether the reply was sent inline or will arrive later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyMode {
    Immediate,
    Deferred,
}

/// Background dispatcher for page messages
#[derive(Clone)]
pub struct MessageRouter {
    analyzer: Arc<dyn Analyzer>,
    words: WordStore,
    pending: PendingSlot,
    surface: Arc<dyn PopupSurface>,
}

impl MessageRouter {
    pub fn new(
        analyzer: Arc<dyn Analyzer>,
        words: WordStore,
        pending: PendingSlot,
        surface: Arc<dyn PopupSurface>,
    ) -> Self {
        Self {
            analyzer,
            words,
            pending,
            surface,
        }
    }

    /// Dispatch one envelope. Known actions run on their own task and
    /// reply when done; unknown ones are refused at once.
    pub fn route(&self, envelope: Envelope) -> ReplyMode {
        let Envelope { id, request, reply } = envelope;

        let Some(action) = Action::parse(&request.action) else {
            tracing::warn!("Unhandled action: {}", request.action);
            let response = Response::failed(format!("Unknown action: {}", request.action));
            if reply.send(response).is_err() {
                tracing::debug!("[ROUTER] {} dropped before reply", id);
            }
            return ReplyMode::Immediate;
        };

        let router = self.clone();
        tokio::spawn(async move {
            let response = router.handle(action, &request.text).await;
            tracing::debug!("[ROUTER] {} {} -> success={}", id, action.as_str(), response.success);
            if reply.send(response).is_err() {
                tracing::debug!("[ROUTER] {} dropped before reply", id);
            }
        });

        ReplyMode::Deferred
    }

    pub async fn handle(&self, action: Action, text: &str) -> Response {
        match action {
            Action::GetDetailsAndShowPopup => {
                handle_show_popup(
                    self.analyzer.as_ref(),
                    &self.pending,
                    self.surface.as_ref(),
                    text,
                )
                .await
            }
            Action::AddWord => handle_add_word(self.analyzer.as_ref(), &self.words, text).await,
        }
    }
}

/// Background message loop
pub async fn router_loop(
    router: MessageRouter,
    rx: AsyncReceiver<Envelope>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[ROUTER] Waiting for messages");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[ROUTER] Stopping");
                break;
            }
            envelope = rx.recv() => {
                let envelope = envelope?;
                tracing::debug!("[ROUTER] Received {}", envelope.request.action);
                router.route(envelope);
            }
        }
    }

    Ok(())
}
