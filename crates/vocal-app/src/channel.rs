use kanal::AsyncSender;
use vocal_core::{Envelope, Request, Response};

/// Errors surfaced to the page when a message cannot complete
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Could not establish connection. Receiving end does not exist.")]
    Disconnected,

    #[error("The message port closed before a response was received.")]
    NoReply,
}

/// Page-side end of the page → background message channel
#[derive(Clone)]
pub struct PageChannel {
    tx: AsyncSender<Envelope>,
}

impl PageChannel {
    pub fn new(tx: AsyncSender<Envelope>) -> Self {
        Self { tx }
    }

    /// Send one request and wait for its single reply
    pub async fn send_message(&self, request: Request) -> Result<Response, ChannelError> {
        let (envelope, reply) = Envelope::new(request);
        tracing::debug!("[PAGE] Sending {} ({})", envelope.request.action, envelope.id);

        self.tx
            .send(envelope)
            .await
            .map_err(|_| ChannelError::Disconnected)?;

        reply.await.map_err(|_| ChannelError::NoReply)
    }
}
