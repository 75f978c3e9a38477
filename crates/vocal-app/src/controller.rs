use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use vocal_analyzer::Analyzer;
use vocal_core::Envelope;

use crate::channel::PageChannel;
use crate::io::{HostEvent, HostOutput, host_loop, stdin_io, stdout_io};
use crate::router::{MessageRouter, router_loop};
use crate::state::AppState;
use crate::surface::ChannelSurface;

/// Centralized channel management
pub struct ChannelSet {
    pub messages: (AsyncSender<Envelope>, AsyncReceiver<Envelope>),
    pub host: (AsyncSender<HostEvent>, AsyncReceiver<HostEvent>),
    pub output: (AsyncSender<HostOutput>, AsyncReceiver<HostOutput>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: kanal::bounded_async(capacity), // page → background
            host: kanal::bounded_async(capacity),     // gestures and popup requests
            output: kanal::bounded_async(256),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, capacity: usize) -> Self {
        Self {
            channels: ChannelSet::new(capacity),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Router wired to this host's stores and popup surface
    pub fn router(&self, analyzer: Arc<dyn Analyzer>) -> MessageRouter {
        MessageRouter::new(
            analyzer,
            self.state.words.clone(),
            self.state.pending.clone(),
            Arc::new(ChannelSurface::new(self.channels.host.0.clone())),
        )
    }

    pub fn page_channel(&self) -> PageChannel {
        PageChannel::new(self.channels.messages.0.clone())
    }

    pub fn spawn_tasks(&self, analyzer: Arc<dyn Analyzer>) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Background context
        tasks.spawn(router_loop(
            self.router(analyzer),
            self.channels.messages.1.clone(),
            self.cancel_token.child_token(),
        ));

        // Page and popup contexts
        tasks.spawn(host_loop(
            self.state.clone(),
            self.channels.host.1.clone(),
            self.channels.output.0.clone(),
            self.page_channel(),
            self.cancel_token.child_token(),
        ));

        tasks.spawn(stdin_io(
            self.channels.host.0.clone(),
            self.cancel_token.child_token(),
        ));
        tasks.spawn(stdout_io(
            self.channels.output.1.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
