//! Headless host driver: user gestures in as JSON lines on stdin,
//! menus, alerts and popup views out as JSON lines on stdout.

use std::sync::Arc;

use async_trait::async_trait;
use kanal::{AsyncReceiver, AsyncSender};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::channel::PageChannel;
use crate::popup::{PopupPresenter, PopupView};
use crate::selection::{FloatingMenu, MenuAction, Notifier, SelectionUi, issue_command};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    Select {
        text: String,
        x: i32,
        y: i32,
    },
    PointerDown {
        #[serde(default)]
        inside_menu: bool,
    },
    Click {
        action: MenuAction,
    },
    OpenPopup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostOutput {
    Menu { menu: FloatingMenu },
    MenuHidden,
    Alert { message: String },
    Popup { view: PopupView },
}

/// Shows acknowledgements as alert lines
pub struct AlertNotifier {
    out: AsyncSender<HostOutput>,
}

impl AlertNotifier {
    pub fn new(out: AsyncSender<HostOutput>) -> Self {
        Self { out }
    }
}

#[async_trait]
impl Notifier for AlertNotifier {
    async fn acknowledge(&self, message: String) {
        if let Err(e) = self.out.send(HostOutput::Alert { message }).await {
            tracing::error!("Failed to show alert: {}", e);
        }
    }
}

/// Page and popup contexts
pub async fn host_loop(
    state: Arc<AppState>,
    rx: AsyncReceiver<HostEvent>,
    out: AsyncSender<HostOutput>,
    channel: PageChannel,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let ui_config = state.config.read().await.ui.clone();
    let mut ui = SelectionUi::new(ui_config);
    let presenter = PopupPresenter::new(state.words.clone(), state.pending.clone());
    let notifier = Arc::new(AlertNotifier::new(out.clone()));

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[HOST] Stopping");
                break;
            }
            event = rx.recv() => event?,
        };

        match event {
            HostEvent::Select { text, x, y } => {
                let had_menu = ui.menu().is_some();
                match ui.on_selection(&text, x, y).cloned() {
                    Some(menu) => out.send(HostOutput::Menu { menu }).await?,
                    None if had_menu => out.send(HostOutput::MenuHidden).await?,
                    None => {}
                }
            }
            HostEvent::PointerDown { inside_menu } => {
                if ui.on_pointer_down(inside_menu) {
                    out.send(HostOutput::MenuHidden).await?;
                }
            }
            HostEvent::Click { action } => {
                let Some(command) = ui.activate(action) else {
                    tracing::warn!("[HOST] Click with no menu shown");
                    continue;
                };
                out.send(HostOutput::MenuHidden).await?;

                let channel = channel.clone();
                let notifier = notifier.clone();
                tokio::spawn(async move {
                    issue_command(&channel, command, notifier.as_ref()).await;
                });
            }
            HostEvent::OpenPopup => {
                let view = presenter.activate().await;
                out.send(HostOutput::Popup { view }).await?;
            }
        }
    }

    Ok(())
}

/// Gesture reader. Keeps running after EOF until cancelled.
pub async fn stdin_io(tx: AsyncSender<HostEvent>, cancel: CancellationToken) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("[HOST] stdin closed");
                    cancel.cancelled().await;
                    break;
                };

                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match serde_json::from_str::<HostEvent>(line) {
                    Ok(event) => tx.send(event).await?,
                    Err(e) => tracing::warn!("Ignoring malformed host event: {}", e),
                }
            }
        }
    }

    Ok(())
}

pub async fn stdout_io(rx: AsyncReceiver<HostOutput>, cancel: CancellationToken) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();

    loop {
        let output = tokio::select! {
            _ = cancel.cancelled() => break,
            output = rx.recv() => output?,
        };

        let mut line = serde_json::to_vec(&output)?;
        line.push(b'\n');
        stdout.write_all(&line).await?;
        stdout.flush().await?;
    }

    Ok(())
}
