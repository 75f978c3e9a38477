//! In-page selection menu.
//!
//! A two-state machine: `Idle` or `MenuShown` with exactly one floating
//! menu. Every new selection or outside pointer-down drops the current
//! menu before anything else happens.

use serde::{Deserialize, Serialize};
use vocal_config::ui::UiConfig;
use vocal_core::{Action, Request};

use crate::channel::PageChannel;

/// Floating menu anchored above the pointer-up point.
///
/// `left` is the horizontal center; the menu is drawn centered on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloatingMenu {
    pub word: String,
    pub left: i32,
    pub top: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    Translate,
    AddToStudy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState {
    Idle,
    MenuShown(FloatingMenu),
}

/// Command issued after a menu button is pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub action: MenuAction,
    pub word: String,
}

impl Command {
    pub fn request(&self) -> Request {
        let action = match self.action {
            MenuAction::Translate => Action::GetDetailsAndShowPopup,
            MenuAction::AddToStudy => Action::AddWord,
        };
        Request::new(action, self.word.clone())
    }
}

/// Single letters never open the menu, whatever the config says
pub const MIN_WORD_LEN: usize = 2;

/// Whole selection is ASCII letters and at least `min_len` long
pub fn is_selectable_word(text: &str, min_len: usize) -> bool {
    text.len() >= min_len.max(MIN_WORD_LEN) && text.chars().all(|c| c.is_ascii_alphabetic())
}

pub struct SelectionUi {
    state: MenuState,
    config: UiConfig,
}

impl SelectionUi {
    pub fn new(config: UiConfig) -> Self {
        Self {
            state: MenuState::Idle,
            config,
        }
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    pub fn menu(&self) -> Option<&FloatingMenu> {
        match &self.state {
            MenuState::MenuShown(menu) => Some(menu),
            MenuState::Idle => None,
        }
    }

    /// Pointer pressed somewhere. Returns true if a menu was removed.
    pub fn on_pointer_down(&mut self, inside_menu: bool) -> bool {
        if inside_menu {
            return false;
        }
        self.dismiss()
    }

    /// A selection finished at page coordinates (`x`, `y`)
    pub fn on_selection(&mut self, text: &str, x: i32, y: i32) -> Option<&FloatingMenu> {
        self.dismiss();

        let word = text.trim();
        if !is_selectable_word(word, self.config.min_word_len) {
            return None;
        }

        self.state = MenuState::MenuShown(FloatingMenu {
            word: word.to_string(),
            left: x,
            top: y.saturating_sub(self.config.menu_offset_y),
        });
        self.menu()
    }

    /// Press a menu button. The menu is gone before the command is issued.
    pub fn activate(&mut self, action: MenuAction) -> Option<Command> {
        match std::mem::replace(&mut self.state, MenuState::Idle) {
            MenuState::MenuShown(menu) => Some(Command {
                action,
                word: menu.word,
            }),
            MenuState::Idle => None,
        }
    }

    fn dismiss(&mut self) -> bool {
        matches!(
            std::mem::replace(&mut self.state, MenuState::Idle),
            MenuState::MenuShown(_)
        )
    }
}

/// Blocking user acknowledgement, like an alert box
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn acknowledge(&self, message: String);
}

/// Send `command` to the background and surface the outcome.
///
/// Translate failures only reach the log; add results always reach the user.
pub async fn issue_command(channel: &PageChannel, command: Command, notifier: &dyn Notifier) {
    let result = channel.send_message(command.request()).await;

    match command.action {
        MenuAction::Translate => match result {
            Err(e) => tracing::error!("Error sending message: {}", e),
            Ok(response) if !response.success => tracing::error!(
                "Background script failed: {}",
                response.message.unwrap_or_default()
            ),
            Ok(_) => tracing::debug!("Popup requested for '{}'", command.word),
        },
        MenuAction::AddToStudy => {
            let message = match result {
                Err(e) => {
                    tracing::error!("Error sending message: {}", e);
                    format!("Error: {e}")
                }
                Ok(response) if response.success => {
                    format!("Added \"{}\" to study list.", command.word)
                }
                Ok(response) => format!(
                    "Failed to add \"{}\". {}",
                    command.word,
                    response.message.unwrap_or_default()
                ),
            };
            notifier.acknowledge(message).await;
        }
    }
}
