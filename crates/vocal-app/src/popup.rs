//! Popup presenter.
//!
//! Each activation shows either the one-shot "just translated" word or
//! the words saved on the current local calendar day.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use vocal_core::{NOT_AVAILABLE, WordEntry, available};
use vocal_store::{PendingSlot, WordStore};

const SAVED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryLine {
    Header {
        word: String,
        phonetic: Option<String>,
    },
    PartOfSpeech {
        text: String,
    },
    Definition {
        text: String,
    },
    /// `placeholder` marks an error text like `[translation unavailable]`
    Translation {
        text: String,
        placeholder: bool,
    },
    Example {
        text: String,
    },
    Saved {
        at: String,
    },
}

impl Display for EntryLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryLine::Header { word, phonetic } => match phonetic {
                Some(p) => write!(f, "{word} /{p}/"),
                None => write!(f, "{word}"),
            },
            EntryLine::PartOfSpeech { text } => write!(f, "({text})"),
            EntryLine::Definition { text } => write!(f, "Eng: {text}"),
            EntryLine::Translation { text, placeholder } => {
                if *placeholder {
                    write!(f, "Vie: !{text}")
                } else {
                    write!(f, "Vie: {text}")
                }
            }
            EntryLine::Example { text } => write!(f, "Ex: {text}"),
            EntryLine::Saved { at } => write!(f, "Saved: {at}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEntry {
    pub word: String,
    pub lines: Vec<EntryLine>,
}

impl Display for RenderedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum PopupView {
    JustTranslated { entry: RenderedEntry },
    Today { entries: Vec<RenderedEntry> },
    NoWordsToday,
    LoadFailed { message: String },
}

/// Render one entry; `saved_in` adds the save time in that zone
pub fn render_entry<Tz>(entry: &WordEntry, saved_in: Option<&Tz>) -> RenderedEntry
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut lines = vec![EntryLine::Header {
        word: entry.word.clone(),
        phonetic: available(&entry.phonetic).map(str::to_string),
    }];

    if let Some(pos) = available(&entry.part_of_speech) {
        lines.push(EntryLine::PartOfSpeech {
            text: pos.to_string(),
        });
    }

    let definition = if entry.definition_en.is_empty() {
        NOT_AVAILABLE
    } else {
        entry.definition_en.as_str()
    };
    lines.push(EntryLine::Definition {
        text: definition.to_string(),
    });

    if !entry.translation_vi.is_empty() {
        lines.push(EntryLine::Translation {
            text: entry.translation_vi.clone(),
            placeholder: entry.has_translation_placeholder(),
        });
    }

    if let Some(example) = available(&entry.example_en) {
        lines.push(EntryLine::Example {
            text: example.to_string(),
        });
    }

    if let (Some(tz), Some(ts)) = (saved_in, entry.timestamp) {
        if let Some(at) = tz.timestamp_millis_opt(ts).single() {
            lines.push(EntryLine::Saved {
                at: at.format(SAVED_FORMAT).to_string(),
            });
        }
    }

    RenderedEntry {
        word: entry.word.clone(),
        lines,
    }
}

/// Entries saved on `now`'s calendar day in `now`'s zone, in stored order
pub fn saved_today<'a, Tz: TimeZone>(
    words: &'a [WordEntry],
    now: &DateTime<Tz>,
) -> Vec<&'a WordEntry> {
    let today = now.date_naive();
    let tz = now.timezone();

    words
        .iter()
        .filter(|entry| {
            entry
                .timestamp
                .and_then(|ts| tz.timestamp_millis_opt(ts).single())
                .is_some_and(|saved| saved.date_naive() == today)
        })
        .collect()
}

pub struct PopupPresenter {
    words: WordStore,
    pending: PendingSlot,
}

impl PopupPresenter {
    pub fn new(words: WordStore, pending: PendingSlot) -> Self {
        Self { words, pending }
    }

    pub async fn activate(&self) -> PopupView {
        self.activate_at(Local::now()).await
    }

    pub async fn activate_at<Tz>(&self, now: DateTime<Tz>) -> PopupView
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self.pending.take().await {
            Ok(Some(entry)) => {
                tracing::debug!("[POPUP] Showing just translated '{}'", entry.word);
                return PopupView::JustTranslated {
                    entry: render_entry::<Tz>(&entry, None),
                };
            }
            Ok(None) => {}
            Err(e) => tracing::error!("Error reading pending popup word: {}", e),
        }

        let all = match self.words.list_all().await {
            Ok(all) => all,
            Err(e) => {
                tracing::error!("Error loading saved words: {}", e);
                return PopupView::LoadFailed {
                    message: "Error loading saved words.".to_string(),
                };
            }
        };

        let tz = now.timezone();
        let entries: Vec<RenderedEntry> = saved_today(&all, &now)
            .into_iter()
            .map(|entry| render_entry(entry, Some(&tz)))
            .collect();

        tracing::debug!("[POPUP] {} of {} words saved today", entries.len(), all.len());
        if entries.is_empty() {
            PopupView::NoWordsToday
        } else {
            PopupView::Today { entries }
        }
    }
}
