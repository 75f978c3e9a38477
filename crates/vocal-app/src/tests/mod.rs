//! Shared fakes for app-level tests

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use vocal_analyzer::{AnalysisError, Analyzer, ProviderMetadata};
use vocal_core::WordEntry;
use vocal_store::{MemoryStorage, PendingSlot, WordStore};

use crate::router::MessageRouter;
use crate::selection::Notifier;
use crate::surface::{PopupSurface, SurfaceError};


pub fn sample(word: &str) -> WordEntry {
    WordEntry {
        word: word.to_string(),
        phonetic: "ˈsæmpəl".to_string(),
        part_of_speech: "noun".to_string(),
        definition_en: format!("meaning of {word}"),
        translation_vi: "nghĩa".to_string(),
        example_en: "N/A".to_string(),
        timestamp: None,
    }
}

/// Analyzer answering from a fixed word table
pub struct FakeAnalyzer {
    known: HashMap<String, WordEntry>,
    failure: Option<fn() -> AnalysisError>,
    calls: AtomicUsize,
}

impl FakeAnalyzer {
    pub fn new() -> Self {
        Self {
            known: HashMap::new(),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_word(mut self, entry: WordEntry) -> Self {
        self.known.insert(entry.word.to_lowercase(), entry);
        self
    }

    pub fn failing(failure: fn() -> AnalysisError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Analyzer for FakeAnalyzer {
    async fn analyze(&self, word: &str) -> Result<WordEntry, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(failure) = self.failure {
            return Err(failure());
        }

        let word = word.trim();
        match self.known.get(&word.to_lowercase()) {
            // The model echoes the selected spelling back
            Some(entry) => Ok(WordEntry {
                word: word.to_string(),
                ..entry.clone()
            }),
            None => Err(AnalysisError::NotFound("Word not found or invalid.".to_string())),
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".to_string(),
            model_url: String::new(),
            requires_api_key: false,
        }
    }
}

#[derive(Default)]
pub struct RecordingSurface {
    opens: AtomicUsize,
    fail: bool,
}

impl RecordingSurface {
    pub fn refusing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PopupSurface for RecordingSurface {
    async fn open_popup(&self) -> Result<(), SurfaceError> {
        if self.fail {
            return Err(SurfaceError::Open("popup denied by host".to_string()));
        }
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn acknowledge(&self, message: String) {
        self.messages.lock().unwrap().push(message);
    }
}

pub struct Harness {
    pub analyzer: Arc<FakeAnalyzer>,
    pub words: WordStore,
    pub pending: PendingSlot,
    pub surface: Arc<RecordingSurface>,
    pub router: MessageRouter,
}

pub fn harness_with(analyzer: FakeAnalyzer, surface: RecordingSurface) -> Harness {
    let analyzer = Arc::new(analyzer);
    let surface = Arc::new(surface);
    let words = WordStore::new(Arc::new(MemoryStorage::new()));
    let pending = PendingSlot::new(Arc::new(MemoryStorage::new()));
    let router = MessageRouter::new(
        analyzer.clone(),
        words.clone(),
        pending.clone(),
        surface.clone(),
    );

    Harness {
        analyzer,
        words,
        pending,
        surface,
        router,
    }
}

pub fn harness(analyzer: FakeAnalyzer) -> Harness {
    harness_with(analyzer, RecordingSurface::default())
}
