mod gemini;
mod parse;
mod prompt;
mod types;

pub use gemini::GeminiAnalyzer;
pub use parse::{extract_payload, parse_analysis};
pub use prompt::build_prompt;
pub use types::*;

use vocal_core::WordEntry;

/// Lexical analysis provider interface
#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyze a single word. One attempt per call, no retries.
    async fn analyze(&self, word: &str) -> Result<WordEntry, AnalysisError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model_url: String,
    pub requires_api_key: bool,
}

/// Analysis failures. `Display` is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid word input.")]
    InvalidInput,

    #[error("Network error contacting AI service.")]
    Network(#[from] reqwest::Error),

    #[error("{message}")]
    Provider { status: u16, message: String },

    #[error("Invalid Gemini API Key. Please check the key in options.")]
    InvalidCredential,

    #[error("Gemini API quota exceeded.")]
    QuotaExceeded,

    #[error("Content blocked by AI safety filters.")]
    ContentBlocked,

    #[error("{0}")]
    MalformedResponse(String),

    #[error("{0}")]
    NotFound(String),
}

pub(crate) const PARSE_FAILED: &str = "Failed to parse response from AI.";
pub(crate) const EMPTY_RESPONSE: &str = "Invalid or empty response structure from AI.";

/// Map a non-2xx provider reply onto the error taxonomy
pub(crate) fn classify_failure(status: u16, body: &str) -> AnalysisError {
    let message = serde_json::from_str::<GeminiError>(body)
        .ok()
        .and_then(|e| e.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Gemini API request failed ({status})."));

    if status == 400 && message.contains("API key not valid") {
        AnalysisError::InvalidCredential
    } else if status == 429 {
        AnalysisError::QuotaExceeded
    } else {
        AnalysisError::Provider { status, message }
    }
}
