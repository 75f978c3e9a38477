use serde::Deserialize;
use serde_json::Value;
use unicode_normalization::UnicodeNormalization;
use vocal_core::WordEntry;

use crate::types::GenerateContentResponse;
use crate::{AnalysisError, EMPTY_RESPONSE, PARSE_FAILED};

/// Fields as the model emits them, before validation
#[derive(Deserialize)]
struct RawAnalysis {
    word: Option<String>,
    phonetic: Option<String>,
    #[serde(rename = "partOfSpeech")]
    part_of_speech: Option<String>,
    definition_en: Option<String>,
    translation_vi: Option<String>,
    example_en: Option<String>,
}

/// Text of the first candidate's first part
pub fn extract_payload(response: &GenerateContentResponse) -> Result<String, AnalysisError> {
    let first = response.candidates.first();

    if let Some(text) = first
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.first())
        .and_then(|p| p.text.clone())
    {
        return Ok(text);
    }

    let reason = first
        .and_then(|c| c.finish_reason.as_deref())
        .or_else(|| {
            response
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
        })
        .unwrap_or("Unknown");
    tracing::debug!("No usable candidate, reason: {}", reason);

    if reason == "SAFETY" {
        Err(AnalysisError::ContentBlocked)
    } else {
        Err(AnalysisError::MalformedResponse(EMPTY_RESPONSE.to_string()))
    }
}

/// Validate the model's JSON payload and normalize it into a `WordEntry`
pub fn parse_analysis(payload: &str) -> Result<WordEntry, AnalysisError> {
    let value: Value = serde_json::from_str(payload.trim()).map_err(|e| {
        tracing::error!("Failed to parse JSON: {}\nReceived text: {}", e, payload);
        AnalysisError::MalformedResponse(PARSE_FAILED.to_string())
    })?;

    if let Some(message) = value.get("error").and_then(error_message) {
        return Err(AnalysisError::NotFound(message));
    }

    let raw: RawAnalysis = serde_json::from_value(value).map_err(|e| {
        tracing::error!("Unexpected analysis shape: {}\nReceived text: {}", e, payload);
        AnalysisError::MalformedResponse(PARSE_FAILED.to_string())
    })?;

    let fields = [
        raw.word,
        raw.phonetic,
        raw.part_of_speech,
        raw.definition_en,
        raw.translation_vi,
        raw.example_en,
    ];
    let mut fields = fields.into_iter().map(|f| f.map(|v| normalize(&v)));
    let mut next = || {
        fields.next().flatten().filter(|v| !v.is_empty()).ok_or_else(|| {
            tracing::error!("Invalid JSON structure received: {}", payload);
            AnalysisError::MalformedResponse(PARSE_FAILED.to_string())
        })
    };

    Ok(WordEntry {
        word: next()?,
        phonetic: next()?,
        part_of_speech: next()?,
        definition_en: next()?,
        translation_vi: next()?,
        example_en: next()?,
        timestamp: None,
    })
}

/// Falsy `error` values (null, false, "") do not count as a refusal
fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn normalize(text: &str) -> String {
    text.trim().nfc().collect()
}
