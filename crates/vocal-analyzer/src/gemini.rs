use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use vocal_config::analyzer::AnalyzerConfig;
use vocal_core::WordEntry;

use crate::parse::{extract_payload, parse_analysis};
use crate::prompt::build_prompt;
use crate::types::{GenerateContentRequest, GenerateContentResponse};
use crate::{AnalysisError, Analyzer, EMPTY_RESPONSE, ProviderMetadata, classify_failure};

/// Gemini-backed lexical analyzer
#[derive(Clone)]
pub struct GeminiAnalyzer {
    client: Client,
    api_key: String,
    api_url: String,
}

impl GeminiAnalyzer {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url,
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(config.api_key.clone(), config.api_url.clone())
    }
}

#[async_trait]
impl Analyzer for GeminiAnalyzer {
    async fn analyze(&self, word: &str) -> Result<WordEntry, AnalysisError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(AnalysisError::InvalidInput);
        }

        if self.api_key.is_empty() {
            return Err(AnalysisError::InvalidCredential);
        }

        let request = GenerateContentRequest::json_prompt(build_prompt(word));
        debug!("Gemini analyze: word={}", word);

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .inspect_err(|e| tracing::error!("Network error calling Gemini API: {}", e))?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = classify_failure(status.as_u16(), &body);
            tracing::warn!("Gemini API request failed ({}): {}", status, err);
            return Err(err);
        }

        let data: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            AnalysisError::MalformedResponse(EMPTY_RESPONSE.to_string())
        })?;

        let payload = extract_payload(&data)?;
        parse_analysis(&payload)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            model_url: self.api_url.clone(),
            requires_api_key: true,
        }
    }
}

#[cfg(test)]
#[path = "gemini_tests.rs"]
mod tests;
