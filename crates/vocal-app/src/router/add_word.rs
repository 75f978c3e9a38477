use vocal_analyzer::Analyzer;
use vocal_core::Response;
use vocal_store::{StoreError, WordStore};

pub async fn handle_add_word(analyzer: &dyn Analyzer, words: &WordStore, text: &str) -> Response {
    let entry = match analyzer.analyze(text).await {
        Ok(entry) => entry,
        Err(e) => {
            tracing::warn!("Analysis of '{}' failed: {}", text, e);
            return Response::failed(e.to_string());
        }
    };

    match words.add(&entry).await {
        Ok(()) => Response::ok_with("Word added successfully."),
        Err(StoreError::AlreadyExists) => Response::failed(StoreError::AlreadyExists.to_string()),
        Err(e) => {
            tracing::error!("Failed to save '{}': {:?}", entry.word, e);
            Response::failed(e.to_string())
        }
    }
}
