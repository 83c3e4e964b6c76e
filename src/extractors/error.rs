use std::time::Duration;
use thiserror::Error;

/// Failures of an external criteria extractor.
///
/// None of these abort a search: the interpreter falls back to heuristics.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Extractor misconfigured: {0}")]
    Config(String),

    #[error("Extractor request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Extractor returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Extractor returned unparseable content: {0}")]
    Malformed(String),

    #[error("Extractor timed out after {0:?}")]
    Timeout(Duration),
}

impl From<serde_json::Error> for ExtractionError {
    fn from(err: serde_json::Error) -> Self {
        ExtractionError::Malformed(err.to_string())
    }
}
