use crate::extractors::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::interpreter::DEFAULT_EXTRACT_TIMEOUT;
use std::time::Duration;
use tracing::warn;

/// Runtime settings, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Enables the OpenAI extractor when set
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub model: String,
    /// Upper bound on one extractor call
    pub extract_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            extract_timeout: DEFAULT_EXTRACT_TIMEOUT,
        }
    }
}

impl Settings {
    /// Load settings from the process environment, after an optional `.env` file
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let extract_timeout = match non_blank("RENTMATCH_EXTRACT_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(
                        "Invalid RENTMATCH_EXTRACT_TIMEOUT_SECS {:?}, using {:?}",
                        raw, defaults.extract_timeout
                    );
                    defaults.extract_timeout
                }
            },
            None => defaults.extract_timeout,
        };

        Self {
            openai_api_key: non_blank("OPENAI_API_KEY"),
            openai_base_url: non_blank("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            model: non_blank("RENTMATCH_MODEL").unwrap_or(defaults.model),
            extract_timeout,
        }
    }
}
