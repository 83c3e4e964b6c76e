use crate::extractors::error::ExtractionError;
use crate::extractors::traits::CriteriaExtractor;
use crate::extractors::types::ExtractedFields;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str = "You extract search criteria for rental listings.";

/// Criteria extractor backed by an OpenAI-compatible chat completions endpoint
pub struct OpenAiExtractor {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiExtractor {
    /// Create an extractor against the public OpenAI API with the default model
    pub fn new(api_key: impl Into<String>) -> Result<Self, ExtractionError> {
        Self::with_options(api_key, DEFAULT_BASE_URL, DEFAULT_MODEL, Duration::from_secs(30))
    }

    /// Create an extractor with a custom endpoint, model and request timeout
    pub fn with_options(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, ExtractionError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ExtractionError::Config("OpenAI API key is required".to_string()));
        }

        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ExtractionError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    fn build_prompt(query: &str) -> String {
        format!(
            "Extract the search criteria for a rental flat: zone (or neighborhood), \
             max_price, num_rooms (if any) and tags (luminoso, balcón, ascensor, mascotas, \
             terraza, reformado).\n\
             User says: {}\n\
             Return JSON with keys: zone, max_price, num_rooms, tags (list).",
            query
        )
    }
}

#[async_trait]
impl CriteriaExtractor for OpenAiExtractor {
    async fn extract(&self, query: &str) -> Result<ExtractedFields, ExtractionError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(Self::build_prompt(query)),
                },
            ],
            temperature: 0.0,
        };

        debug!("Requesting criteria from {} (model {})", self.base_url, self.model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAI returned status: {}", status);
            return Err(ExtractionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let completion: ChatResponse = serde_json::from_str(&body)?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| ExtractionError::Malformed("no content in completion".to_string()))?;

        debug!("Completion content: {}", content);

        let object = find_json_object(&content).ok_or_else(|| {
            ExtractionError::Malformed("no JSON object in completion".to_string())
        })?;
        let value: serde_json::Value = serde_json::from_str(object)?;

        ExtractedFields::from_json(&value)
    }

    fn name(&self) -> &'static str {
        "OpenAI"
    }
}

/// First `{` through last `}` of the text, so JSON wrapped in prose or fences still parses
fn find_json_object(text: &str) -> Option<&str> {
    static OBJECT: OnceLock<Regex> = OnceLock::new();
    let re = OBJECT.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("valid JSON object regex"));
    re.find(text).map(|m| m.as_str())
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}
