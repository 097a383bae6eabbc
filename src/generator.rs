//! Fact generation with Gemini
//!
//! The model gets the article text and a difficulty level and must answer
//! with one fake and three real sentences in the `(sentence @ Bool) | ...`
//! format that [`crate::facts::parse_facts`] understands.

use crate::config::GeminiConfig;
use crate::types::Difficulty;
use serde_json::Value;
use std::time::Duration;

/// Generation errors. Any of these ends the game.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("GEMINI_API_KEY not set. Fact generation requires API access.")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Model returned empty response")]
    EmptyResponse,
}

/// Produces the raw statement list for one round
#[allow(async_fn_in_trait)]
pub trait FactGenerator {
    async fn generate_facts(
        &self,
        article: &str,
        difficulty: Difficulty,
    ) -> Result<String, GenerateError>;
}

pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerateError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl FactGenerator for GeminiClient {
    async fn generate_facts(
        &self,
        article: &str,
        difficulty: Difficulty,
    ) -> Result<String, GenerateError> {
        if self.config.api_key.is_empty() {
            return Err(GenerateError::MissingApiKey);
        }

        let request_body = serde_json::json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": build_prompt(article, difficulty) }]
                }
            ],
            "generationConfig": {
                "temperature": self.config.temperature
            }
        });

        tracing::debug!(
            "Requesting facts from {} ({} article bytes, {})",
            self.config.model,
            article.len(),
            difficulty
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerateError::Timeout(self.config.timeout_secs)
                } else {
                    GenerateError::Http(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| GenerateError::Http(format!("Invalid JSON response: {}", e)))?;

        let text = extract_text(&response_json).ok_or(GenerateError::EmptyResponse)?;
        tracing::debug!("Model output: {}", text);
        Ok(text)
    }
}

/// Concatenate the text parts of the first candidate
pub fn extract_text(response: &Value) -> Option<String> {
    let text: String = response["candidates"][0]["content"]["parts"]
        .as_array()?
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Build the generation prompt for an article
pub fn build_prompt(article: &str, difficulty: Difficulty) -> String {
    format!(
        r#"# Inputs:
The content of the article is: {article}

The selected level is: {difficulty}

# Role
You are part of a game called Fake Finder. A fact checking game that provides real facts and one fake fact.

# Goal
Select 3 factual sentences that are present in the article. Generate 1 wrong fake sentence based on a fourth one from the article.

# Rules
- The fake sentence should always be the first sentence.
- The Fake sentence should be followed by boolean "False".
- The Factual sentences should be followed by boolean "True".
- The sentences should not have more than 25 words.
- Do not hallucinate or generate random factual sentences.
- Focus only on the given input text.
- The level defines the complexity of the sentences:
  - easy = A simple sentence that is clearly true or false.
  - medium = A fact that requires moderate knowledge.
  - hard = A challenging fact where the fake is subtle.

# Output Format:
(fake_sentence @ False) | (fact_sentence_1 @ True) | (fact_sentence_2 @ True) | (fact_sentence_3 @ True)"#,
    )
}
