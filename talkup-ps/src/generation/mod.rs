//! Generation provider client
//!
//! Talks to a Gemini-style `generateContent` REST endpoint and turns the
//! model's output into practice items. Failures never cross this module's
//! boundary: the primary model is tried first, then the secondary, and if
//! both fail the batch is simply empty ("soft failure"). Callers fall back
//! to static content on an empty result.

pub mod prompt;
pub mod sanitize;

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use talkup_common::config::Config;
use talkup_common::types::{Difficulty, PracticeItem};
use thiserror::Error;
use tracing::{debug, info, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Content category requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Topics,
    Grammar,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Topics => f.write_str("topics"),
            Category::Grammar => f.write_str("grammar"),
        }
    }
}

/// Provider call failures, handled entirely inside this module
#[derive(Debug, Error)]
enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider returned status {0}: {1}")]
    Status(u16, String),

    #[error("unexpected payload shape: {0}")]
    Payload(String),

    #[error("could not parse item array: {0}")]
    Parse(String),
}

/// `generateContent` response shape (only the fields we read)
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

/// Client for the external text-generation provider
pub struct GenerationClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    /// Model chain, tried in order until one succeeds
    models: Vec<String>,
}

impl GenerationClient {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        primary_model: String,
        secondary_model: String,
    ) -> talkup_common::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| talkup_common::Error::Provider(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            api_key,
            models: vec![primary_model, secondary_model],
        })
    }

    pub fn from_config(config: &Config) -> talkup_common::Result<Self> {
        Self::new(
            config.provider_base_url.clone(),
            config.api_key.clone(),
            config.primary_model.clone(),
            config.secondary_model.clone(),
        )
    }

    /// Request a batch of practice items from the provider.
    ///
    /// Returns an empty Vec when no API key is configured or when every
    /// model in the chain fails; never returns an error.
    pub async fn generate_batch(
        &self,
        category: Category,
        count: usize,
        difficulty: Option<Difficulty>,
    ) -> Vec<PracticeItem> {
        let Some(api_key) = &self.api_key else {
            debug!("No provider API key configured, skipping {} generation", category);
            return Vec::new();
        };

        let prompt = prompt::build(category, count, difficulty);

        for model in &self.models {
            match self.call_model(model, api_key, &prompt).await {
                Ok(items) => {
                    info!(
                        "Generated {} {} items with model {}",
                        items.len(),
                        category,
                        model
                    );
                    return items;
                }
                Err(e) => {
                    warn!("Model {} failed for {} batch: {}", model, category, e);
                }
            }
        }

        warn!("All models failed for {} batch, returning empty result", category);
        Vec::new()
    }

    /// One request against one model
    async fn call_model(
        &self,
        model: &str,
        api_key: &str,
        prompt: &str,
    ) -> Result<Vec<PracticeItem>, ProviderError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status(status.as_u16(), detail));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Payload(e.to_string()))?;

        let text = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                ProviderError::Payload("response contained no candidate text".to_string())
            })?;

        let cleaned = sanitize::strip_code_fences(&text);
        serde_json::from_str(&cleaned).map_err(|e| ProviderError::Parse(e.to_string()))
    }
}
