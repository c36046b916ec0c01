use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{ChatBackend, SYSTEM_INSTRUCTION};
use crate::config::ChatConfig;
use crate::error::{AppError, Result};
use crate::i18n::Language;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Client for the `generateContent` endpoint. No retry, transport-default timeout.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: ChatConfig,
}

impl GeminiClient {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

fn language_hint(prompt: &str, language: Language) -> String {
    format!("Reply in {}.\n\n{}", language.english_name(), prompt)
}

#[async_trait]
impl ChatBackend for GeminiClient {
    async fn generate(&self, prompt: &str, language: Language) -> Result<String> {
        if self.config.api_key.is_empty() {
            return Err(AppError::Chat("Chat API key is not configured".to_string()));
        }

        let user_text = language_hint(prompt, language);
        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: SYSTEM_INSTRUCTION }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: &user_text }],
            }],
        };

        debug!("Sending chat request to model {}", self.config.model);

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| {
                error!("Chat API returned an error status: {}", e);
                AppError::from(e)
            })?;

        let parsed: GenerateResponse = response.json().await?;
        parsed
            .text()
            .ok_or_else(|| AppError::Chat("Chat API returned no text".to_string()))
    }
}
