//! Gemini API client
//!
//! This module provides a direct HTTP client for the Gemini `generateContent`
//! REST endpoint, translating between the crate's [`Message`] type and the
//! Gemini wire format.
//!
//! # Authentication
//!
//! Uses a Google AI Studio API key, sent in the `x-goog-api-key` header.
//!
//! ```ignore
//! // From a loaded config
//! let llm = GeminiProvider::from_config(&CrewConfig::from_env()?)?;
//!
//! // With explicit API key
//! let llm = GeminiProvider::new("AIza...")?.with_model("gemini-2.5-flash");
//! ```

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::provider::LlmProvider;
use super::types::{Message, Usage};
use crate::config::{
    normalize_model, CrewConfig, DEFAULT_BASE_URL, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
};

// ============================================================================
// Gemini-specific request/response types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Set on thinking-summary parts, which are not part of the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

impl GeminiPart {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            thought: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

// Response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

// ============================================================================
// GeminiProvider
// ============================================================================

/// Gemini LLM provider
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    api_base: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with a specific API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            anyhow::bail!("Gemini API key must not be empty");
        }

        Ok(Self {
            client: Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            api_base: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a Gemini provider from a loaded [`CrewConfig`]
    pub fn from_config(config: &CrewConfig) -> Result<Self> {
        tracing::info!("Creating Gemini provider for model {}", config.model);

        Ok(Self::new(config.api_key.clone())?
            .with_model(config.model.clone())
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_output_tokens)
            .with_base_url(config.base_url.clone()))
    }

    /// Set the model to use; a `gemini/` prefix is stripped
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = normalize_model(model.into());
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the max output tokens for responses
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Point the client at a different API base (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    // ========================================================================
    // Format conversion
    // ========================================================================

    /// Convert internal messages to Gemini contents
    ///
    /// Gemini calls the assistant role "model".
    fn convert_messages(&self, messages: &[Message]) -> Vec<GeminiContent> {
        messages
            .iter()
            .map(|msg| GeminiContent {
                role: Some(if msg.is_user() { "user" } else { "model" }.to_string()),
                parts: vec![GeminiPart::text(msg.content.clone())],
            })
            .collect()
    }

    fn build_request(&self, messages: &[Message], system_prompt: Option<&str>) -> GeminiRequest {
        GeminiRequest {
            contents: self.convert_messages(messages),
            system_instruction: system_prompt
                .filter(|s| !s.is_empty())
                .map(|s| GeminiContent {
                    role: None,
                    parts: vec![GeminiPart::text(s)],
                }),
            generation_config: GeminiGenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_tokens,
            },
        }
    }

    /// Extract the answer text from the first candidate
    fn convert_response(&self, response: GeminiResponse) -> Result<(String, Usage)> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .context("No candidates in Gemini response")?;

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|p| !p.thought.unwrap_or(false))
            .filter_map(|p| p.text)
            .collect();

        if text.is_empty() {
            anyhow::bail!(
                "Gemini returned no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            );
        }

        let usage = response
            .usage_metadata
            .map(|u| Usage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        Ok((text, usage))
    }

    // ========================================================================
    // API methods
    // ========================================================================

    /// Send a non-streaming request to the Gemini API
    async fn send_gemini_request(&self, request: &GeminiRequest) -> Result<GeminiResponse> {
        let url = self.endpoint();

        let request_json =
            serde_json::to_string(request).context("Failed to serialize Gemini request")?;
        tracing::debug!("[Gemini] Request JSON: {}", request_json);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .body(request_json)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read Gemini response body")?;

        tracing::debug!("[Gemini] Response status: {}", status);
        tracing::debug!("[Gemini] Response body: {}", response_text);

        if !status.is_success() {
            tracing::error!("[Gemini] API error: {} - {}", status, response_text);
            anyhow::bail!("Gemini API error ({}): {}", status, response_text);
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&response_text)
            .context("Failed to parse Gemini API response")?;

        Ok(gemini_response)
    }
}

// ============================================================================
// LlmProvider implementation
// ============================================================================

#[async_trait::async_trait]
impl LlmProvider for GeminiProvider {
    async fn send_message(
        &self,
        user_message: &str,
        conversation_history: &[Message],
        system_prompt: Option<&str>,
    ) -> Result<String> {
        tracing::info!("[Gemini] Sending message to {}", self.model);

        let mut messages: Vec<Message> = conversation_history.to_vec();
        messages.push(Message::user(user_message));

        let request = self.build_request(&messages, system_prompt);
        let response = self.send_gemini_request(&request).await?;
        if let Some(ref version) = response.model_version {
            tracing::debug!("[Gemini] Model version: {}", version);
        }

        let (text, usage) = self.convert_response(response)?;
        tracing::info!(
            "[Gemini] Response received: {} input tokens, {} output tokens",
            usage.input_tokens,
            usage.output_tokens
        );

        Ok(text)
    }

    fn model(&self) -> String {
        self.model.clone()
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}
