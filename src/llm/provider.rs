//! LLM provider trait
//!
//! Agents hold an `Arc<dyn LlmProvider>` so the crew can run against the
//! hosted API or a test double without changing anything else.

use anyhow::Result;
use async_trait::async_trait;

use super::types::Message;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one user message with optional history and system prompt,
    /// returning the model's text reply
    async fn send_message(
        &self,
        user_message: &str,
        conversation_history: &[Message],
        system_prompt: Option<&str>,
    ) -> Result<String>;

    /// The model identifier requests are sent to
    fn model(&self) -> String;

    /// Short provider name for logs
    fn provider_name(&self) -> &str;
}
