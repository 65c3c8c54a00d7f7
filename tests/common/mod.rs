//! Stub providers shared by the integration tests

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use cloudcrew::llm::{LlmProvider, Message};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One recorded model call
#[derive(Debug, Clone)]
pub struct Call {
    pub user_message: String,
    pub system_prompt: Option<String>,
}

/// Replies with the prompt it was given
#[derive(Default)]
pub struct EchoProvider {
    pub calls: Mutex<Vec<Call>>,
}

#[async_trait]
impl LlmProvider for EchoProvider {
    async fn send_message(
        &self,
        user_message: &str,
        _conversation_history: &[Message],
        system_prompt: Option<&str>,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(Call {
            user_message: user_message.to_string(),
            system_prompt: system_prompt.map(str::to_string),
        });
        Ok(user_message.to_string())
    }

    fn model(&self) -> String {
        "echo".to_string()
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}

/// Replies from a fixed script; an `Err` entry fails that call
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, String>>>,
    pub calls: Mutex<Vec<Call>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Result<&str, &str>>) -> Self {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn send_message(
        &self,
        user_message: &str,
        _conversation_history: &[Message],
        system_prompt: Option<&str>,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(Call {
            user_message: user_message.to_string(),
            system_prompt: system_prompt.map(str::to_string),
        });

        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => anyhow::bail!(message),
            None => anyhow::bail!("script exhausted"),
        }
    }

    fn model(&self) -> String {
        "scripted".to_string()
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}

/// Cloneable in-memory sink for console output
#[derive(Clone, Default)]
pub struct SharedBuffer(pub std::sync::Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
