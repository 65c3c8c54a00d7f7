use std::fmt;
use std::sync::Arc;

use crate::agent::prompt::{PromptSlots, PromptTemplate, CONTEXT_TEMPLATE, TASK_TEMPLATE};
use crate::agent::AgentSpec;
use crate::core::CrewResult;

/// An instruction, its expected-output description, and the agent that runs it
#[derive(Clone)]
pub struct TaskSpec {
    description: String,
    expected_output: String,
    agent: Arc<AgentSpec>,
}

impl TaskSpec {
    pub fn new(
        description: impl Into<String>,
        expected_output: impl Into<String>,
        agent: Arc<AgentSpec>,
    ) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
            agent,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn expected_output(&self) -> &str {
        &self.expected_output
    }

    pub fn agent(&self) -> &Arc<AgentSpec> {
        &self.agent
    }

    /// Render the user-facing prompt for this task
    ///
    /// The context section is only added when `context` is non-empty.
    pub fn prompt(&self, context: &str) -> CrewResult<String> {
        let slots = PromptSlots {
            description: &self.description,
            expected_output: &self.expected_output,
            context,
            ..Default::default()
        };

        let mut prompt = PromptTemplate::new(TASK_TEMPLATE).render(&slots)?;
        if !context.trim().is_empty() {
            prompt.push_str(&PromptTemplate::new(CONTEXT_TEMPLATE).render(&slots)?);
        }
        Ok(prompt)
    }

    /// First ten words of the description, used in progress output
    pub fn summary(&self) -> String {
        let words: Vec<&str> = self.description.split_whitespace().take(10).collect();
        format!("{}...", words.join(" "))
    }
}

impl fmt::Debug for TaskSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskSpec")
            .field("description", &self.description)
            .field("expected_output", &self.expected_output)
            .field("agent", &self.agent.role())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmProvider, Message};
    use anyhow::Result;
    use async_trait::async_trait;

    struct NullProvider;

    #[async_trait]
    impl LlmProvider for NullProvider {
        async fn send_message(
            &self,
            _user_message: &str,
            _history: &[Message],
            _system_prompt: Option<&str>,
        ) -> Result<String> {
            Ok(String::new())
        }

        fn model(&self) -> String {
            "null".to_string()
        }

        fn provider_name(&self) -> &str {
            "test"
        }
    }

    fn task(description: &str) -> TaskSpec {
        let agent = Arc::new(AgentSpec::new("Role", "Goal", "Backstory", Arc::new(NullProvider)));
        TaskSpec::new(description, "A document", agent)
    }

    #[test]
    fn test_prompt_without_context() {
        let prompt = task("Design the system").prompt("").unwrap();
        assert!(prompt.starts_with("Current Task: Design the system"));
        assert!(prompt.contains("expected criteria for your final answer: A document"));
        assert!(!prompt.contains("context you're working with"));
    }

    #[test]
    fn test_prompt_with_context() {
        let prompt = task("Review it").prompt("The design").unwrap();
        assert!(prompt.ends_with("This is the context you're working with:\nThe design"));
    }

    #[test]
    fn test_summary() {
        assert_eq!(task("Short task").summary(), "Short task...");
        assert_eq!(
            task("one two three four five six seven eight nine ten eleven").summary(),
            "one two three four five six seven eight nine ten..."
        );
    }
}
