//! Agent definitions
//!
//! An agent is a persona (role, goal, backstory) bound to a model. It holds
//! no conversation state: every task it executes is a single fresh call.

use anyhow::Result;
use std::fmt;
use std::sync::Arc;

use super::prompt::{PromptSlots, PromptTemplate, SYSTEM_TEMPLATE};
use crate::core::CrewResult;
use crate::llm::LlmProvider;
use crate::task::TaskSpec;

/// Immutable persona bound to a model handle
pub struct AgentSpec {
    role: String,
    goal: String,
    backstory: String,
    allow_delegation: bool,
    llm: Arc<dyn LlmProvider>,
    system_template: PromptTemplate,
}

impl AgentSpec {
    /// Create a new agent; delegation is off by default
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            allow_delegation: false,
            llm,
            system_template: PromptTemplate::new(SYSTEM_TEMPLATE),
        }
    }

    /// Allow or forbid delegation to other agents
    ///
    /// Only the sequential process exists, so an enabled flag is recorded
    /// but never acted on.
    pub fn with_allow_delegation(mut self, allow: bool) -> Self {
        self.allow_delegation = allow;
        self
    }

    /// Replace the persona template used as the system instruction
    pub fn with_system_template(mut self, template: PromptTemplate) -> Self {
        self.system_template = template;
        self
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn allow_delegation(&self) -> bool {
        self.allow_delegation
    }

    /// Render the persona into the system instruction
    pub fn system_prompt(&self) -> CrewResult<String> {
        self.system_template.render(&PromptSlots {
            role: &self.role,
            goal: &self.goal,
            backstory: &self.backstory,
            ..Default::default()
        })
    }

    /// Run one task against this agent's model
    ///
    /// `context` is the joined output of earlier tasks; empty means none.
    pub async fn execute_task(&self, task: &TaskSpec, context: &str) -> Result<String> {
        let system_prompt = self.system_prompt()?;
        let user_prompt = task.prompt(context)?;

        tracing::info!(
            "Agent '{}' executing task via {}/{}",
            self.role,
            self.llm.provider_name(),
            self.llm.model()
        );
        tracing::debug!("Task prompt: {}", user_prompt);

        let answer = self
            .llm
            .send_message(&user_prompt, &[], Some(&system_prompt))
            .await?;

        tracing::info!("Agent '{}' finished ({} chars)", self.role, answer.len());
        Ok(answer)
    }
}

impl fmt::Debug for AgentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentSpec")
            .field("role", &self.role)
            .field("goal", &self.goal)
            .field("allow_delegation", &self.allow_delegation)
            .field("model", &self.llm.model())
            .finish()
    }
}
