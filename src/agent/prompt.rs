//! Prompt templates with named slots
//!
//! Agents and tasks are turned into prompts by filling `{slot}` placeholders.
//! Slot values are inserted verbatim and never re-scanned, so model output
//! containing braces passes through untouched.

use regex::Regex;
use std::sync::OnceLock;

use crate::core::{CrewError, CrewResult};

/// Persona sent as the system instruction for every call an agent makes
pub const SYSTEM_TEMPLATE: &str = "You are {role}. {backstory}\nYour personal goal is: {goal}";

/// Task instruction sent as the user message
pub const TASK_TEMPLATE: &str = "Current Task: {description}\n\n\
This is the expected criteria for your final answer: {expected_output}\n\
You MUST return the actual complete content as the final answer, not a summary.";

/// Appended to the task instruction when earlier tasks produced output
pub const CONTEXT_TEMPLATE: &str = "\n\nThis is the context you're working with:\n{context}";

/// Separator placed between prior task results in the context slot
pub const CONTEXT_DIVIDER: &str = "\n\n----------\n\n";

fn slot_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid slot regex"))
}

/// Values for the named slots; unset slots render as empty text
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptSlots<'a> {
    pub role: &'a str,
    pub goal: &'a str,
    pub backstory: &'a str,
    pub description: &'a str,
    pub expected_output: &'a str,
    pub context: &'a str,
}

impl<'a> PromptSlots<'a> {
    fn get(&self, name: &str) -> Option<&'a str> {
        match name {
            "role" => Some(self.role),
            "goal" => Some(self.goal),
            "backstory" => Some(self.backstory),
            "description" => Some(self.description),
            "expected_output" => Some(self.expected_output),
            "context" => Some(self.context),
            _ => None,
        }
    }
}

/// A prompt with `{slot}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Slot names referenced by this template, in order of appearance
    pub fn slots(&self) -> Vec<&str> {
        slot_pattern()
            .captures_iter(&self.text)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Fill every slot, failing on names that are not known slots
    pub fn render(&self, slots: &PromptSlots<'_>) -> CrewResult<String> {
        if let Some(unknown) = self.slots().into_iter().find(|name| slots.get(name).is_none()) {
            return Err(CrewError::UnknownSlot(unknown.to_string()));
        }

        let rendered = slot_pattern().replace_all(&self.text, |caps: &regex::Captures<'_>| {
            slots.get(&caps[1]).unwrap_or_default().to_string()
        });

        Ok(rendered.into_owned())
    }
}

/// Join prior task results in execution order
pub fn join_context<S: AsRef<str>>(results: &[S]) -> String {
    results
        .iter()
        .map(|r| r.as_ref())
        .collect::<Vec<_>>()
        .join(CONTEXT_DIVIDER)
}
