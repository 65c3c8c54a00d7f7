use serde::{Deserialize, Serialize};

use super::TaskSpec;

/// Result of one task in a crew run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutput {
    pub description: String,
    pub expected_output: String,
    pub agent_role: String,
    /// Text returned by the model, untouched
    pub raw: String,
    pub summary: String,
}

impl TaskOutput {
    pub fn new(task: &TaskSpec, raw: impl Into<String>) -> Self {
        Self {
            description: task.description().to_string(),
            expected_output: task.expected_output().to_string(),
            agent_role: task.agent().role().to_string(),
            raw: raw.into(),
            summary: task.summary(),
        }
    }
}

impl std::fmt::Display for TaskOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
