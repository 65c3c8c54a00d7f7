pub mod agent_spec;
pub mod prompt;

pub use agent_spec::AgentSpec;
pub use prompt::{PromptSlots, PromptTemplate, SYSTEM_TEMPLATE, TASK_TEMPLATE};
