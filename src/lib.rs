//! Sequential two-agent crew driven by a hosted LLM
//!
//! Agents are personas bound to a model; tasks are instructions bound to one
//! agent. A [`crew::Crew`] runs its tasks in order and threads each result
//! into the next task's prompt.

pub mod agent;
pub mod cli;
pub mod config;
pub mod core;
pub mod crew;
pub mod llm;
pub mod logging;
pub mod runs;
pub mod scenario;
pub mod task;

pub use agent::AgentSpec;
pub use config::CrewConfig;
pub use crate::core::{CrewError, CrewResult};
pub use crew::{Crew, CrewOutput, Process};
pub use llm::{GeminiProvider, LlmProvider};
pub use task::{TaskOutput, TaskSpec};
