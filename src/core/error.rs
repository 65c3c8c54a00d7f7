//! Error types for crew configuration and execution

use thiserror::Error;

/// Result alias for crew operations
pub type CrewResult<T> = Result<T, CrewError>;

/// Errors raised by the crew before or around model calls
///
/// Failures from the model API itself travel as `anyhow::Error` with
/// context attached at the HTTP boundary.
#[derive(Debug, Error)]
pub enum CrewError {
    #[error("missing configuration: {0} is not set")]
    MissingConfig(String),

    #[error("invalid configuration value for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },

    #[error("crew has no tasks to run")]
    NoTasks,

    #[error("task '{0}' is assigned to an agent that is not part of the crew")]
    UnknownAgent(String),

    #[error("prompt template references unknown slot '{{{0}}}'")]
    UnknownSlot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
