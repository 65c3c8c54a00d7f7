//! Crew orchestration
//!
//! A crew owns a set of agents and an ordered list of tasks. `kickoff` runs
//! the tasks one at a time, feeding every earlier result into the next
//! task's prompt, and returns the last task's output.

mod output;
mod process;
mod runner;

pub use output::CrewOutput;
pub use process::Process;
pub use runner::{Crew, TaskCallback};
