//! Task definitions and their outputs
//!
//! A task is an instruction bound to exactly one agent. Tasks are created once
//! and never mutated; running one yields a [`TaskOutput`].

mod output;
mod spec;

pub use output::TaskOutput;
pub use spec::TaskSpec;
