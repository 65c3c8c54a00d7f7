//! Sequential task runner
//!
//! Tasks execute strictly in order. Task *i* receives the results of tasks
//! *1..i-1* joined into its context slot. The first failure aborts the run:
//! later tasks are never attempted and no partial output is returned.

use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::output::CrewOutput;
use super::process::Process;
use crate::agent::prompt::join_context;
use crate::agent::AgentSpec;
use crate::cli::Console;
use crate::core::{CrewError, CrewResult};
use crate::runs::RunStorage;
use crate::task::{TaskOutput, TaskSpec};

/// Called after each task finishes, before the next one starts
pub type TaskCallback = Arc<dyn Fn(&TaskOutput) + Send + Sync>;

/// A group of agents working through an ordered task list
pub struct Crew {
    agents: Vec<Arc<AgentSpec>>,
    tasks: Vec<TaskSpec>,
    process: Process,
    console: Console,
    verbose: bool,
    storage: Option<RunStorage>,
    task_callback: Option<TaskCallback>,
}

impl Crew {
    pub fn new(agents: Vec<Arc<AgentSpec>>, tasks: Vec<TaskSpec>) -> Self {
        Self {
            agents,
            tasks,
            process: Process::default(),
            console: Console::new(),
            verbose: false,
            storage: None,
            task_callback: None,
        }
    }

    pub fn with_process(mut self, process: Process) -> Self {
        self.process = process;
        self
    }

    /// Print per-task progress and answers through the console
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Console used for progress output when verbose
    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Save a record of each successful run
    pub fn with_storage(mut self, storage: RunStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_task_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&TaskOutput) + Send + Sync + 'static,
    {
        self.task_callback = Some(Arc::new(callback));
        self
    }

    pub fn agents(&self) -> &[Arc<AgentSpec>] {
        &self.agents
    }

    pub fn tasks(&self) -> &[TaskSpec] {
        &self.tasks
    }

    pub fn process(&self) -> Process {
        self.process
    }

    /// Check the crew can run without calling any model
    pub fn validate(&self) -> CrewResult<()> {
        if self.tasks.is_empty() {
            return Err(CrewError::NoTasks);
        }

        for task in &self.tasks {
            if !self.agents.iter().any(|a| Arc::ptr_eq(a, task.agent())) {
                return Err(CrewError::UnknownAgent(task.summary()));
            }
        }

        Ok(())
    }

    /// Run every task and return the final output
    pub async fn kickoff(&self) -> Result<CrewOutput> {
        self.validate()?;

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        tracing::info!(
            "Crew run {} starting: {} agents, {} tasks, {} process",
            run_id,
            self.agents.len(),
            self.tasks.len(),
            self.process
        );

        let tasks_output = match self.process {
            Process::Sequential => self.run_sequential().await?,
        };

        let raw = tasks_output
            .last()
            .map(|o| o.raw.clone())
            .unwrap_or_default();

        let output = CrewOutput {
            run_id,
            raw,
            tasks_output,
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            "Crew run {} finished in {} ms",
            run_id,
            output.duration().num_milliseconds()
        );

        if let Some(ref storage) = self.storage {
            storage
                .save(&output)
                .context("Failed to save run record")?;
        }

        Ok(output)
    }

    async fn run_sequential(&self) -> Result<Vec<TaskOutput>> {
        let mut outputs: Vec<TaskOutput> = Vec::with_capacity(self.tasks.len());

        for (index, task) in self.tasks.iter().enumerate() {
            let agent = task.agent();

            if agent.allow_delegation() {
                tracing::warn!(
                    "Agent '{}' allows delegation, which the sequential process ignores",
                    agent.role()
                );
            }

            let prior: Vec<&str> = outputs.iter().map(|o| o.raw.as_str()).collect();
            let context = join_context(&prior);

            tracing::info!(
                "Task {}/{} started by '{}' ({} chars of context)",
                index + 1,
                self.tasks.len(),
                agent.role(),
                context.len()
            );
            if self.verbose {
                self.console.print_task_start(agent.role(), task.description());
            }

            let raw = agent
                .execute_task(task, &context)
                .await
                .with_context(|| format!("Task {} ('{}') failed", index + 1, agent.role()))?;

            let output = TaskOutput::new(task, raw);
            if self.verbose {
                self.console.print_final_answer(agent.role(), &output.raw);
            }
            if let Some(ref callback) = self.task_callback {
                callback(&output);
            }

            outputs.push(output);
        }

        Ok(outputs)
    }
}

impl std::fmt::Debug for Crew {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crew")
            .field("agents", &self.agents)
            .field("tasks", &self.tasks)
            .field("process", &self.process)
            .field("verbose", &self.verbose)
            .field("storage", &self.storage)
            .finish()
    }
}
