use colored::*;
use std::fmt::Display;
use std::io::{self, Write};
use std::sync::Mutex;

const RULE_WIDTH: usize = 50;

/// Console handles all terminal output with colored formatting
pub struct Console {
    agent_color: Color,
    answer_color: Color,
    out: Mutex<Box<dyn Write + Send>>,
}

impl Console {
    /// Create a new Console writing to stdout
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a Console writing to any sink
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            agent_color: Color::Magenta,
            answer_color: Color::Green,
            out: Mutex::new(Box::new(writer)),
        }
    }

    fn line(&self, text: impl Display) {
        if let Ok(mut out) = self.out.lock() {
            // Console output is best effort; a closed pipe must not fail the run
            let _ = writeln!(out, "{}", text);
            let _ = out.flush();
        }
    }

    /// Print the startup banner
    pub fn print_banner(&self) {
        self.line(
            "🚀 Booting up the Automated Cloud Infrastructure Design Team..."
                .bright_blue()
                .bold(),
        );
        self.line("Initiating crew sequence. Please wait while the agents collaborate...");
        self.line("");
    }

    /// Announce that an agent has picked up a task
    pub fn print_task_start(&self, role: &str, description: &str) {
        self.line(format!(
            "{} {}",
            "# Agent:".color(self.agent_color).bold(),
            role.color(self.agent_color)
        ));
        self.line(format!("{} {}", "## Task:".bold(), description));
        self.line("");
    }

    /// Print an agent's answer to its task
    pub fn print_final_answer(&self, role: &str, answer: &str) {
        self.line(format!(
            "{} {}",
            "# Agent:".color(self.agent_color).bold(),
            role.color(self.agent_color)
        ));
        self.line("## Final Answer:".bold());
        self.line(answer.color(self.answer_color));
        self.line("");
        self.print_separator();
    }

    /// Print the heading and text of the crew's final result
    pub fn print_final_result(&self, result: &str) {
        let rule = "=".repeat(RULE_WIDTH);
        self.line("");
        self.line(rule.bright_blue());
        self.line("✅ FINAL DEVSECOPS REVIEW & SECURED ARCHITECTURE".bright_blue().bold());
        self.line(rule.bright_blue());
        self.line("");
        self.line(result);
    }

    /// Print a system message (info, saved paths, etc.)
    pub fn print_system(&self, message: &str) {
        self.line(format!("{} {}", "System:".yellow().bold(), message));
    }

    /// Print an error message
    pub fn print_error(&self, error: &str) {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }

    /// Print a separator line
    pub fn print_separator(&self) {
        self.line("-".repeat(RULE_WIDTH).bright_black());
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
