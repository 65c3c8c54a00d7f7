//! Run the cloud design crew against Gemini
//!
//! Run with: GOOGLE_API_KEY=... cargo run

use anyhow::{Context, Result};
use std::process::ExitCode;
use std::sync::Arc;

use cloudcrew::{
    cli::Console, config::CrewConfig, llm::GeminiProvider, logging, runs::RunStorage,
    scenario::cloud_design_crew,
};

#[tokio::main]
async fn main() -> ExitCode {
    let console = Console::new();

    match run(&console).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Crew run failed: {:?}", e);
            console.print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(console: &Console) -> Result<()> {
    logging::init_logging()?;
    console.print_banner();

    let config = CrewConfig::from_env()?;
    let llm = Arc::new(
        GeminiProvider::from_config(&config).context("Failed to create Gemini provider")?,
    );

    let mut crew = cloud_design_crew(llm).with_verbose(true);
    let storage = config.runs_dir.clone().map(RunStorage::with_dir);
    if let Some(ref storage) = storage {
        crew = crew.with_storage(storage.clone());
    }

    let output = crew.kickoff().await?;

    console.print_final_result(&output.raw);
    if let Some(storage) = storage {
        console.print_system(&format!(
            "Run record saved to {}",
            storage.run_path(&output.run_id.to_string()).display()
        ));
    }

    Ok(())
}
