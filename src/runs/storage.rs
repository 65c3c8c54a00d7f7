//! Run storage helpers
//!
//! Handles reading and writing run records to disk.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use crate::core::CrewResult;
use crate::crew::CrewOutput;

/// Run storage manager
#[derive(Debug, Clone)]
pub struct RunStorage {
    base_dir: PathBuf,
}

impl RunStorage {
    /// Create a run storage rooted at `dir`
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: dir.into(),
        }
    }

    /// Get the record path for a run
    pub fn run_path(&self, run_id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", run_id))
    }

    /// Save a finished run, returning the file it was written to
    pub fn save(&self, output: &CrewOutput) -> CrewResult<PathBuf> {
        fs::create_dir_all(&self.base_dir)?;
        let path = self.run_path(&output.run_id.to_string());

        let file = File::create(&path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, output)?;

        tracing::info!("Run record saved to {}", path.display());
        Ok(path)
    }

    /// Load a run record by id
    pub fn load(&self, run_id: &str) -> CrewResult<CrewOutput> {
        let file = File::open(self.run_path(run_id))?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// List stored run ids, oldest first by file name
    pub fn list_runs(&self) -> CrewResult<Vec<String>> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids: Vec<String> = fs::read_dir(&self.base_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskOutput;
    use chrono::Utc;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn sample_output() -> CrewOutput {
        let task = TaskOutput {
            description: "Design".to_string(),
            expected_output: "Doc".to_string(),
            agent_role: "Architect".to_string(),
            raw: "the design".to_string(),
            summary: "Design...".to_string(),
        };
        CrewOutput {
            run_id: Uuid::new_v4(),
            raw: task.raw.clone(),
            tasks_output: vec![task],
            started_at: Utc::now(),
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let storage = RunStorage::with_dir(dir.path().join("runs"));
        let output = sample_output();

        let path = storage.save(&output).unwrap();
        assert!(path.exists());

        let loaded = storage.load(&output.run_id.to_string()).unwrap();
        assert_eq!(loaded, output);
        assert_eq!(storage.list_runs().unwrap(), vec![output.run_id.to_string()]);
    }

    #[test]
    fn test_list_runs_missing_dir() {
        let dir = TempDir::new().unwrap();
        let storage = RunStorage::with_dir(dir.path().join("nope"));
        assert!(storage.list_runs().unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_run() {
        let dir = TempDir::new().unwrap();
        let storage = RunStorage::with_dir(dir.path());
        assert!(storage.load("missing").is_err());
    }
}
