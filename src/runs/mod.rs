//! Run records
//!
//! Finished crew runs can be written to disk as one JSON file per run.

mod storage;

pub use storage::RunStorage;
