use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Library configuration, deserialized from whatever config source the
/// embedding process uses. Accessors derive the paths the ledger needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    data_dir: PathBuf,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory holding all durable ledger state.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the append-only ledger journal.
    pub fn journal_path(&self) -> PathBuf {
        self.data_dir.join("ledger.jsonl")
    }
}
