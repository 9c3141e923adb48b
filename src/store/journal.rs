use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Candidate, Election, VoteRecord};

/// One durable ledger event. Replaying the journal in order reproduces the
/// full ledger state. A vote is a single entry carrying both the record
/// and, implicitly, the candidate's increment, so the two can never be
/// observed apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entry", rename_all = "snake_case")]
pub enum LedgerEntry {
    ElectionCreated(Election),
    CandidateAdded(Candidate),
    VoteRecorded(VoteRecord),
}

/// The append-only journal backing the ledger: one JSON entry per line.
/// There is no API to rewrite or truncate it.
#[derive(Debug)]
pub struct Journal {
    file: File,
}

impl Journal {
    /// Open the journal at `path`, creating it (and its parent directory)
    /// if missing, and feed any existing entries through `apply` in order.
    /// A malformed line surfaces as a typed error rather than a panic.
    pub fn open(path: &Path, mut apply: impl FnMut(LedgerEntry)) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut replayed = 0usize;
        if path.exists() {
            let reader = BufReader::new(File::open(path)?);
            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let entry: LedgerEntry = serde_json::from_str(&line)?;
                apply(entry);
                replayed += 1;
            }
        }
        if replayed > 0 {
            info!("Replayed {replayed} ledger entries from {}", path.display());
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Durably append one entry. The entry is on disk when this returns.
    pub fn append(&mut self, entry: &LedgerEntry) -> Result<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');
        self.file.write_all(line.as_bytes())?;
        self.file.sync_data()?;
        Ok(())
    }
}
