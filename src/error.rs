use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{CandidateId, ElectionId, ElectionStatus};

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong inside the ledger. All variants are
/// recoverable by the caller; callers are expected to match on the kind
/// (e.g. to tell [`Error::AlreadyVoted`] apart from [`Error::NotActive`]).
#[derive(Debug, Error)]
pub enum Error {
    #[error("End time {end} is not after start time {start}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("Start time {start} is not in the future (now {now})")]
    PastStart {
        start: DateTime<Utc>,
        now: DateTime<Utc>,
    },
    #[error("No election with ID {0}")]
    UnknownElection(ElectionId),
    #[error("No candidate with ID {candidate_id} in election {election_id}")]
    UnknownCandidate {
        election_id: ElectionId,
        candidate_id: CandidateId,
    },
    #[error("Election {0} has already started, candidates can no longer be added")]
    ElectionAlreadyStarted(ElectionId),
    #[error("Election {election_id} is not accepting votes ({status})")]
    NotActive {
        election_id: ElectionId,
        status: ElectionStatus,
    },
    #[error("Voter has already voted in election {0}")]
    AlreadyVoted(ElectionId),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Journal(#[from] serde_json::Error),
}
