mod counter;
mod journal;
mod state;

use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::clock::Clock;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Candidate, CandidateId, Election, ElectionCore, ElectionId, VoteRecord, VoterId};

use journal::{Journal, LedgerEntry};
use state::LedgerState;

/// The ledger: exclusive owner of all elections, candidates and votes.
///
/// Every write is appended to the journal before it becomes visible, so a
/// reopened store always agrees with what callers were told. Votes are
/// final by construction: no update or delete method exists on this type.
///
/// Writes take the lock for the whole check-append-apply sequence, which
/// serializes the vote uniqueness check with the insert. Reads never block
/// each other.
pub struct LedgerStore {
    inner: RwLock<Inner>,
    clock: Arc<dyn Clock>,
}

struct Inner {
    state: LedgerState,
    journal: Journal,
}

impl LedgerStore {
    /// Open the ledger journal at `path`, replaying any existing entries.
    pub fn open(path: impl AsRef<Path>, clock: Arc<dyn Clock>) -> Result<Self> {
        let mut state = LedgerState::new();
        let journal = Journal::open(path.as_ref(), |entry| state.apply(entry))?;
        info!(
            "Ledger open at {} with {} elections",
            path.as_ref().display(),
            state.election_count()
        );
        Ok(Self {
            inner: RwLock::new(Inner { state, journal }),
            clock,
        })
    }

    /// Open the ledger at the configured journal path.
    pub fn from_config(config: &Config, clock: Arc<dyn Clock>) -> Result<Self> {
        Self::open(config.journal_path(), clock)
    }

    /// The clock this store (and the engines built on it) runs on.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Create a new election with the next sequential ID.
    pub fn create_election(
        &self,
        name: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Election> {
        if name.trim().is_empty() {
            return Err(Error::BadRequest("Election name must not be empty".into()));
        }
        if end_time <= start_time {
            return Err(Error::InvalidWindow {
                start: start_time,
                end: end_time,
            });
        }
        let now = self.clock.now();
        if start_time <= now {
            return Err(Error::PastStart {
                start: start_time,
                now,
            });
        }

        let mut guard = self.write();
        let Inner { state, journal } = &mut *guard;
        let election = Election {
            id: state.peek_next_election_id(),
            election: ElectionCore::new(name.to_string(), start_time, end_time),
        };
        let entry = LedgerEntry::ElectionCreated(election.clone());
        journal.append(&entry)?;
        state.apply(entry);
        info!("Created election {} \"{name}\"", election.id);
        Ok(election)
    }

    /// Attach a candidate to an election that has not started yet.
    /// Candidate IDs are sequential within the election, starting at 1.
    pub fn add_candidate(
        &self,
        election_id: ElectionId,
        name: &str,
        party: &str,
    ) -> Result<Candidate> {
        if name.trim().is_empty() {
            return Err(Error::BadRequest("Candidate name must not be empty".into()));
        }
        if party.trim().is_empty() {
            return Err(Error::BadRequest(
                "Candidate party must not be empty".into(),
            ));
        }
        let now = self.clock.now();

        let mut guard = self.write();
        let Inner { state, journal } = &mut *guard;
        let election = state
            .election(election_id)
            .ok_or(Error::UnknownElection(election_id))?;
        if now >= election.start_time {
            return Err(Error::ElectionAlreadyStarted(election_id));
        }
        let id = state
            .peek_next_candidate_id(election_id)
            .ok_or(Error::UnknownElection(election_id))?;

        let candidate = Candidate::new(id, election_id, name.to_string(), party.to_string());
        let entry = LedgerEntry::CandidateAdded(candidate.clone());
        journal.append(&entry)?;
        state.apply(entry);
        debug!("Added candidate {id} \"{name}\" to election {election_id}");
        Ok(candidate)
    }

    /// Record a vote. The candidate's count increment and the vote record
    /// are one journal entry, so both become durable together or not at
    /// all. The uniqueness check runs under the same lock as the insert:
    /// of N concurrent attempts by one voter, exactly one succeeds.
    pub fn record_vote(
        &self,
        election_id: ElectionId,
        voter: VoterId,
        candidate_id: CandidateId,
        cast_at: DateTime<Utc>,
    ) -> Result<VoteRecord> {
        let mut guard = self.write();
        let Inner { state, journal } = &mut *guard;
        if state.election(election_id).is_none() {
            return Err(Error::UnknownElection(election_id));
        }
        if state.has_voted(election_id, &voter) {
            warn!("Rejected duplicate vote in election {election_id}");
            return Err(Error::AlreadyVoted(election_id));
        }
        if state.candidate(election_id, candidate_id).is_none() {
            return Err(Error::UnknownCandidate {
                election_id,
                candidate_id,
            });
        }

        let vote = VoteRecord {
            election_id,
            voter,
            candidate_id,
            cast_at,
        };
        let entry = LedgerEntry::VoteRecorded(vote.clone());
        journal.append(&entry)?;
        state.apply(entry);
        debug!("Recorded vote for candidate {candidate_id} in election {election_id}");
        Ok(vote)
    }

    /// Look up an election by ID.
    pub fn election(&self, id: ElectionId) -> Result<Election> {
        self.read()
            .state
            .election(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("No election with ID {id}")))
    }

    /// Look up a candidate within an election.
    pub fn candidate(&self, election_id: ElectionId, id: CandidateId) -> Result<Candidate> {
        self.read()
            .state
            .candidate(election_id, id)
            .cloned()
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "No candidate with ID {id} in election {election_id}"
                ))
            })
    }

    /// All candidates of an election, in ID order.
    pub fn candidates(&self, election_id: ElectionId) -> Result<Vec<Candidate>> {
        self.read()
            .state
            .candidates(election_id)
            .map(|candidates| candidates.to_vec())
            .ok_or_else(|| Error::NotFound(format!("No election with ID {election_id}")))
    }

    /// Number of candidates attached to an election.
    pub fn candidate_count(&self, election_id: ElectionId) -> Result<u32> {
        Ok(self.candidates(election_id)?.len() as u32)
    }

    /// Number of elections ever created.
    pub fn election_count(&self) -> u32 {
        self.read().state.election_count()
    }

    /// Whether this voter has a recorded vote in this election.
    /// An unknown election simply has no votes.
    pub fn has_voted(&self, election_id: ElectionId, voter: &VoterId) -> bool {
        self.read().state.has_voted(election_id, voter)
    }

    /// This voter's recorded vote in this election, if any.
    pub fn vote(&self, election_id: ElectionId, voter: &VoterId) -> Option<VoteRecord> {
        self.read().state.vote(election_id, voter).cloned()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().expect("ledger lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().expect("ledger lock poisoned")
    }
}
