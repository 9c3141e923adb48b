use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::warn;

use crate::error::{Error, Result};
use crate::model::{CandidateId, ElectionId, ElectionStatus, VoteRecord, VoterId};
use crate::store::LedgerStore;

/// Single source of truth for "can this voter cast this vote right now".
///
/// A recorded vote is final. There is deliberately no change or retract
/// operation anywhere in the crate.
pub struct VotingEngine {
    store: Arc<LedgerStore>,
}

impl VotingEngine {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    /// Cast a vote at the current time of the store's clock.
    pub fn vote(
        &self,
        election_id: ElectionId,
        voter: VoterId,
        candidate_id: CandidateId,
    ) -> Result<VoteRecord> {
        let now = self.store.clock().now();
        self.vote_at(election_id, voter, candidate_id, now)
    }

    /// Cast a vote at an explicit instant.
    pub fn vote_at(
        &self,
        election_id: ElectionId,
        voter: VoterId,
        candidate_id: CandidateId,
        now: DateTime<Utc>,
    ) -> Result<VoteRecord> {
        let election = match self.store.election(election_id) {
            Ok(election) => election,
            Err(Error::NotFound(_)) => return Err(Error::UnknownElection(election_id)),
            Err(err) => return Err(err),
        };

        let status = election.status_at(now);
        if status != ElectionStatus::Active {
            warn!("Rejected vote in election {election_id}: election is {status}");
            return Err(Error::NotActive {
                election_id,
                status,
            });
        }

        if self.store.has_voted(election_id, &voter) {
            return Err(Error::AlreadyVoted(election_id));
        }

        // The store re-checks the voter and the candidate under its write
        // lock, so concurrent duplicates still resolve to one success.
        self.store
            .record_vote(election_id, voter, candidate_id, now)
    }
}
