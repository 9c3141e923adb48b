use std::sync::Arc;

use log::warn;

use crate::error::{Error, Result};
use crate::model::{CandidateId, Election, ElectionId, ElectionSpec};
use crate::store::LedgerStore;

/// Minimum slate size for an election to be meaningfully votable.
///
/// Advisory rather than a store invariant: the store accepts smaller
/// slates, and callers should check [`ElectionRegistry::is_ready`] before
/// presenting an election for voting.
pub const MIN_CANDIDATES: u32 = 2;

/// Sets up elections: creates the election and attaches its slate of
/// candidates as one logical operation.
pub struct ElectionRegistry {
    store: Arc<LedgerStore>,
}

/// Outcome of a batch creation.
///
/// The election exists even when a candidate insertion failed part-way
/// through; there is no rollback, matching the append-only ledger.
/// `candidate_ids` holds what committed before the first failure, and
/// `error` makes the failure observable rather than hidden.
#[derive(Debug)]
pub struct ElectionReport {
    pub election: Election,
    pub candidate_ids: Vec<CandidateId>,
    pub error: Option<Error>,
}

impl ElectionReport {
    /// Whether every requested candidate was attached.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

impl ElectionRegistry {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    /// Create an election and attach its candidates in order.
    ///
    /// Fails outright (nothing created) if the slate is too small or the
    /// election itself is rejected. Once the election exists, candidate
    /// failures stop the batch but keep everything committed so far; the
    /// report carries the first error.
    pub fn create_election_with_candidates(&self, spec: ElectionSpec) -> Result<ElectionReport> {
        if (spec.candidates.len() as u32) < MIN_CANDIDATES {
            return Err(Error::BadRequest(format!(
                "An election needs at least {MIN_CANDIDATES} candidates, got {}",
                spec.candidates.len()
            )));
        }

        let election = self
            .store
            .create_election(&spec.name, spec.start_time, spec.end_time)?;

        let mut candidate_ids = Vec::with_capacity(spec.candidates.len());
        let mut error = None;
        for candidate in spec.candidates {
            match self
                .store
                .add_candidate(election.id, &candidate.name, &candidate.party)
            {
                Ok(added) => candidate_ids.push(added.id),
                Err(err) => {
                    warn!(
                        "Election {} left incomplete after {} candidates: {err}",
                        election.id,
                        candidate_ids.len()
                    );
                    error = Some(err);
                    break;
                }
            }
        }

        Ok(ElectionReport {
            election,
            candidate_ids,
            error,
        })
    }

    /// Whether the election's slate is big enough to open voting.
    pub fn is_ready(&self, election_id: ElectionId) -> Result<bool> {
        Ok(self.store.candidate_count(election_id)? >= MIN_CANDIDATES)
    }
}
