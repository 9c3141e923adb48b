use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{CandidateId, ElectionId, ElectionStatus};
use crate::store::LedgerStore;

/// Computes ranked results from the ledger. The same code path serves a
/// live mid-election tally and the final result; only the caller's framing
/// differs.
pub struct TallyEngine {
    store: Arc<LedgerStore>,
}

/// One candidate's standing within a tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateTally {
    pub id: CandidateId,
    pub name: String,
    pub party: String,
    pub vote_count: u64,
    /// Share of the total vote, 0 to 100. Zero for every candidate when no
    /// votes have been cast.
    pub percentage: f64,
}

/// A ranked vote-count summary for one election at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub election_id: ElectionId,
    /// Ordered by vote count descending; ties by ascending candidate ID.
    pub candidates: Vec<CandidateTally>,
    pub total_votes: u64,
}

impl Tally {
    /// The leading candidate(s): more than one on a tie, empty only for an
    /// election with no candidates at all.
    pub fn winners(&self) -> Vec<&CandidateTally> {
        match self.candidates.first() {
            Some(leader) => self
                .candidates
                .iter()
                .take_while(|c| c.vote_count == leader.vote_count)
                .collect(),
            None => Vec::new(),
        }
    }
}

impl TallyEngine {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    /// Rank the election's candidates by recorded votes.
    pub fn tally(&self, election_id: ElectionId) -> Result<Tally> {
        let mut candidates = self.store.candidates(election_id)?;
        candidates.sort_by(|a, b| b.vote_count.cmp(&a.vote_count).then(a.id.cmp(&b.id)));

        let total_votes: u64 = candidates.iter().map(|c| c.vote_count).sum();
        let candidates = candidates
            .into_iter()
            .map(|c| {
                let percentage = if total_votes > 0 {
                    c.vote_count as f64 / total_votes as f64 * 100.0
                } else {
                    0.0
                };
                CandidateTally {
                    id: c.id,
                    name: c.name,
                    party: c.party,
                    vote_count: c.vote_count,
                    percentage,
                }
            })
            .collect();

        Ok(Tally {
            election_id,
            candidates,
            total_votes,
        })
    }

    /// Lifecycle stage of the election at the given instant.
    pub fn election_status(
        &self,
        election_id: ElectionId,
        now: DateTime<Utc>,
    ) -> Result<ElectionStatus> {
        Ok(self.store.election(election_id)?.status_at(now))
    }
}
