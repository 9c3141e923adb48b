use serde::{Deserialize, Serialize};

use super::election::ElectionId;

/// Candidates are numbered within their election, starting at 1.
pub type CandidateId = u32;

/// A candidate standing in a single election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    /// The owning election.
    pub election_id: ElectionId,
    pub name: String,
    pub party: String,
    /// Number of votes recorded for this candidate. Only ever incremented.
    pub vote_count: u64,
}

impl Candidate {
    /// A fresh candidate with no votes.
    pub fn new(id: CandidateId, election_id: ElectionId, name: String, party: String) -> Self {
        Self {
            id,
            election_id,
            name,
            party,
            vote_count: 0,
        }
    }
}

/// Name and party for a candidate not yet attached to an election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSpec {
    pub name: String,
    pub party: String,
}

impl CandidateSpec {
    pub fn new(name: impl Into<String>, party: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            party: party.into(),
        }
    }
}
