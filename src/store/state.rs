use std::collections::{BTreeMap, HashMap};

use crate::model::{Candidate, CandidateId, Election, ElectionId, VoteRecord, VoterId};

use super::counter::Counter;
use super::journal::LedgerEntry;

/// In-memory view of the ledger, rebuilt by replaying the journal at open.
#[derive(Debug)]
pub(super) struct LedgerState {
    elections: BTreeMap<ElectionId, ElectionRecord>,
    election_ids: Counter,
}

/// An election plus everything recorded under it.
#[derive(Debug)]
struct ElectionRecord {
    election: Election,
    candidates: Vec<Candidate>,
    candidate_ids: Counter,
    votes: HashMap<VoterId, VoteRecord>,
}

impl ElectionRecord {
    fn new(election: Election) -> Self {
        Self {
            election,
            candidates: Vec::new(),
            candidate_ids: Counter::new(1),
            votes: HashMap::new(),
        }
    }
}

impl LedgerState {
    pub fn new() -> Self {
        Self {
            elections: BTreeMap::new(),
            election_ids: Counter::new(1),
        }
    }

    /// Apply a journal entry. Entries come either from replay or from a
    /// write path that already validated them against this state, so
    /// application cannot fail.
    pub fn apply(&mut self, entry: LedgerEntry) {
        match entry {
            LedgerEntry::ElectionCreated(election) => {
                self.election_ids.advance_past(election.id);
                self.elections
                    .insert(election.id, ElectionRecord::new(election));
            }
            LedgerEntry::CandidateAdded(candidate) => {
                if let Some(record) = self.elections.get_mut(&candidate.election_id) {
                    record.candidate_ids.advance_past(candidate.id);
                    record.candidates.push(candidate);
                }
            }
            LedgerEntry::VoteRecorded(vote) => {
                if let Some(record) = self.elections.get_mut(&vote.election_id) {
                    if let Some(candidate) = record
                        .candidates
                        .iter_mut()
                        .find(|c| c.id == vote.candidate_id)
                    {
                        candidate.vote_count += 1;
                    }
                    record.votes.insert(vote.voter.clone(), vote);
                }
            }
        }
    }

    pub fn election(&self, id: ElectionId) -> Option<&Election> {
        self.elections.get(&id).map(|record| &record.election)
    }

    pub fn election_count(&self) -> u32 {
        self.elections.len() as u32
    }

    pub fn candidates(&self, election_id: ElectionId) -> Option<&[Candidate]> {
        self.elections
            .get(&election_id)
            .map(|record| record.candidates.as_slice())
    }

    pub fn candidate(&self, election_id: ElectionId, id: CandidateId) -> Option<&Candidate> {
        self.candidates(election_id)?.iter().find(|c| c.id == id)
    }

    pub fn has_voted(&self, election_id: ElectionId, voter: &VoterId) -> bool {
        self.elections
            .get(&election_id)
            .map(|record| record.votes.contains_key(voter))
            .unwrap_or(false)
    }

    pub fn vote(&self, election_id: ElectionId, voter: &VoterId) -> Option<&VoteRecord> {
        self.elections.get(&election_id)?.votes.get(voter)
    }

    /// The ID the next election will be assigned.
    pub fn peek_next_election_id(&self) -> ElectionId {
        self.election_ids.peek()
    }

    /// The ID the next candidate of this election will be assigned.
    pub fn peek_next_candidate_id(&self, election_id: ElectionId) -> Option<CandidateId> {
        self.elections
            .get(&election_id)
            .map(|record| record.candidate_ids.peek())
    }
}
