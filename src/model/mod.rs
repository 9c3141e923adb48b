mod candidate;
mod election;
mod spec;
mod vote;

pub use candidate::{Candidate, CandidateId, CandidateSpec};
pub use election::{Election, ElectionCore, ElectionId, ElectionStatus};
pub use spec::ElectionSpec;
pub use vote::{VoteRecord, VoterId};
