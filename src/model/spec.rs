use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::candidate::CandidateSpec;

/// An election specification: everything needed to set up an election and
/// its slate of candidates in one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionSpec {
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub candidates: Vec<CandidateSpec>,
}

impl ElectionSpec {
    pub fn new(
        name: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        candidates: Vec<CandidateSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            start_time,
            end_time,
            candidates,
        }
    }
}
