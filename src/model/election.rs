use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Elections are numbered globally and sequentially, starting at 1.
/// IDs are never reused.
pub type ElectionId = u32;

/// Core election data, as recorded in the journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionCore {
    /// Election name.
    pub name: String,
    /// Start of the voting window (inclusive).
    pub start_time: DateTime<Utc>,
    /// End of the voting window (exclusive).
    pub end_time: DateTime<Utc>,
}

impl ElectionCore {
    pub fn new(name: String, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            name,
            start_time,
            end_time,
        }
    }

    /// Lifecycle stage at the given instant.
    pub fn status_at(&self, now: DateTime<Utc>) -> ElectionStatus {
        if now < self.start_time {
            ElectionStatus::Upcoming
        } else if now < self.end_time {
            ElectionStatus::Active
        } else {
            ElectionStatus::Ended
        }
    }

    /// Whether the voting window `[start_time, end_time)` contains the given instant.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) == ElectionStatus::Active
    }
}

/// An election from the ledger, with its assigned ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    pub id: ElectionId,
    #[serde(flatten)]
    pub election: ElectionCore,
}

impl Deref for Election {
    type Target = ElectionCore;

    fn deref(&self) -> &Self::Target {
        &self.election
    }
}

/// Stages of the election lifecycle, relative to the voting window.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElectionStatus {
    /// Voting has not yet opened.
    Upcoming,
    /// Voting is open right now.
    Active,
    /// Voting has closed. Results are final.
    Ended,
}

impl Display for ElectionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            ElectionStatus::Upcoming => "upcoming",
            ElectionStatus::Active => "active",
            ElectionStatus::Ended => "ended",
        };
        write!(f, "{s}")
    }
}
