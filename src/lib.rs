//! A standalone election ledger: an append-only record of elections,
//! candidates and votes, with one-vote-per-voter-per-election enforcement
//! and deterministic tallies. Presentation layers and voter authentication
//! live elsewhere and talk to the engines defined here.

pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod store;
pub mod tally;
pub mod voting;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use registry::{ElectionRegistry, ElectionReport, MIN_CANDIDATES};
pub use store::LedgerStore;
pub use tally::{CandidateTally, Tally, TallyEngine};
pub use voting::VotingEngine;
