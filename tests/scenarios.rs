use std::sync::Arc;

use chrono::{Duration, Utc};
use tempfile::TempDir;

use ballot_ledger::model::{CandidateSpec, ElectionSpec, ElectionStatus, VoterId};
use ballot_ledger::{
    Clock, ElectionRegistry, Error, LedgerStore, ManualClock, TallyEngine, VotingEngine,
};

struct Harness {
    _dir: TempDir,
    clock: Arc<ManualClock>,
    store: Arc<LedgerStore>,
    registry: ElectionRegistry,
    voting: VotingEngine,
    tally: TallyEngine,
}

fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let store = Arc::new(
        LedgerStore::open(dir.path().join("ledger.jsonl"), clock.clone()).unwrap(),
    );
    Harness {
        _dir: dir,
        clock: clock.clone(),
        store: store.clone(),
        registry: ElectionRegistry::new(store.clone()),
        voting: VotingEngine::new(store.clone()),
        tally: TallyEngine::new(store),
    }
}

fn board_election(h: &Harness) -> ElectionSpec {
    let now = h.clock.now();
    ElectionSpec::new(
        "Board Election",
        now + Duration::seconds(60),
        now + Duration::seconds(3660),
        vec![
            CandidateSpec::new("Alice Chen", "Unity"),
            CandidateSpec::new("Bob Osei", "Progress"),
        ],
    )
}

#[test]
fn batch_creation_assigns_sequential_ids() {
    let h = harness();
    let report = h
        .registry
        .create_election_with_candidates(board_election(&h))
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(report.election.id, 1);
    assert_eq!(report.candidate_ids, vec![1, 2]);
    assert_eq!(h.store.election_count(), 1);
    assert!(h.registry.is_ready(report.election.id).unwrap());

    let election = h.store.election(1).unwrap();
    assert_eq!(election.name, "Board Election");
    assert_eq!(h.store.candidate_count(1).unwrap(), 2);
}

#[test]
fn slates_smaller_than_two_are_rejected_outright() {
    let h = harness();
    let mut spec = board_election(&h);
    spec.candidates.truncate(1);

    let result = h.registry.create_election_with_candidates(spec);
    assert!(matches!(result, Err(Error::BadRequest(_))));
    // Nothing was created.
    assert_eq!(h.store.election_count(), 0);
}

#[test]
fn failed_candidate_leaves_an_observable_incomplete_election() {
    let h = harness();
    let mut spec = board_election(&h);
    spec.candidates.insert(1, CandidateSpec::new("", "Unity"));

    let report = h.registry.create_election_with_candidates(spec).unwrap();
    assert!(!report.is_complete());
    assert!(matches!(report.error, Some(Error::BadRequest(_))));
    // Committed up to the point of failure; no rollback.
    assert_eq!(report.candidate_ids, vec![1]);
    assert_eq!(h.store.election_count(), 1);
    assert_eq!(h.store.candidate_count(report.election.id).unwrap(), 1);
    assert!(!h.registry.is_ready(report.election.id).unwrap());
}

#[test]
fn votes_before_the_window_are_not_active() {
    let h = harness();
    let report = h
        .registry
        .create_election_with_candidates(board_election(&h))
        .unwrap();

    let result = h.voting.vote(report.election.id, VoterId::new("early-bird"), 1);
    assert!(matches!(
        result,
        Err(Error::NotActive {
            status: ElectionStatus::Upcoming,
            ..
        })
    ));
}

#[test]
fn votes_after_the_window_are_not_active() {
    let h = harness();
    let report = h
        .registry
        .create_election_with_candidates(board_election(&h))
        .unwrap();

    h.clock.set(report.election.end_time);
    let result = h.voting.vote(report.election.id, VoterId::new("straggler"), 1);
    assert!(matches!(
        result,
        Err(Error::NotActive {
            status: ElectionStatus::Ended,
            ..
        })
    ));
}

#[test]
fn one_vote_per_voter_per_election() {
    let h = harness();
    let report = h
        .registry
        .create_election_with_candidates(board_election(&h))
        .unwrap();
    let election_id = report.election.id;
    h.clock.set(report.election.start_time);

    let voter = VoterId::new("voter-1");
    h.voting.vote(election_id, voter.clone(), 1).unwrap();

    // Switching candidates does not grant a second vote.
    let result = h.voting.vote(election_id, voter.clone(), 2);
    assert!(matches!(result, Err(Error::AlreadyVoted(id)) if id == election_id));

    let tally = h.tally.tally(election_id).unwrap();
    assert_eq!(tally.total_votes, 1);
    assert_eq!(tally.candidates[0].id, 1);
    assert_eq!(tally.candidates[0].vote_count, 1);
    assert_eq!(tally.candidates[0].percentage, 100.0);
    assert_eq!(tally.candidates[1].id, 2);
    assert_eq!(tally.candidates[1].vote_count, 0);

    // The voter can read back their own recorded choice.
    let record = h.store.vote(election_id, &voter).unwrap();
    assert_eq!(record.candidate_id, 1);
}

#[test]
fn unknown_candidate_and_unknown_election_are_distinct() {
    let h = harness();
    let report = h
        .registry
        .create_election_with_candidates(board_election(&h))
        .unwrap();
    h.clock.set(report.election.start_time);

    let result = h.voting.vote(report.election.id, VoterId::new("voter-1"), 7);
    assert!(matches!(
        result,
        Err(Error::UnknownCandidate { candidate_id: 7, .. })
    ));

    let result = h.voting.vote(42, VoterId::new("voter-1"), 1);
    assert!(matches!(result, Err(Error::UnknownElection(42))));
}

#[test]
fn zero_vote_tally_is_all_zero_percentages() {
    let h = harness();
    let report = h
        .registry
        .create_election_with_candidates(board_election(&h))
        .unwrap();

    let tally = h.tally.tally(report.election.id).unwrap();
    assert_eq!(tally.total_votes, 0);
    assert_eq!(tally.candidates.len(), 2);
    // Ties rank by ascending candidate ID.
    assert_eq!(tally.candidates[0].id, 1);
    assert_eq!(tally.candidates[1].id, 2);
    for candidate in &tally.candidates {
        assert_eq!(candidate.vote_count, 0);
        assert_eq!(candidate.percentage, 0.0);
    }
    assert!(tally.winners().len() == 2);
}

#[test]
fn tally_is_deterministic_and_consistent() {
    let h = harness();
    let report = h
        .registry
        .create_election_with_candidates(board_election(&h))
        .unwrap();
    let election_id = report.election.id;
    h.clock.set(report.election.start_time);

    for (voter, candidate) in [("v1", 2), ("v2", 2), ("v3", 1)] {
        h.voting.vote(election_id, VoterId::new(voter), candidate).unwrap();
    }

    let first = h.tally.tally(election_id).unwrap();
    let second = h.tally.tally(election_id).unwrap();
    assert_eq!(first, second);

    assert_eq!(first.total_votes, 3);
    let counted: u64 = first.candidates.iter().map(|c| c.vote_count).sum();
    assert_eq!(counted, first.total_votes);

    assert_eq!(first.candidates[0].id, 2);
    assert_eq!(first.candidates[0].vote_count, 2);
    assert!((first.candidates[0].percentage - 200.0 / 3.0).abs() < 1e-9);
    let winners: Vec<u32> = first.winners().iter().map(|c| c.id).collect();
    assert_eq!(winners, vec![2]);
}

#[test]
fn status_follows_the_clock() {
    let h = harness();
    let report = h
        .registry
        .create_election_with_candidates(board_election(&h))
        .unwrap();
    let id = report.election.id;
    let start = report.election.start_time;
    let end = report.election.end_time;

    assert_eq!(
        h.tally.election_status(id, start - Duration::seconds(1)).unwrap(),
        ElectionStatus::Upcoming
    );
    assert_eq!(
        h.tally.election_status(id, start).unwrap(),
        ElectionStatus::Active
    );
    assert_eq!(
        h.tally.election_status(id, end).unwrap(),
        ElectionStatus::Ended
    );

    // A mid-election tally and the final tally run the same code path.
    h.clock.set(start);
    h.voting.vote(id, VoterId::new("v1"), 1).unwrap();
    let live = h.tally.tally(id).unwrap();
    h.clock.set(end + Duration::hours(1));
    let final_tally = h.tally.tally(id).unwrap();
    assert_eq!(live, final_tally);
}
