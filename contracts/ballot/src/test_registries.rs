#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

extern crate std;

use super::*;
use soroban_sdk::testutils::Address as _;

fn registered() -> (Env, Address) {
    let env = Env::default();
    let contract_id = env.register(BallotContract, ());
    (env, contract_id)
}

fn names(env: &Env, list: &[&str]) -> Vec<String> {
    let mut out = Vec::new(env);
    for name in list {
        out.push_back(String::from_str(env, name));
    }
    out
}

// ======================== CandidateRegistry ========================

#[test]
fn test_candidates_keep_input_order() {
    let (env, contract_id) = registered();

    env.as_contract(&contract_id, || {
        let list = names(&env, &["Ada", "Grace", "Edsger"]);
        let count = candidates::initialize(&env, &list).unwrap();
        assert_eq!(count, 3);

        let list = candidates::list(&env);
        assert_eq!(list.len(), 3);
        for (expected_id, candidate) in (0u32..).zip(list.iter()) {
            assert_eq!(candidate.id, expected_id);
            assert_eq!(candidate.vote_count, 0);
        }
        assert_eq!(list.get(2).unwrap().name, String::from_str(&env, "Edsger"));
    });
}

#[test]
fn test_candidate_lookup_out_of_range() {
    let (env, contract_id) = registered();

    env.as_contract(&contract_id, || {
        candidates::initialize(&env, &names(&env, &["Ada"])).unwrap();

        assert!(candidates::get(&env, 0).is_ok());
        assert_eq!(candidates::get(&env, 1), Err(BallotError::CandidateNotFound));
        assert_eq!(
            candidates::increment_vote(&env, 1),
            Err(BallotError::CandidateNotFound)
        );
        assert_eq!(candidates::total_votes(&env), 0);
    });
}

#[test]
fn test_increment_vote_adds_exactly_one() {
    let (env, contract_id) = registered();

    env.as_contract(&contract_id, || {
        candidates::initialize(&env, &names(&env, &["Ada", "Grace"])).unwrap();

        assert_eq!(candidates::increment_vote(&env, 1), Ok(1));
        assert_eq!(candidates::increment_vote(&env, 1), Ok(2));
        assert_eq!(candidates::increment_vote(&env, 0), Ok(1));

        assert_eq!(candidates::get(&env, 0).unwrap().vote_count, 1);
        assert_eq!(candidates::get(&env, 1).unwrap().vote_count, 2);
        assert_eq!(candidates::total_votes(&env), 3);
    });
}

#[test]
fn test_candidate_list_size_is_capped() {
    let (env, contract_id) = registered();

    env.as_contract(&contract_id, || {
        let mut list = Vec::new(&env);
        for _ in 0..=candidates::MAX_CANDIDATES {
            list.push_back(String::from_str(&env, "Candidate"));
        }
        assert_eq!(
            candidates::initialize(&env, &list),
            Err(BallotError::TooManyCandidates)
        );
        assert_eq!(candidates::count(&env), 0);

        list.pop_back();
        assert_eq!(
            candidates::initialize(&env, &list),
            Ok(candidates::MAX_CANDIDATES)
        );
        assert_eq!(candidates::list(&env).len(), candidates::MAX_CANDIDATES);
    });
}

#[test]
fn test_empty_candidate_list() {
    let (env, contract_id) = registered();

    env.as_contract(&contract_id, || {
        assert_eq!(
            candidates::initialize(&env, &Vec::new(&env)),
            Err(BallotError::EmptyCandidateList)
        );
        assert_eq!(candidates::count(&env), 0);
    });
}

// ======================== RoleRegistry ========================

#[test]
fn test_role_sets_start_empty() {
    let (env, contract_id) = registered();
    let admin = Address::generate(&env);
    let someone = Address::generate(&env);

    env.as_contract(&contract_id, || {
        assert_eq!(roles::administrator(&env), None);
        assert!(!roles::is_administrator(&env, &admin));

        roles::initialize(&env, &admin);
        assert!(roles::is_administrator(&env, &admin));
        assert!(!roles::is_administrator(&env, &someone));

        assert!(!roles::is_clerk(&env, &admin));
        assert!(!roles::has_vote_right(&env, &someone));
        assert!(!roles::has_voted(&env, &someone));
        assert_eq!(roles::clerk_count(&env), 0);
        assert_eq!(roles::qualified_voter_count(&env), 0);
        assert_eq!(roles::voted_count(&env), 0);
    });
}

#[test]
fn test_add_clerk_is_idempotent() {
    let (env, contract_id) = registered();
    let clerk = Address::generate(&env);

    env.as_contract(&contract_id, || {
        assert!(roles::add_clerk(&env, &clerk));
        assert!(!roles::add_clerk(&env, &clerk));
        assert!(roles::is_clerk(&env, &clerk));
        assert_eq!(roles::clerk_count(&env), 1);
    });
}

#[test]
fn test_grant_vote_right_is_idempotent() {
    let (env, contract_id) = registered();
    let voter = Address::generate(&env);

    env.as_contract(&contract_id, || {
        assert!(roles::grant_vote_right(&env, &voter));
        assert!(!roles::grant_vote_right(&env, &voter));
        assert!(roles::has_vote_right(&env, &voter));
        assert_eq!(roles::qualified_voter_count(&env), 1);

        // A vote right does not make anyone a clerk.
        assert!(!roles::is_clerk(&env, &voter));
    });
}

#[test]
fn test_mark_voted_twice_is_invariant_violation() {
    let (env, contract_id) = registered();
    let voter = Address::generate(&env);

    env.as_contract(&contract_id, || {
        assert_eq!(roles::mark_voted(&env, &voter), Ok(()));
        assert!(roles::has_voted(&env, &voter));

        assert_eq!(
            roles::mark_voted(&env, &voter),
            Err(BallotError::InvariantViolation)
        );
        assert_eq!(roles::voted_count(&env), 1);
    });
}

// ======================== EventLog ========================

#[test]
fn test_append_assigns_increasing_sequence() {
    let (env, contract_id) = registered();
    let a = Address::generate(&env);
    let b = Address::generate(&env);

    env.as_contract(&contract_id, || {
        let first = event_log::append(&env, EventKind::ClerkDefined, a.clone(), None);
        let second = event_log::append(&env, EventKind::VoterQualified, b.clone(), None);
        let third = event_log::append(&env, EventKind::Voted, b.clone(), Some(0));

        assert_eq!(first.sequence, 1);
        assert_eq!(second.sequence, 2);
        assert_eq!(third.sequence, 3);
        assert_eq!(event_log::len(&env), 3);

        assert_eq!(event_log::get(&env, 2), Some(second));
        assert_eq!(event_log::get(&env, 9), None);
    });
}

#[test]
fn test_query_filters_by_kind_in_append_order() {
    let (env, contract_id) = registered();
    let c1 = Address::generate(&env);
    let c2 = Address::generate(&env);
    let v1 = Address::generate(&env);

    env.as_contract(&contract_id, || {
        event_log::append(&env, EventKind::ClerkDefined, c1.clone(), None);
        event_log::append(&env, EventKind::VoterQualified, v1.clone(), None);
        event_log::append(&env, EventKind::ClerkDefined, c2.clone(), None);
        event_log::append(&env, EventKind::ClerkDefined, c1.clone(), None);

        let clerks: std::vec::Vec<EventRecord> =
            event_log::query(&env, EventKind::ClerkDefined).collect();
        assert_eq!(clerks.len(), 3);
        assert_eq!(clerks[0].subject, c1);
        assert_eq!(clerks[1].subject, c2);
        assert_eq!(clerks[2].subject, c1);
        assert!(clerks.windows(2).all(|w| w[0].sequence < w[1].sequence));

        assert_eq!(event_log::query(&env, EventKind::Voted).count(), 0);
        assert_eq!(event_log::kind_len(&env, EventKind::VoterQualified), 1);
    });
}

#[test]
fn test_query_is_restartable_and_bounded() {
    let (env, contract_id) = registered();
    let voter = Address::generate(&env);

    env.as_contract(&contract_id, || {
        event_log::append(&env, EventKind::VoterQualified, voter.clone(), None);

        let cursor = event_log::query(&env, EventKind::VoterQualified);

        // Appends after the cursor was created are not visited by it.
        event_log::append(&env, EventKind::VoterQualified, voter.clone(), None);
        assert_eq!(cursor.count(), 1);

        // A fresh query sees both.
        assert_eq!(event_log::query(&env, EventKind::VoterQualified).count(), 2);
        assert_eq!(event_log::query(&env, EventKind::VoterQualified).count(), 2);
    });
}

#[test]
fn test_query_from_skips_leading_records() {
    let (env, contract_id) = registered();

    env.as_contract(&contract_id, || {
        let mut subjects = std::vec::Vec::new();
        for _ in 0..5 {
            let who = Address::generate(&env);
            event_log::append(&env, EventKind::ClerkDefined, who.clone(), None);
            subjects.push(who);
        }

        let tail: std::vec::Vec<Address> =
            event_log::query_from(&env, EventKind::ClerkDefined, 3)
                .map(|r| r.subject)
                .collect();
        assert_eq!(tail, subjects[3..].to_vec());

        assert_eq!(
            event_log::query_from(&env, EventKind::ClerkDefined, 5).count(),
            0
        );
        assert_eq!(
            event_log::query_from(&env, EventKind::ClerkDefined, 50).count(),
            0
        );
    });
}

#[test]
fn test_distinct_subjects_keep_first_seen_order() {
    let (env, contract_id) = registered();
    let a = Address::generate(&env);
    let b = Address::generate(&env);

    env.as_contract(&contract_id, || {
        event_log::record_distinct(&env, EventKind::VoterQualified, &b);
        event_log::record_distinct(&env, EventKind::VoterQualified, &a);

        let subjects = event_log::distinct_subjects(&env, EventKind::VoterQualified, 0, 10);
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects.get(0).unwrap(), b);
        assert_eq!(subjects.get(1).unwrap(), a);

        assert_eq!(event_log::distinct_len(&env, EventKind::ClerkDefined), 0);
        assert_eq!(
            event_log::distinct_subjects(&env, EventKind::ClerkDefined, 0, 10).len(),
            0
        );
    });
}
