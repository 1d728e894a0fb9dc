use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Env, String, Symbol, Vec};

use crate::BallotError;

// ── Storage keys ──────────────────────────────────────────────
const CAND_COUNT: Symbol = symbol_short!("CAND_CNT");
const CANDIDATES: Symbol = symbol_short!("CANDS");
const TOTAL_VOTES: Symbol = symbol_short!("TOT_VOTES");

/// Largest ballot accepted by `initialize`. All candidates share one
/// persistent entry, which this keeps well under the entry size limit.
pub const MAX_CANDIDATES: u32 = 100;

// ── Types ─────────────────────────────────────────────────────

/// A candidate on the ballot. `vote_count` is the only field that ever changes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    pub id: u32,
    pub name: String,
    pub vote_count: u64,
}

fn save(env: &Env, candidates: &Vec<Candidate>) {
    env.storage().persistent().set(&CANDIDATES, candidates);
    ttl::extend_persistent(env, &CANDIDATES);
}

// ── Storage Functions ────────────────────────────────────────

/// Stores one candidate per name, in input order, with zero votes.
/// Returns the number of candidates.
pub fn initialize(env: &Env, names: &Vec<String>) -> Result<u32, BallotError> {
    if names.is_empty() {
        return Err(BallotError::EmptyCandidateList);
    }
    if names.len() > MAX_CANDIDATES {
        return Err(BallotError::TooManyCandidates);
    }

    let mut candidates = Vec::new(env);
    for (id, name) in (0u32..).zip(names.iter()) {
        candidates.push_back(Candidate {
            id,
            name,
            vote_count: 0,
        });
    }
    save(env, &candidates);

    let count = names.len();
    env.storage().instance().set(&CAND_COUNT, &count);
    env.storage().instance().set(&TOTAL_VOTES, &0u64);

    Ok(count)
}

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&CAND_COUNT).unwrap_or(0)
}

pub fn get(env: &Env, id: u32) -> Result<Candidate, BallotError> {
    list(env).get(id).ok_or(BallotError::CandidateNotFound)
}

/// Ordered snapshot of every candidate with its current tally.
pub fn list(env: &Env) -> Vec<Candidate> {
    env.storage()
        .persistent()
        .get(&CANDIDATES)
        .unwrap_or_else(|| Vec::new(env))
}

/// Adds exactly one vote to a candidate and returns its new tally.
pub fn increment_vote(env: &Env, id: u32) -> Result<u64, BallotError> {
    let mut candidates = list(env);
    let mut candidate = candidates.get(id).ok_or(BallotError::CandidateNotFound)?;
    candidate.vote_count = candidate
        .vote_count
        .checked_add(1)
        .ok_or(BallotError::InvariantViolation)?;
    let vote_count = candidate.vote_count;
    candidates.set(id, candidate);
    save(env, &candidates);

    let total = total_votes(env)
        .checked_add(1)
        .ok_or(BallotError::InvariantViolation)?;
    env.storage().instance().set(&TOTAL_VOTES, &total);

    Ok(vote_count)
}

/// Sum of all tallies.
pub fn total_votes(env: &Env) -> u64 {
    env.storage().instance().get(&TOTAL_VOTES).unwrap_or(0)
}
