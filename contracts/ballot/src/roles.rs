use common::ttl;
use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::BallotError;

// ── Storage keys ──────────────────────────────────────────────
const ADMIN: Symbol = symbol_short!("ADMIN");
const CLERK: Symbol = symbol_short!("CLERK");
const VOTE_RIGHT: Symbol = symbol_short!("VOTE_RT");
const VOTED: Symbol = symbol_short!("VOTED");

const CLERK_COUNT: Symbol = symbol_short!("CLERK_CNT");
const VOTER_COUNT: Symbol = symbol_short!("VOTER_CNT");
const VOTED_COUNT: Symbol = symbol_short!("VOTED_CNT");

fn member_key(set: Symbol, who: &Address) -> (Symbol, Address) {
    (set, who.clone())
}

fn is_member(env: &Env, set: Symbol, who: &Address) -> bool {
    env.storage()
        .persistent()
        .get::<_, bool>(&member_key(set, who))
        .unwrap_or(false)
}

/// Inserts `who` into a grow-only set. Returns false when it was already a
/// member, in which case nothing is written.
fn insert_member(env: &Env, set: Symbol, counter: Symbol, who: &Address) -> bool {
    if is_member(env, set.clone(), who) {
        return false;
    }

    let key = member_key(set, who);
    env.storage().persistent().set(&key, &true);
    ttl::extend_persistent(env, &key);

    let members = member_count(env, counter.clone()).saturating_add(1);
    env.storage().instance().set(&counter, &members);

    true
}

fn member_count(env: &Env, counter: Symbol) -> u32 {
    env.storage().instance().get(&counter).unwrap_or(0)
}

// ======================== Administrator ========================

pub fn initialize(env: &Env, admin: &Address) {
    env.storage().instance().set(&ADMIN, admin);
}

pub fn administrator(env: &Env) -> Option<Address> {
    env.storage().instance().get(&ADMIN)
}

pub fn is_administrator(env: &Env, who: &Address) -> bool {
    administrator(env).is_some_and(|admin| admin == *who)
}

// ======================== Clerks ========================

/// Idempotent. Authorization is the caller's responsibility.
pub fn add_clerk(env: &Env, who: &Address) -> bool {
    insert_member(env, CLERK, CLERK_COUNT, who)
}

pub fn is_clerk(env: &Env, who: &Address) -> bool {
    is_member(env, CLERK, who)
}

pub fn clerk_count(env: &Env) -> u32 {
    member_count(env, CLERK_COUNT)
}

// ======================== Voters ========================

/// Idempotent. Authorization is the caller's responsibility.
pub fn grant_vote_right(env: &Env, who: &Address) -> bool {
    insert_member(env, VOTE_RIGHT, VOTER_COUNT, who)
}

pub fn has_vote_right(env: &Env, who: &Address) -> bool {
    is_member(env, VOTE_RIGHT, who)
}

pub fn qualified_voter_count(env: &Env) -> u32 {
    member_count(env, VOTER_COUNT)
}

pub fn has_voted(env: &Env, who: &Address) -> bool {
    is_member(env, VOTED, who)
}

/// Records that `who` has cast their vote. A second call for the same
/// address means the state machine let a double vote through.
pub fn mark_voted(env: &Env, who: &Address) -> Result<(), BallotError> {
    if insert_member(env, VOTED, VOTED_COUNT, who) {
        Ok(())
    } else {
        Err(BallotError::InvariantViolation)
    }
}

pub fn voted_count(env: &Env) -> u32 {
    member_count(env, VOTED_COUNT)
}
