#![no_std]
mod candidates;
mod errors;
mod event_log;
mod roles;

use common::transition;
use soroban_sdk::{
    contract, contractimpl, contracttype, log, symbol_short, Address, Env, String, Symbol, Vec,
};

/// Storage keys for the contract
const INITIALIZED: Symbol = symbol_short!("INIT");

pub use candidates::{Candidate, MAX_CANDIDATES};
pub use errors::{BallotError, ErrorKind};
pub use event_log::{EventKind, EventRecord, MAX_RECORD_PAGE, MAX_SUBJECT_PAGE};

/// Where an address stands with respect to voting.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VoterStatus {
    NotQualified = 1,
    Eligible = 2,
    AlreadyVoted = 3,
}

#[contract]
pub struct BallotContract;

#[contractimpl]
impl BallotContract {
    /// Initialize the ballot. The initializing address becomes the
    /// administrator for the lifetime of the contract.
    pub fn initialize(
        env: Env,
        admin: Address,
        candidate_names: Vec<String>,
    ) -> Result<(), BallotError> {
        if env.storage().instance().has(&INITIALIZED) {
            log!(&env, "initialize rejected: already initialized");
            return Err(BallotError::AlreadyInitialized);
        }

        admin.require_auth();

        transition(&env, || -> Result<(), BallotError> {
            let candidate_count = candidates::initialize(&env, &candidate_names)?;
            roles::initialize(&env, &admin);
            env.storage().instance().set(&INITIALIZED, &true);

            event_log::publish_initialized(&env, admin.clone(), candidate_count);
            log!(&env, "ballot initialized", admin, candidate_count);
            Ok(())
        })
    }

    /// Get the administrator address
    pub fn administrator(env: Env) -> Result<Address, BallotError> {
        roles::administrator(&env).ok_or(BallotError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn is_administrator(env: Env, who: Address) -> bool {
        roles::is_administrator(&env, &who)
    }

    // ======================== Transitions ========================

    /// Grant clerk authority to `clerk`. Administrator only.
    ///
    /// Defining an existing clerk again leaves the clerk set unchanged but
    /// is still recorded in the event log.
    pub fn define_clerk(env: Env, caller: Address, clerk: Address) -> Result<(), BallotError> {
        caller.require_auth();

        transition(&env, || {
            if !roles::is_administrator(&env, &caller) {
                log!(&env, "define_clerk rejected: not the administrator", caller);
                return Err(BallotError::NotAdministrator);
            }

            let newly_added = roles::add_clerk(&env, &clerk);
            if newly_added {
                event_log::record_distinct(&env, EventKind::ClerkDefined, &clerk);
            }
            let record = event_log::append(&env, EventKind::ClerkDefined, clerk.clone(), None);

            log!(&env, "clerk defined", clerk, newly_added, record.sequence);
            Ok(())
        })
    }

    /// Grant the right to vote to `voter`. Clerks only.
    pub fn qualify_voter(env: Env, caller: Address, voter: Address) -> Result<(), BallotError> {
        caller.require_auth();

        transition(&env, || {
            if !roles::is_clerk(&env, &caller) {
                log!(&env, "qualify_voter rejected: not a clerk", caller);
                return Err(BallotError::NotClerk);
            }

            let newly_added = roles::grant_vote_right(&env, &voter);
            if newly_added {
                event_log::record_distinct(&env, EventKind::VoterQualified, &voter);
            }
            let record = event_log::append(&env, EventKind::VoterQualified, voter.clone(), None);

            log!(&env, "voter qualified", voter, newly_added, record.sequence);
            Ok(())
        })
    }

    /// Cast the caller's single vote for `candidate_id`.
    ///
    /// Checks run in a fixed order and the first failure is reported: vote
    /// right, then not already voted, then candidate range.
    pub fn vote(env: Env, voter: Address, candidate_id: u32) -> Result<(), BallotError> {
        voter.require_auth();

        transition(&env, || {
            if !roles::has_vote_right(&env, &voter) {
                log!(&env, "vote rejected: no right to vote", voter);
                return Err(BallotError::NoVoteRight);
            }
            if roles::has_voted(&env, &voter) {
                log!(&env, "vote rejected: already voted", voter);
                return Err(BallotError::AlreadyVoted);
            }
            if candidate_id >= candidates::count(&env) {
                log!(&env, "vote rejected: invalid candidate", voter, candidate_id);
                return Err(BallotError::InvalidCandidate);
            }

            // No writes before this point.
            roles::mark_voted(&env, &voter)?;
            candidates::increment_vote(&env, candidate_id)?;
            let record =
                event_log::append(&env, EventKind::Voted, voter.clone(), Some(candidate_id));

            log!(&env, "vote recorded", voter, record.sequence);
            Ok(())
        })
    }

    // ======================== Candidates ========================

    pub fn candidate(env: Env, candidate_id: u32) -> Result<Candidate, BallotError> {
        candidates::get(&env, candidate_id)
    }

    /// All candidates in ballot order with their current tallies.
    pub fn candidates(env: Env) -> Vec<Candidate> {
        candidates::list(&env)
    }

    pub fn candidate_count(env: Env) -> u32 {
        candidates::count(&env)
    }

    pub fn total_votes(env: Env) -> u64 {
        candidates::total_votes(&env)
    }

    // ======================== Roles ========================

    pub fn is_clerk(env: Env, who: Address) -> bool {
        roles::is_clerk(&env, &who)
    }

    pub fn has_vote_right(env: Env, who: Address) -> bool {
        roles::has_vote_right(&env, &who)
    }

    pub fn has_voted(env: Env, who: Address) -> bool {
        roles::has_voted(&env, &who)
    }

    pub fn voter_status(env: Env, who: Address) -> VoterStatus {
        if roles::has_voted(&env, &who) {
            VoterStatus::AlreadyVoted
        } else if roles::has_vote_right(&env, &who) {
            VoterStatus::Eligible
        } else {
            VoterStatus::NotQualified
        }
    }

    pub fn clerk_count(env: Env) -> u32 {
        roles::clerk_count(&env)
    }

    pub fn qualified_voter_count(env: Env) -> u32 {
        roles::qualified_voter_count(&env)
    }

    pub fn voted_count(env: Env) -> u32 {
        roles::voted_count(&env)
    }

    /// Addresses ever defined as clerks, in order of first definition.
    /// Returns at most `limit` of them starting at `start`; the total is
    /// `clerk_count()`.
    pub fn clerks_ever_defined(env: Env, start: u32, limit: u32) -> Vec<Address> {
        event_log::distinct_subjects(&env, EventKind::ClerkDefined, start, limit)
    }

    /// Addresses ever qualified to vote, in order of first qualification.
    /// Paged like `clerks_ever_defined`; the total is `qualified_voter_count()`.
    pub fn voters_ever_qualified(env: Env, start: u32, limit: u32) -> Vec<Address> {
        event_log::distinct_subjects(&env, EventKind::VoterQualified, start, limit)
    }

    // ======================== Event Log ========================

    /// At most `limit` records of `kind`, skipping the first `start` of them.
    /// The total is `event_count_of(kind)`.
    pub fn events_page(env: Env, kind: EventKind, start: u64, limit: u32) -> Vec<EventRecord> {
        event_log::page(&env, kind, start, limit)
    }

    pub fn event_count_of(env: Env, kind: EventKind) -> u64 {
        event_log::kind_len(&env, kind)
    }

    pub fn event(env: Env, sequence: u64) -> Result<EventRecord, BallotError> {
        event_log::get(&env, sequence).ok_or(BallotError::EventNotFound)
    }

    pub fn event_count(env: Env) -> u64 {
        event_log::len(&env)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }
}


#[cfg(test)]
mod test_registries;
