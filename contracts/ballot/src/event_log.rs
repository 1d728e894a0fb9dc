//! Append-only record of role-defining and vote-casting transitions.
//!
//! The registries only answer point lookups ("is this address a clerk?").
//! Enumerating every clerk or every qualified voter is done by replaying this
//! log. Each record is stored once under its sequence number and indexed by
//! kind, so a query reads only the records of the kind it asks for.
//!
//! Distinct subjects per kind are kept in fixed-size chunks as they first
//! appear, so listing them reads one entry per `SUBJECT_CHUNK` addresses.
//! Every read endpoint built on this module is paged: a single invocation
//! touches a bounded number of ledger entries however long the log grows.

use common::ttl;
use soroban_sdk::{contractevent, contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage keys ──────────────────────────────────────────────
const EVENT_CTR: Symbol = symbol_short!("EVT_CTR");
const EVENT: Symbol = symbol_short!("EVENT");
const KIND_CTR: Symbol = symbol_short!("EVT_KCTR");
const KIND_INDEX: Symbol = symbol_short!("EVT_KIDX");
const SUBJECT_CTR: Symbol = symbol_short!("EVT_SCNT");
const SUBJECTS: Symbol = symbol_short!("EVT_SUBJ");

/// Addresses per stored subject chunk.
pub const SUBJECT_CHUNK: u32 = 64;
/// Most records returned by one page. Each record costs two reads.
pub const MAX_RECORD_PAGE: u32 = 40;
/// Most subjects returned by one page.
pub const MAX_SUBJECT_PAGE: u32 = 256;

// ── Types ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum EventKind {
    ClerkDefined = 1,
    VoterQualified = 2,
    Voted = 3,
}

/// One transition, immutable once appended.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventRecord {
    /// Position in the log. Starts at 1 and strictly increases.
    pub sequence: u64,
    pub kind: EventKind,
    /// The clerk defined, the voter qualified, or the voter who voted.
    pub subject: Address,
    /// Set for `Voted` records only.
    pub candidate_id: Option<u32>,
    pub ledger: u32,
    pub timestamp: u64,
}

// ── Contract events ──────────────────────────────────────────

#[contractevent(topics = ["ballot_init"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BallotInitialized {
    #[topic]
    pub admin: Address,
    pub candidate_count: u32,
    pub timestamp: u64,
}

#[contractevent(topics = ["clerk_defined"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClerkDefinedEvent {
    #[topic]
    pub clerk: Address,
    pub sequence: u64,
}

#[contractevent(topics = ["voter_qualified"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoterQualifiedEvent {
    #[topic]
    pub voter: Address,
    pub sequence: u64,
}

#[contractevent(topics = ["voted"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VotedEvent {
    #[topic]
    pub voter: Address,
    pub candidate_id: u32,
    pub sequence: u64,
}

fn event_key(sequence: u64) -> (Symbol, u64) {
    (EVENT, sequence)
}

fn kind_counter_key(kind: EventKind) -> (Symbol, EventKind) {
    (KIND_CTR, kind)
}

fn kind_index_key(kind: EventKind, position: u64) -> (Symbol, EventKind, u64) {
    (KIND_INDEX, kind, position)
}

fn subject_counter_key(kind: EventKind) -> (Symbol, EventKind) {
    (SUBJECT_CTR, kind)
}

fn subject_chunk_key(kind: EventKind, chunk: u32) -> (Symbol, EventKind, u32) {
    (SUBJECTS, kind, chunk)
}

fn publish_record(env: &Env, record: &EventRecord) {
    let subject = record.subject.clone();
    let sequence = record.sequence;
    match (record.kind, record.candidate_id) {
        (EventKind::ClerkDefined, _) => ClerkDefinedEvent {
            clerk: subject,
            sequence,
        }
        .publish(env),
        (EventKind::VoterQualified, _) => VoterQualifiedEvent {
            voter: subject,
            sequence,
        }
        .publish(env),
        (EventKind::Voted, Some(candidate_id)) => VotedEvent {
            voter: subject,
            candidate_id,
            sequence,
        }
        .publish(env),
        (EventKind::Voted, None) => {}
    }
}

// ── Storage Functions ────────────────────────────────────────

/// Appends a record with the next sequence number and publishes it as a
/// contract event.
#[allow(clippy::arithmetic_side_effects)]
pub fn append(
    env: &Env,
    kind: EventKind,
    subject: Address,
    candidate_id: Option<u32>,
) -> EventRecord {
    let sequence = len(env) + 1;
    env.storage().instance().set(&EVENT_CTR, &sequence);

    let record = EventRecord {
        sequence,
        kind,
        subject,
        candidate_id,
        ledger: env.ledger().sequence(),
        timestamp: env.ledger().timestamp(),
    };

    let key = event_key(sequence);
    env.storage().persistent().set(&key, &record);
    ttl::extend_persistent(env, &key);

    // Index by kind
    let position = kind_len(env, kind);
    let index_key = kind_index_key(kind, position);
    env.storage().persistent().set(&index_key, &sequence);
    ttl::extend_persistent(env, &index_key);
    env.storage()
        .instance()
        .set(&kind_counter_key(kind), &(position + 1));

    publish_record(env, &record);

    record
}

/// Total number of records of every kind.
pub fn len(env: &Env) -> u64 {
    env.storage().instance().get(&EVENT_CTR).unwrap_or(0)
}

/// Number of records of one kind.
pub fn kind_len(env: &Env, kind: EventKind) -> u64 {
    env.storage()
        .instance()
        .get(&kind_counter_key(kind))
        .unwrap_or(0)
}

pub fn get(env: &Env, sequence: u64) -> Option<EventRecord> {
    env.storage().persistent().get(&event_key(sequence))
}

/// Records of `kind` in append order.
pub fn query(env: &Env, kind: EventKind) -> EventIter<'_> {
    query_from(env, kind, 0)
}

/// Records of `kind` in append order, skipping the first `start` of them.
pub fn query_from(env: &Env, kind: EventKind, start: u64) -> EventIter<'_> {
    EventIter {
        env,
        kind,
        position: start,
        end: kind_len(env, kind),
    }
}

/// Up to `limit` records of `kind` starting at position `start` within that
/// kind. `limit` is clamped to `MAX_RECORD_PAGE`.
pub fn page(env: &Env, kind: EventKind, start: u64, limit: u32) -> Vec<EventRecord> {
    let mut records = Vec::new(env);
    let limit = limit.min(MAX_RECORD_PAGE) as usize;
    for record in query_from(env, kind, start).take(limit) {
        records.push_back(record);
    }
    records
}

/// Adds `subject` to the distinct-subject list of `kind`. Callers invoke this
/// only for a subject's first record of that kind.
#[allow(clippy::arithmetic_side_effects)]
pub fn record_distinct(env: &Env, kind: EventKind, subject: &Address) {
    let position = distinct_len(env, kind);
    let key = subject_chunk_key(kind, position / SUBJECT_CHUNK);

    let mut chunk: Vec<Address> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| Vec::new(env));
    chunk.push_back(subject.clone());
    env.storage().persistent().set(&key, &chunk);
    ttl::extend_persistent(env, &key);

    env.storage()
        .instance()
        .set(&subject_counter_key(kind), &(position + 1));
}

/// Number of distinct subjects recorded for `kind`.
pub fn distinct_len(env: &Env, kind: EventKind) -> u32 {
    env.storage()
        .instance()
        .get(&subject_counter_key(kind))
        .unwrap_or(0)
}

/// Distinct subjects of `kind` in order of first appearance, `limit` of
/// them starting at `start`. `limit` is clamped to `MAX_SUBJECT_PAGE`.
#[allow(clippy::arithmetic_side_effects)]
pub fn distinct_subjects(env: &Env, kind: EventKind, start: u32, limit: u32) -> Vec<Address> {
    let mut subjects = Vec::new(env);
    let end = distinct_len(env, kind).min(start.saturating_add(limit.min(MAX_SUBJECT_PAGE)));

    let mut position = start;
    while position < end {
        let chunk_index = position / SUBJECT_CHUNK;
        let Some(chunk) = env
            .storage()
            .persistent()
            .get::<_, Vec<Address>>(&subject_chunk_key(kind, chunk_index))
        else {
            break;
        };

        let chunk_start = chunk_index * SUBJECT_CHUNK;
        let chunk_end = end.min(chunk_start.saturating_add(SUBJECT_CHUNK));
        for offset in (position - chunk_start)..(chunk_end - chunk_start) {
            if let Some(subject) = chunk.get(offset) {
                subjects.push_back(subject);
            }
        }
        position = chunk_end;
    }
    subjects
}

pub fn publish_initialized(env: &Env, admin: Address, candidate_count: u32) {
    BallotInitialized {
        admin,
        candidate_count,
        timestamp: env.ledger().timestamp(),
    }
    .publish(env);
}

// ── Iteration ────────────────────────────────────────────────

/// Lazy cursor over one kind of record. Reads storage one record at a time
/// and stops at the log length observed when the cursor was created.
pub struct EventIter<'a> {
    env: &'a Env,
    kind: EventKind,
    position: u64,
    end: u64,
}

impl Iterator for EventIter<'_> {
    type Item = EventRecord;

    fn next(&mut self) -> Option<EventRecord> {
        while self.position < self.end {
            let index_key = kind_index_key(self.kind, self.position);
            self.position = self.position.saturating_add(1);

            let record = self
                .env
                .storage()
                .persistent()
                .get::<_, u64>(&index_key)
                .and_then(|sequence| get(self.env, sequence));
            if record.is_some() {
                return record;
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.saturating_sub(self.position);
        (0, usize::try_from(remaining).ok())
    }
}
