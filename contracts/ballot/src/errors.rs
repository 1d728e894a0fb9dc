use core::fmt;

use soroban_sdk::contracterror;

/// Contract errors
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum BallotError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    EmptyCandidateList = 3,
    NotAdministrator = 4,
    NotClerk = 5,
    NoVoteRight = 6,
    AlreadyVoted = 7,
    InvalidCandidate = 8,
    CandidateNotFound = 9,
    EventNotFound = 10,
    InvariantViolation = 11,
    TooManyCandidates = 12,
}

/// Failure classes callers branch on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Malformed or out-of-range arguments.
    InvalidInput,
    /// The caller lacks the role the transition requires.
    Unauthorized,
    /// The transition would break a single-use rule.
    Conflict,
    /// A lookup addressed something that does not exist.
    NotFound,
    /// An internal consistency check failed. Indicates a bug, not user error.
    InvariantViolation,
}

impl BallotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BallotError::EmptyCandidateList
            | BallotError::TooManyCandidates
            | BallotError::InvalidCandidate => ErrorKind::InvalidInput,
            BallotError::NotAdministrator | BallotError::NotClerk | BallotError::NoVoteRight => {
                ErrorKind::Unauthorized
            }
            BallotError::AlreadyInitialized | BallotError::AlreadyVoted => ErrorKind::Conflict,
            BallotError::NotInitialized
            | BallotError::CandidateNotFound
            | BallotError::EventNotFound => ErrorKind::NotFound,
            BallotError::InvariantViolation => ErrorKind::InvariantViolation,
        }
    }

    /// Stable, human-readable message. Clients match on these strings, so
    /// they must not change.
    pub fn message(&self) -> &'static str {
        match self {
            BallotError::NotInitialized => "Ballot has not been initialized.",
            BallotError::AlreadyInitialized => "Ballot has already been initialized.",
            BallotError::EmptyCandidateList => "At least one candidate is required.",
            BallotError::NotAdministrator => "Only the administrator can perform this action.",
            BallotError::NotClerk => "Only a clerk can perform this action.",
            BallotError::NoVoteRight => "Voter does not have the right to vote.",
            BallotError::AlreadyVoted => "Voter has already cast their vote.",
            BallotError::InvalidCandidate => "Invalid candidate ID.",
            BallotError::CandidateNotFound => "Candidate not found.",
            BallotError::EventNotFound => "Event not found.",
            BallotError::InvariantViolation => "Internal invariant violated.",
            BallotError::TooManyCandidates => "Too many candidates.",
        }
    }
}

impl fmt::Display for BallotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
