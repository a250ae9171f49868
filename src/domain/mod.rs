//! Core booking and loan engines
//!
//! Everything in this module is a pure function over the facts passed in
//! (resource + existing bookings, loan + today). Durable state lives in the
//! repository layer; the engines never perform I/O and never read the clock
//! themselves, which keeps them safe to call concurrently and testable with
//! a fixed "today".

pub mod availability;
pub mod civil;
pub mod lifecycle;
pub mod membership;

use thiserror::Error;

/// Expected business outcomes, rendered to the user rather than logged as
/// failures. "No slot" and "limit reached" are normal control flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("extension limit reached")]
    ExtensionLimitReached,

    #[error("must pay outstanding fine before extending")]
    OutstandingFine,

    #[error("loan already returned")]
    AlreadyReturned,

    #[error("no fine owed on this loan")]
    NoFineOwed,

    #[error("invalid membership transition from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },
}

/// Invariant violations: programmer/data errors, or a race caught by the
/// optimistic-concurrency guard. These fail loudly; the caller should retry
/// the whole read-modify-write cycle, not paper over them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainViolation {
    #[error("party size must be at least 1, got {0}")]
    InvalidPartySize(i64),

    #[error("extend count {0} outside valid range")]
    ExtendCountOutOfRange(i16),

    #[error("stale extension commit for loan {loan_id}: loan changed since proposal")]
    StaleCommit { loan_id: i32 },
}
