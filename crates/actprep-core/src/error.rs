//! Session error types.
//!
//! All of these are local, synchronous, recoverable failures returned to
//! the immediate caller; none should ever crash the process.

use thiserror::Error;

/// Errors signaled by the session state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A session was started without a signed-in user.
    #[error("no signed-in user")]
    NoUser,

    /// A session was started with an empty passage set.
    #[error("passage set is empty")]
    EmptyPassageSet,

    /// An operation required an active session and none exists.
    #[error("no active session")]
    NoActiveSession,

    /// A submission referenced a passage id absent from the active set.
    #[error("passage not found: {0}")]
    PassageNotFound(String),
}
