//! Error types for the latch CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for latch operations.
///
/// Every variant is fatal to the invoking command. A compare-and-swap
/// that merely reports `swapped == false` is not an error; only the
/// operations whose protocol requires the swap to succeed (`release`,
/// `done`) turn that into [`LatchError::State`].
#[derive(Error, Debug)]
pub enum LatchError {
    /// The leader socket is missing, the wrong file type, or unreachable.
    #[error("could not connect to leader API at '{}': {}", .path.display(), .reason)]
    Connection {
        /// Socket path the connection was attempted on.
        path: PathBuf,
        /// What went wrong, plus any recovery hint.
        reason: String,
    },

    /// The leader answered with a non-200 status; carries its error
    /// message verbatim.
    #[error("error from leader API: {0}")]
    Api(String),

    /// The request never produced a leader response (serialization,
    /// dialing, or body IO failed mid-call).
    #[error("leader API transport failed: {0}")]
    Transport(String),

    /// A compare-and-swap was refused where the caller's protocol
    /// requires success. Carries the value actually observed.
    #[error("lock in invalid state {value:?} to {action} - investigate with 'latch get'")]
    State {
        /// The operation that required the swap ("release", "mark complete").
        action: &'static str,
        /// The value the store held after the refused attempt.
        value: String,
    },

    /// The user interrupted a wait (Ctrl-C during acquire/do polling).
    #[error("cancelled while waiting for lock")]
    Cancelled,
}

impl LatchError {
    /// Returns the process exit code for this error.
    ///
    /// The lock commands expose a two-code surface: callers distinguish
    /// outcomes by message, not code.
    pub fn exit_code(&self) -> i32 {
        exit_codes::FAILURE
    }
}

/// Result type alias for latch operations.
pub type Result<T> = std::result::Result<T, LatchError>;
