//! # Error Types
//!
//! Shared error hierarchy. All errors use `thiserror` for derive-based
//! `Display` and `Error` implementations.
//!
//! Parse errors carry the offending input so the caller can surface it
//! verbatim; they are raised for malformed route/CLI arguments and are meant
//! to propagate to the top level rather than be swallowed.

use thiserror::Error;

/// Top-level error type for MC-Review core primitives.
#[derive(Error, Debug)]
pub enum McrError {
    /// An identifier did not parse.
    #[error("invalid {kind} identifier {value:?}: {reason}")]
    InvalidIdentifier {
        /// Identifier namespace (`contract`, `rate`, `revision`).
        kind: &'static str,
        /// The rejected input.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// A timestamp or calendar date did not parse.
    #[error("invalid date/time {value:?}: {reason}")]
    InvalidDateTime {
        /// The rejected input.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// A user role string is not one the review service issues.
    #[error("unknown user role: {0:?}")]
    UnknownRole(String),

    /// A status string is not a known lifecycle status.
    #[error("unknown status: {0:?}")]
    UnknownStatus(String),

    /// An action name is not a known lifecycle action.
    #[error("unknown action: {0:?}")]
    UnknownAction(String),
}
