//! Payload decoding errors.

use thiserror::Error;

/// Errors raised while decoding a health plan form data payload.
///
/// Migration itself has no error type; once a payload decodes it can
/// always be upgraded.
#[derive(Error, Debug)]
pub enum ProtoError {
    /// The bytes were not JSON, or did not match the payload shape.
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The top-level JSON value was not an object.
    #[error("payload must be a JSON object, got {found}")]
    NotAnObject {
        /// JSON type name of what was found.
        found: &'static str,
    },

    /// `protoVersion` was absent.
    #[error("payload has no protoVersion")]
    MissingVersion,

    /// `protoVersion` was not a non-negative integer.
    #[error("protoVersion must be a non-negative integer, got {value}")]
    InvalidVersion {
        /// The offending value, as JSON.
        value: String,
    },

    /// `protoVersion` is newer than this build understands.
    #[error("protoVersion {found} is newer than the supported version {current}")]
    UnsupportedVersion {
        /// Version found in the payload.
        found: u64,
        /// Highest version this build supports.
        current: u32,
    },
}
