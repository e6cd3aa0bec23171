//! # Payload Decoding
//!
//! Turns stored JSON bytes into a [`ProtoPayload`], checking the version
//! range before any field-level parsing so that a payload from a newer
//! build, or a corrupt one, is rejected with a precise error instead of a
//! generic shape mismatch.

use serde_json::Value;

use crate::error::ProtoError;
use crate::migrate::{migrate, MigrationReport, CURRENT_PROTO_VERSION};
use crate::payload::ProtoPayload;

/// Decode a payload without upgrading it.
///
/// # Errors
///
/// - [`ProtoError::Malformed`] for invalid JSON or a field of the wrong shape.
/// - [`ProtoError::NotAnObject`] if the top level is not an object.
/// - [`ProtoError::MissingVersion`] / [`ProtoError::InvalidVersion`] if
///   `protoVersion` is absent or not a non-negative integer.
/// - [`ProtoError::UnsupportedVersion`] if it exceeds
///   [`CURRENT_PROTO_VERSION`].
pub fn decode(bytes: &[u8]) -> Result<ProtoPayload, ProtoError> {
    let value: Value = serde_json::from_slice(bytes)?;
    check_version(&value)?;
    Ok(serde_json::from_value(value)?)
}

/// Decode a payload and upgrade it to the current version.
pub fn decode_to_latest(bytes: &[u8]) -> Result<MigrationReport, ProtoError> {
    decode(bytes).map(migrate)
}

/// Render a payload as pretty-printed JSON.
pub fn encode(payload: &ProtoPayload) -> Result<Vec<u8>, ProtoError> {
    Ok(serde_json::to_vec_pretty(payload)?)
}

fn check_version(value: &Value) -> Result<u32, ProtoError> {
    let object = value.as_object().ok_or(ProtoError::NotAnObject {
        found: json_type_name(value),
    })?;
    let raw = object.get("protoVersion").ok_or(ProtoError::MissingVersion)?;
    let version = raw.as_u64().ok_or_else(|| ProtoError::InvalidVersion {
        value: raw.to_string(),
    })?;
    if version > u64::from(CURRENT_PROTO_VERSION) {
        return Err(ProtoError::UnsupportedVersion {
            found: version,
            current: CURRENT_PROTO_VERSION,
        });
    }
    // Bounded by CURRENT_PROTO_VERSION above.
    Ok(version as u32)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
