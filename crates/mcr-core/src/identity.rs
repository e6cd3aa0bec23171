//! # Identifier Newtypes
//!
//! Contracts and their revisions are both keyed by UUIDs issued by the
//! review service. Wrapping each in its own type keeps them from being mixed
//! up at call sites that take several ids.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::McrError;

/// Unique identifier for a contract submission package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(pub Uuid);

/// Unique identifier for one revision of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(pub Uuid);

macro_rules! uuid_newtype {
    ($name:ident, $kind:literal) => {
        impl $name {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse from the hyphenated UUID form used in routes and CLI
            /// arguments.
            pub fn parse(s: &str) -> Result<Self, McrError> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|e| McrError::InvalidIdentifier {
                        kind: $kind,
                        value: s.to_string(),
                        reason: e.to_string(),
                    })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl FromStr for $name {
            type Err = McrError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_newtype!(ContractId, "contract");
uuid_newtype!(RevisionId, "revision");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_hyphenated_uuid() {
        let id = ContractId::parse("0b5c8d0e-1f1a-4e38-9d2b-6b7c2a9c1f00").unwrap();
        assert_eq!(id.to_string(), "0b5c8d0e-1f1a-4e38-9d2b-6b7c2a9c1f00");
    }

    #[test]
    fn parse_trims_whitespace() {
        let id: RevisionId = " 0b5c8d0e-1f1a-4e38-9d2b-6b7c2a9c1f00\n".parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), "0b5c8d0e-1f1a-4e38-9d2b-6b7c2a9c1f00");
    }

    #[test]
    fn parse_rejects_garbage_with_kind() {
        let err = ContractId::parse("not-a-contract").unwrap_err();
        match err {
            McrError::InvalidIdentifier { kind, value, .. } => {
                assert_eq!(kind, "contract");
                assert_eq!(value, "not-a-contract");
            }
            other => panic!("expected InvalidIdentifier, got {other:?}"),
        }
    }

    #[test]
    fn serializes_as_bare_uuid_string() {
        let id = ContractId::parse("0b5c8d0e-1f1a-4e38-9d2b-6b7c2a9c1f00").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0b5c8d0e-1f1a-4e38-9d2b-6b7c2a9c1f00\"");
        let back: ContractId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn new_ids_are_distinct() {
        assert_ne!(RevisionId::new(), RevisionId::new());
    }
}
