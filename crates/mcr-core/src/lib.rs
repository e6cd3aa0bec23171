//! # mcr-core — Foundational Types for MC-Review
//!
//! Shared primitives used by every other crate in the workspace. It depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `ContractId` and `RevisionId` are
//!    distinct types over `Uuid`; a revision id cannot be passed where a
//!    contract id is expected.
//!
//! 2. **UTC-only timestamps.** `Timestamp` is UTC with seconds precision.
//!    `CalendarDate` covers date-only fields such as the date an approval was
//!    released to the state.
//!
//! 3. **One role enum.** `UserRole` mirrors the roles the review service
//!    issues, and `ActorKind` folds them into the three groups the lifecycle
//!    gating cares about.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mcr-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod role;
pub mod temporal;

pub use error::McrError;
pub use identity::{ContractId, RevisionId};
pub use role::{ActorKind, UserRole};
pub use temporal::{CalendarDate, Timestamp};
