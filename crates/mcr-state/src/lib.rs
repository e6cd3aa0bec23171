//! # mcr-state — Submission Lifecycle
//!
//! One explicit state machine for contract packages, replacing status
//! comparisons scattered across UI components.
//!
//! ## Modules
//!
//! - **status** (`status.rs`): `SubmissionStatus`, `ReviewStatus`, and the
//!   `ConsolidatedStatus` folded from them.
//! - **action** (`action.rs`): `allowed_actions(status, role, flags)`, the
//!   single gating query.
//! - **flags** (`flags.rs`): feature flags passed into that query.
//! - **contract** (`contract.rs`): the contract aggregate, its revision
//!   history, and validated transitions.
//! - **banner** (`banner.rs`): which banners a summary page renders.
//!
//! ## Design
//!
//! Statuses arrive from the review service at runtime, so the machine is an
//! enum with a transition table rather than a typestate. Invalid requests
//! come back as `LifecycleError` with the status, action and role involved.

pub mod action;
pub mod banner;
pub mod contract;
pub mod flags;
pub mod status;

pub use action::{allowed_actions, Action, ActionSet};
pub use banner::{banners, Banner};
pub use contract::{
    next_status, Contract, LifecycleError, ReviewActionType, ReviewStatusAction, Revision,
    TransitionEvidence, TransitionRecord, UpdateInfo,
};
pub use flags::FeatureFlags;
pub use status::{ConsolidatedStatus, ReviewStatus, SubmissionStatus};
