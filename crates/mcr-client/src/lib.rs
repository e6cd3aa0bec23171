//! # mcr-client — Review Lifecycle API Client
//!
//! Typed access to the review service's GraphQL API for the contract
//! lifecycle: fetch a contract, then submit, unlock, approve, withdraw or
//! undo a withdrawal.
//!
//! - [`ReviewClient`] is the raw transport: one method per operation, each
//!   returning the contract as the service sees it afterwards.
//! - [`LifecycleActions`] is what callers normally use. It checks the
//!   request against the gating table first, allows one outstanding
//!   mutation per contract, and maps failures to [`UserFacingError`].
//!
//! Read queries are retried on transport errors. Mutations are not.

pub mod client;
pub mod config;
pub mod error;
pub mod graphql;
pub mod guard;
pub mod lifecycle;
pub mod messages;
pub(crate) mod retry;

pub use client::ReviewClient;
pub use config::{ClientConfig, ConfigError, DEFAULT_ENDPOINT, MAX_QUERY_RETRIES};
pub use error::ClientError;
pub use graphql::ApiErrorCode;
pub use guard::{InFlight, InFlightGuard};
pub use lifecycle::{ActionError, LifecycleActions};
pub use messages::UserFacingError;
