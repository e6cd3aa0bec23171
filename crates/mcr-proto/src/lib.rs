//! # mcr-proto — Health Plan Form Data Payloads
//!
//! Historical submissions store their form data as a `STATE_SUBMISSION`
//! payload tagged with the `protoVersion` it was encoded with. Before any
//! other code looks at such a payload it is brought up to
//! [`CURRENT_PROTO_VERSION`].
//!
//! ## Modules
//!
//! - [`payload`] — the typed payload shape. Fields this crate does not know
//!   about are carried through untouched.
//! - [`decode`] — JSON decoding with the version range check the migrator
//!   relies on, and re-encoding.
//! - [`migrate`] — the upgrade chain: an ordered table of pure upgrade
//!   steps folded over the payload.
//!
//! ## Failure Model
//!
//! Decoding is where bad input is rejected. Migration never fails: a payload
//! with an unexpected `protoName` is logged and upgraded anyway.

pub mod decode;
pub mod error;
pub mod migrate;
pub mod payload;

pub use decode::{decode, decode_to_latest, encode};
pub use error::ProtoError;
pub use migrate::{
    migrate, to_latest_version, MigrationReport, UpgradeStep, CURRENT_PROTO_VERSION, UPGRADE_STEPS,
};
pub use payload::{
    ActuarialFirm, ActuaryCommunicationPreference, ActuaryContact, ProtoPayload, RateInfo,
    STATE_SUBMISSION_PROTO_NAME,
};
