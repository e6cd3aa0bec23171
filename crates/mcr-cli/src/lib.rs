//! # mcr-cli — MC-Review Core Command-Line Interface
//!
//! ## Subcommands
//!
//! - `migrate` — Upgrade a stored form payload to the current proto version
//! - `actions` — Query the gating table for a status and role
//! - `contract` — Show a contract or request a lifecycle transition
//!
//! Argument parsing lives here and in `main.rs`; handlers delegate to the
//! library crates.

pub mod actions;
pub mod config;
pub mod contract;
pub mod migrate;
