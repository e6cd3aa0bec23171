//! # Actions Subcommand
//!
//! Answers "what may this role do with a package in this status" from the
//! gating table and the configured feature flags. No network access.

use anyhow::Result;
use clap::Args;

use mcr_core::UserRole;
use mcr_state::{allowed_actions, ActionSet, ConsolidatedStatus, FeatureFlags};

use crate::config::Config;

/// Arguments for `mcr actions`.
#[derive(Args, Debug)]
pub struct ActionsArgs {
    /// Consolidated status (e.g. SUBMITTED, unlocked).
    #[arg(long)]
    pub status: ConsolidatedStatus,

    /// Role (e.g. STATE_USER, cms, cms-approver).
    #[arg(long)]
    pub role: UserRole,

    /// Print a JSON array instead of a comma-separated list.
    #[arg(long)]
    pub json: bool,
}

/// Render the permitted actions.
pub fn render_actions(actions: &ActionSet, json: bool) -> Result<String> {
    if json {
        let names: Vec<&str> = actions.iter().map(|a| a.as_str()).collect();
        return Ok(serde_json::to_string(&names)?);
    }
    if actions.is_empty() {
        return Ok("(none)".to_string());
    }
    Ok(actions.to_string())
}

pub fn actions_for(args: &ActionsArgs, flags: &FeatureFlags) -> ActionSet {
    allowed_actions(args.status, args.role, flags)
}

pub fn run_actions(args: &ActionsArgs, config: &Config) -> Result<u8> {
    let actions = actions_for(args, &config.flags);
    tracing::debug!(
        status = %args.status,
        role = %args.role,
        count = actions.len(),
        "computed allowed actions"
    );
    println!("{}", render_actions(&actions, args.json)?);
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(status: ConsolidatedStatus, role: UserRole) -> ActionsArgs {
        ActionsArgs {
            status,
            role,
            json: false,
        }
    }

    #[test]
    fn draft_for_cms_renders_none() {
        let set = actions_for(
            &args(ConsolidatedStatus::Draft, UserRole::CmsUser),
            &FeatureFlags::default(),
        );
        assert_eq!(render_actions(&set, false).unwrap(), "(none)");
        assert_eq!(render_actions(&set, true).unwrap(), "[]");
    }

    #[test]
    fn submitted_for_cms_lists_lifecycle_actions() {
        let set = actions_for(
            &args(ConsolidatedStatus::Submitted, UserRole::CmsUser),
            &FeatureFlags::default(),
        );
        let json = render_actions(&set, true).unwrap();
        let names: Vec<String> = serde_json::from_str(&json).unwrap();
        assert!(names.contains(&"unlock".to_string()));
        assert!(names.contains(&"approve".to_string()));
        assert!(names.contains(&"withdraw".to_string()));
    }
}
