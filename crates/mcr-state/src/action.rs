//! # Action Gating
//!
//! [`allowed_actions`] is the single decision point for what an actor may do
//! with a package in a given consolidated status.
//!
//! ```text
//!                 │ State user          │ CMS user                          │ Read-only
//! ────────────────┼─────────────────────┼───────────────────────────────────┼──────────
//! DRAFT           │ view, edit, submit  │ -                                 │ -
//! UNLOCKED        │ view, edit, resubmit│ view                              │ view
//! SUBMITTED       │ view                │ view, unlock, approve*, withdraw* │ view
//! RESUBMITTED     │ view                │ view, unlock, approve*, withdraw* │ view
//! APPROVED        │ view                │ view                              │ view
//! WITHDRAWN       │ view                │ view, undo-withdraw*              │ view
//! ```
//!
//! `*` marks actions behind a feature flag. A `-` means the package is not
//! visible at all, so the set is empty.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use mcr_core::{ActorKind, McrError, UserRole};

use crate::flags::FeatureFlags;
use crate::status::ConsolidatedStatus;

/// Something a user can do with a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// See the package.
    View,
    /// Change form data.
    Edit,
    /// First submission of a draft.
    Submit,
    /// Submit again after an unlock.
    Resubmit,
    /// Return a submitted package to the state for changes.
    Unlock,
    /// Approve and release to the state.
    Approve,
    /// Withdraw a submitted package.
    Withdraw,
    /// Revert a withdrawal.
    UndoWithdraw,
}

impl Action {
    /// Whether the action changes lifecycle state (and so goes to the
    /// remote service as a mutation).
    pub fn is_transition(&self) -> bool {
        !matches!(self, Self::View | Self::Edit)
    }

    /// Kebab-case name used on the command line and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Submit => "submit",
            Self::Resubmit => "resubmit",
            Self::Unlock => "unlock",
            Self::Approve => "approve",
            Self::Withdraw => "withdraw",
            Self::UndoWithdraw => "undo-withdraw",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = McrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "view" => Ok(Self::View),
            "edit" => Ok(Self::Edit),
            "submit" => Ok(Self::Submit),
            "resubmit" => Ok(Self::Resubmit),
            "unlock" => Ok(Self::Unlock),
            "approve" | "release-to-state" => Ok(Self::Approve),
            "withdraw" => Ok(Self::Withdraw),
            "undo-withdraw" => Ok(Self::UndoWithdraw),
            _ => Err(McrError::UnknownAction(s.to_string())),
        }
    }
}

/// An ordered set of permitted actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionSet(BTreeSet<Action>);

impl ActionSet {
    pub fn contains(&self, action: Action) -> bool {
        self.0.contains(&action)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.0.iter().copied()
    }

    /// Whether the package is view-only: visible, nothing else allowed.
    pub fn is_view_only(&self) -> bool {
        self.0.len() == 1 && self.contains(Action::View)
    }

    fn insert_if(&mut self, action: Action, enabled: bool) {
        if enabled {
            self.0.insert(action);
        }
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for ActionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.iter().map(|a| a.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}

/// The actions `role` may take on a package in `status`.
pub fn allowed_actions(
    status: ConsolidatedStatus,
    role: UserRole,
    flags: &FeatureFlags,
) -> ActionSet {
    use Action::*;
    use ConsolidatedStatus as S;

    let actor = role.actor_kind();
    match (status, actor) {
        // Drafts belong to the state until first submission.
        (S::Draft, ActorKind::State) => [View, Edit, Submit].into_iter().collect(),
        (S::Draft, _) => ActionSet::default(),

        (S::Unlocked, ActorKind::State) => [View, Edit, Resubmit].into_iter().collect(),

        (S::Submitted | S::Resubmitted, ActorKind::Cms) => {
            let mut set: ActionSet = [View, Unlock].into_iter().collect();
            set.insert_if(Approve, flags.release_to_state);
            set.insert_if(Withdraw, flags.withdraw);
            set
        }

        (S::Withdrawn, ActorKind::Cms) => {
            let mut set: ActionSet = [View].into_iter().collect();
            set.insert_if(UndoWithdraw, flags.undo_withdraw);
            set
        }

        (S::Unlocked | S::Submitted | S::Resubmitted | S::Approved | S::Withdrawn, _) => {
            [View].into_iter().collect()
        }
    }
}
