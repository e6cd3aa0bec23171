//! # Banner Selection
//!
//! Decides which status banners a summary page shows for a contract. Each
//! banner carries the data it displays so callers do not dig through the
//! revision history themselves.

use serde::{Deserialize, Serialize};

use mcr_core::{ActorKind, CalendarDate, UserRole};

use crate::contract::{Contract, ReviewActionType, UpdateInfo};
use crate::status::ConsolidatedStatus;

/// A status banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Banner {
    /// The package was returned to the state for changes.
    Unlocked { info: UpdateInfo },
    /// The state resubmitted after an unlock.
    Resubmitted { info: UpdateInfo },
    /// CMS is looking at a package the state is still changing.
    IncompleteSubmission,
    /// CMS approved the package.
    Approved {
        released_to_state: Option<CalendarDate>,
        info: Option<UpdateInfo>,
    },
    /// CMS withdrew the package.
    Withdrawn { info: Option<UpdateInfo> },
}

impl Banner {
    /// One-line heading, as shown at the top of the banner.
    pub fn heading(&self) -> String {
        match self {
            Self::Unlocked { info } => format!(
                "Submission unlocked by {} on {}: {}",
                info.updated_by,
                info.updated_at.date().to_display(),
                info.updated_reason
            ),
            Self::Resubmitted { info } => format!(
                "Submission updated by {} on {}: {}",
                info.updated_by,
                info.updated_at.date().to_display(),
                info.updated_reason
            ),
            Self::IncompleteSubmission => {
                "Incomplete submission: the state is making changes".to_string()
            }
            Self::Approved {
                released_to_state, ..
            } => match released_to_state {
                Some(date) => format!("Approved and released to state on {}", date.to_display()),
                None => "Approved".to_string(),
            },
            Self::Withdrawn { info } => match info {
                Some(info) => format!(
                    "Withdrawn by {} on {}: {}",
                    info.updated_by,
                    info.updated_at.date().to_display(),
                    info.updated_reason
                ),
                None => "Withdrawn".to_string(),
            },
        }
    }
}

/// Banners for `contract` as seen by `role`, most prominent first.
///
/// A role that cannot see the contract gets none.
pub fn banners(contract: &Contract, role: UserRole) -> Vec<Banner> {
    let status = contract.consolidated_status();
    let actor = role.actor_kind();
    if status == ConsolidatedStatus::Draft && actor != ActorKind::State {
        return Vec::new();
    }

    let review_info = |kind: ReviewActionType| {
        contract
            .review_status_actions
            .iter()
            .find(|a| a.action_type == kind)
            .map(|a| a.info.clone())
    };

    let mut out = Vec::new();
    match status {
        ConsolidatedStatus::Draft | ConsolidatedStatus::Submitted => {}
        ConsolidatedStatus::Unlocked => {
            if let Some(info) = contract
                .latest_revision()
                .and_then(|r| r.unlock_info.clone())
            {
                out.push(Banner::Unlocked { info });
            }
            if actor != ActorKind::State {
                out.push(Banner::IncompleteSubmission);
            }
        }
        ConsolidatedStatus::Resubmitted => {
            if let Some(info) = contract
                .latest_submitted_revision()
                .and_then(|r| r.submit_info.clone())
            {
                out.push(Banner::Resubmitted { info });
            }
        }
        ConsolidatedStatus::Approved => out.push(Banner::Approved {
            released_to_state: contract.date_approval_released_to_state,
            info: review_info(ReviewActionType::MarkAsApproved),
        }),
        ConsolidatedStatus::Withdrawn => out.push(Banner::Withdrawn {
            info: review_info(ReviewActionType::Withdraw),
        }),
    }
    out
}
