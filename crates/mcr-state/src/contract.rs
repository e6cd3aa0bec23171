//! # Contract Lifecycle
//!
//! A contract package with its revision history and review outcome.
//!
//! ## Transitions
//!
//! ```text
//!            submit                unlock
//!   DRAFT ───────────▶ SUBMITTED ─────────▶ UNLOCKED
//!                        │   ▲                 │
//!                        │   │   resubmit      │
//!                        │   └── RESUBMITTED ◀─┘
//!                        │          │
//!         approve ◀──────┴──────────┴──────▶ withdraw
//!            │                                  │
//!            ▼                                  ▼
//!         APPROVED                          WITHDRAWN ──undo-withdraw──▶ (previous)
//! ```
//!
//! `unlock` is also allowed from RESUBMITTED. Approval and withdrawal leave
//! `status` alone and set `review_status`; undo-withdraw clears it again, so
//! the package returns to whichever of SUBMITTED or RESUBMITTED it was in.
//!
//! ## Revisions
//!
//! `revisions` is ordered newest first. Unlocking pushes a fresh revision to
//! the front carrying the unlock info; submitting or resubmitting stamps the
//! front revision's submit info. Earlier revisions are never modified.
//!
//! The review service owns the real aggregate. [`Contract::apply`] mirrors
//! its rules so that a request can be validated before it is sent, and so
//! tests and stubs can drive a contract through its lifecycle.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use mcr_core::{CalendarDate, ContractId, RevisionId, Timestamp, UserRole};

use crate::action::{allowed_actions, Action};
use crate::flags::FeatureFlags;
use crate::status::{ConsolidatedStatus, ReviewStatus, SubmissionStatus};

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors from lifecycle transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The role may not take this action in the current status.
    #[error("{role} may not {action} a {status} contract")]
    NotPermitted {
        action: Action,
        status: ConsolidatedStatus,
        role: UserRole,
    },

    /// The action does not move the contract between states.
    #[error("{action} is not a lifecycle transition")]
    NotATransition {
        action: Action,
    },

    /// The status does not admit this action regardless of role.
    #[error("cannot {action} a {status} contract")]
    InvalidTransition {
        action: Action,
        status: ConsolidatedStatus,
    },

    /// The action needs a non-empty reason.
    #[error("{action} requires a reason")]
    ReasonRequired {
        action: Action,
    },

    /// Approval needs the date it was released to the state.
    #[error("approve requires the date the approval was released to the state")]
    ReleaseDateRequired,
}

// ─── Records ─────────────────────────────────────────────────────────

/// Who changed a revision or review status, when and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfo {
    pub updated_at: Timestamp,
    pub updated_by: String,
    pub updated_reason: String,
}

/// One revision of the contract's form data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub id: RevisionId,
    /// Set when this revision was submitted.
    #[serde(default)]
    pub submit_info: Option<UpdateInfo>,
    /// Set when this revision was opened by an unlock.
    #[serde(default)]
    pub unlock_info: Option<UpdateInfo>,
}

/// Kinds of review status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewActionType {
    MarkAsApproved,
    Withdraw,
    UndoWithdraw,
}

/// A change to the contract's review status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStatusAction {
    pub action_type: ReviewActionType,
    #[serde(flatten)]
    pub info: UpdateInfo,
}

/// Local log entry for a transition applied through [`Contract::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRecord {
    pub from_status: ConsolidatedStatus,
    pub to_status: ConsolidatedStatus,
    pub action: Action,
    pub timestamp: Timestamp,
    pub reason: String,
}

/// Inputs to a transition.
#[derive(Debug, Clone)]
pub struct TransitionEvidence {
    /// Role of the acting user.
    pub role: UserRole,
    /// Email of the acting user.
    pub updated_by: String,
    /// Reason entered by the user.
    pub reason: Option<String>,
    /// Release date for approvals.
    pub release_date: Option<CalendarDate>,
    /// When the transition happened.
    pub at: Timestamp,
}

impl TransitionEvidence {
    pub fn new(role: UserRole, updated_by: impl Into<String>) -> Self {
        Self {
            role,
            updated_by: updated_by.into(),
            reason: None,
            release_date: None,
            at: Timestamp::now(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_release_date(mut self, date: CalendarDate) -> Self {
        self.release_date = Some(date);
        self
    }

    pub fn at(mut self, at: Timestamp) -> Self {
        self.at = at;
        self
    }

    /// The reason with surrounding whitespace removed, if anything is left.
    pub fn trimmed_reason(&self) -> Option<&str> {
        self.reason.as_deref().map(str::trim).filter(|r| !r.is_empty())
    }

    fn update_info(&self, reason: &str) -> UpdateInfo {
        UpdateInfo {
            updated_at: self.at,
            updated_by: self.updated_by.clone(),
            updated_reason: reason.to_string(),
        }
    }
}

// ─── Transition Table ────────────────────────────────────────────────

/// Where `action` takes a contract in `status`, ignoring who is asking.
///
/// For undo-withdraw the answer depends on the submission status hidden
/// behind WITHDRAWN, so `submission` is needed to resolve it.
pub fn next_status(
    status: ConsolidatedStatus,
    submission: SubmissionStatus,
    action: Action,
) -> Result<ConsolidatedStatus, LifecycleError> {
    use ConsolidatedStatus as S;

    if !action.is_transition() {
        return Err(LifecycleError::NotATransition { action });
    }
    let next = match (status, action) {
        (S::Draft, Action::Submit) => S::Submitted,
        (S::Unlocked, Action::Resubmit) => S::Resubmitted,
        (S::Submitted | S::Resubmitted, Action::Unlock) => S::Unlocked,
        (S::Submitted | S::Resubmitted, Action::Approve) => S::Approved,
        (S::Submitted | S::Resubmitted, Action::Withdraw) => S::Withdrawn,
        (S::Withdrawn, Action::UndoWithdraw) => submission.into(),
        _ => return Err(LifecycleError::InvalidTransition { action, status }),
    };
    Ok(next)
}

// ─── Contract ────────────────────────────────────────────────────────

/// A contract package as returned by the review service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: ContractId,
    pub state_code: String,
    pub status: SubmissionStatus,
    #[serde(default)]
    pub review_status: ReviewStatus,
    #[serde(default)]
    pub initially_submitted_at: Option<CalendarDate>,
    #[serde(default)]
    pub date_approval_released_to_state: Option<CalendarDate>,
    /// Newest first.
    #[serde(default)]
    pub revisions: Vec<Revision>,
    /// Newest first.
    #[serde(default)]
    pub review_status_actions: Vec<ReviewStatusAction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transitions: Vec<TransitionRecord>,
}

impl Contract {
    /// A new draft with one empty revision.
    pub fn new_draft(id: ContractId, state_code: impl Into<String>) -> Self {
        Self {
            id,
            state_code: state_code.into(),
            status: SubmissionStatus::Draft,
            review_status: ReviewStatus::UnderReview,
            initially_submitted_at: None,
            date_approval_released_to_state: None,
            revisions: vec![Revision {
                id: RevisionId::new(),
                submit_info: None,
                unlock_info: None,
            }],
            review_status_actions: Vec::new(),
            transitions: Vec::new(),
        }
    }

    pub fn consolidated_status(&self) -> ConsolidatedStatus {
        ConsolidatedStatus::consolidate(self.status, self.review_status)
    }

    /// Actions available to `role` right now.
    pub fn allowed_actions(&self, role: UserRole, flags: &FeatureFlags) -> crate::ActionSet {
        allowed_actions(self.consolidated_status(), role, flags)
    }

    /// The newest revision.
    pub fn latest_revision(&self) -> Option<&Revision> {
        self.revisions.first()
    }

    /// The newest revision that has been submitted.
    pub fn latest_submitted_revision(&self) -> Option<&Revision> {
        self.revisions.iter().find(|r| r.submit_info.is_some())
    }

    /// The newest review status change.
    pub fn latest_review_action(&self) -> Option<&ReviewStatusAction> {
        self.review_status_actions.first()
    }

    /// Check that `action` would be accepted, without changing anything.
    pub fn check(
        &self,
        action: Action,
        evidence: &TransitionEvidence,
        flags: &FeatureFlags,
    ) -> Result<ConsolidatedStatus, LifecycleError> {
        let status = self.consolidated_status();
        let next = next_status(status, self.status, action)?;
        if !self.allowed_actions(evidence.role, flags).contains(action) {
            return Err(LifecycleError::NotPermitted {
                action,
                status,
                role: evidence.role,
            });
        }
        match action {
            Action::Submit => {}
            Action::Approve => {
                if evidence.release_date.is_none() {
                    return Err(LifecycleError::ReleaseDateRequired);
                }
            }
            _ => {
                if evidence.trimmed_reason().is_none() {
                    return Err(LifecycleError::ReasonRequired { action });
                }
            }
        }
        Ok(next)
    }

    /// Apply `action`. On error the contract is unchanged.
    pub fn apply(
        &mut self,
        action: Action,
        evidence: &TransitionEvidence,
        flags: &FeatureFlags,
    ) -> Result<TransitionRecord, LifecycleError> {
        let from = self.consolidated_status();
        let to = self.check(action, evidence, flags)?;
        let reason = evidence
            .trimmed_reason()
            .unwrap_or(match action {
                Action::Submit => "Initial submission",
                Action::Approve => "Released to state",
                _ => "",
            })
            .to_string();
        let info = evidence.update_info(&reason);

        match action {
            Action::Submit => {
                self.status = SubmissionStatus::Submitted;
                self.initially_submitted_at = Some(evidence.at.date());
                self.stamp_front_revision(info);
            }
            Action::Resubmit => {
                self.status = SubmissionStatus::Resubmitted;
                self.stamp_front_revision(info);
            }
            Action::Unlock => {
                self.status = SubmissionStatus::Unlocked;
                self.revisions.insert(
                    0,
                    Revision {
                        id: RevisionId::new(),
                        submit_info: None,
                        unlock_info: Some(info),
                    },
                );
            }
            Action::Approve => {
                self.review_status = ReviewStatus::Approved;
                self.date_approval_released_to_state = evidence.release_date;
                self.push_review_action(ReviewActionType::MarkAsApproved, info);
            }
            Action::Withdraw => {
                self.review_status = ReviewStatus::Withdrawn;
                self.push_review_action(ReviewActionType::Withdraw, info);
            }
            Action::UndoWithdraw => {
                self.review_status = ReviewStatus::UnderReview;
                self.push_review_action(ReviewActionType::UndoWithdraw, info);
            }
            Action::View | Action::Edit => return Err(LifecycleError::NotATransition { action }),
        }

        let record = TransitionRecord {
            from_status: from,
            to_status: to,
            action,
            timestamp: evidence.at,
            reason,
        };
        tracing::debug!(
            contract_id = %self.id,
            from = %from,
            to = %to,
            action = %action,
            "contract transition applied"
        );
        self.transitions.push(record.clone());
        Ok(record)
    }

    fn stamp_front_revision(&mut self, info: UpdateInfo) {
        match self.revisions.first_mut() {
            Some(front) => front.submit_info = Some(info),
            None => self.revisions.push(Revision {
                id: RevisionId::new(),
                submit_info: Some(info),
                unlock_info: None,
            }),
        }
    }

    fn push_review_action(&mut self, action_type: ReviewActionType, info: UpdateInfo) {
        self.review_status_actions
            .insert(0, ReviewStatusAction { action_type, info });
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const STATE: &str = "state.user@example.gov";
    const CMS: &str = "cms.reviewer@example.gov";

    fn state(reason: &str) -> TransitionEvidence {
        TransitionEvidence::new(UserRole::StateUser, STATE).with_reason(reason)
    }

    fn cms(reason: &str) -> TransitionEvidence {
        TransitionEvidence::new(UserRole::CmsUser, CMS).with_reason(reason)
    }

    fn submitted() -> Contract {
        let mut c = Contract::new_draft(ContractId::new(), "MN");
        c.apply(
            Action::Submit,
            &TransitionEvidence::new(UserRole::StateUser, STATE),
            &FeatureFlags::default(),
        )
        .unwrap();
        c
    }

    #[test]
    fn new_draft_has_one_open_revision() {
        let c = Contract::new_draft(ContractId::new(), "MN");
        assert_eq!(c.consolidated_status(), ConsolidatedStatus::Draft);
        assert_eq!(c.revisions.len(), 1);
        assert!(c.latest_submitted_revision().is_none());
    }

    #[test]
    fn first_submit_needs_no_reason() {
        let c = submitted();
        assert_eq!(c.status, SubmissionStatus::Submitted);
        assert!(c.initially_submitted_at.is_some());
        let info = c.revisions[0].submit_info.as_ref().unwrap();
        assert_eq!(info.updated_reason, "Initial submission");
        assert_eq!(info.updated_by, STATE);
    }

    #[test]
    fn unlock_then_resubmit_keeps_history() {
        let mut c = submitted();
        let flags = FeatureFlags::default();
        c.apply(Action::Unlock, &cms("Fix rate dates"), &flags).unwrap();
        assert_eq!(c.consolidated_status(), ConsolidatedStatus::Unlocked);
        assert_eq!(c.revisions.len(), 2);
        assert!(c.revisions[0].submit_info.is_none());
        assert_eq!(
            c.revisions[0].unlock_info.as_ref().unwrap().updated_reason,
            "Fix rate dates"
        );

        c.apply(Action::Resubmit, &state("Dates fixed"), &flags).unwrap();
        assert_eq!(c.consolidated_status(), ConsolidatedStatus::Resubmitted);
        assert_eq!(
            c.latest_submitted_revision().unwrap().submit_info.as_ref().unwrap().updated_reason,
            "Dates fixed"
        );
        assert_eq!(
            c.revisions[1].submit_info.as_ref().unwrap().updated_reason,
            "Initial submission"
        );
    }

    #[test]
    fn resubmitted_can_be_unlocked_again() {
        let mut c = submitted();
        let flags = FeatureFlags::default();
        c.apply(Action::Unlock, &cms("one"), &flags).unwrap();
        c.apply(Action::Resubmit, &state("two"), &flags).unwrap();
        c.apply(Action::Unlock, &cms("three"), &flags).unwrap();
        assert_eq!(c.revisions.len(), 3);
        assert_eq!(c.consolidated_status(), ConsolidatedStatus::Unlocked);
    }

    #[test]
    fn approve_requires_release_date() {
        let mut c = submitted();
        let before = c.clone();
        let err = c
            .apply(Action::Approve, &cms("ok"), &FeatureFlags::default())
            .unwrap_err();
        assert_eq!(err, LifecycleError::ReleaseDateRequired);
        assert_eq!(c, before);
    }

    #[test]
    fn approve_records_release_date() {
        let mut c = submitted();
        let date = CalendarDate::parse("2024-05-01").unwrap();
        c.apply(
            Action::Approve,
            &TransitionEvidence::new(UserRole::CmsApproverUser, CMS).with_release_date(date),
            &FeatureFlags::default(),
        )
        .unwrap();
        assert_eq!(c.consolidated_status(), ConsolidatedStatus::Approved);
        assert_eq!(c.status, SubmissionStatus::Submitted);
        assert_eq!(c.date_approval_released_to_state, Some(date));
        assert_eq!(
            c.latest_review_action().unwrap().action_type,
            ReviewActionType::MarkAsApproved
        );
    }

    #[test]
    fn withdraw_and_undo_returns_to_previous_status() {
        let mut c = submitted();
        let flags = FeatureFlags::all_enabled();
        c.apply(Action::Unlock, &cms("u"), &flags).unwrap();
        c.apply(Action::Resubmit, &state("r"), &flags).unwrap();
        c.apply(Action::Withdraw, &cms("duplicate"), &flags).unwrap();
        assert_eq!(c.consolidated_status(), ConsolidatedStatus::Withdrawn);

        let record = c.apply(Action::UndoWithdraw, &cms("mistake"), &flags).unwrap();
        assert_eq!(record.to_status, ConsolidatedStatus::Resubmitted);
        assert_eq!(c.consolidated_status(), ConsolidatedStatus::Resubmitted);
        assert_eq!(c.review_status_actions.len(), 2);
        assert_eq!(
            c.review_status_actions[0].action_type,
            ReviewActionType::UndoWithdraw
        );
    }

    #[test]
    fn undo_withdraw_blocked_when_flag_off() {
        let mut c = submitted();
        c.apply(Action::Withdraw, &cms("w"), &FeatureFlags::default()).unwrap();
        let err = c
            .apply(Action::UndoWithdraw, &cms("undo"), &FeatureFlags::default())
            .unwrap_err();
        assert!(matches!(err, LifecycleError::NotPermitted { .. }));
    }

    #[test]
    fn state_cannot_unlock() {
        let mut c = submitted();
        let err = c
            .apply(Action::Unlock, &state("please"), &FeatureFlags::default())
            .unwrap_err();
        assert_eq!(
            err,
            LifecycleError::NotPermitted {
                action: Action::Unlock,
                status: ConsolidatedStatus::Submitted,
                role: UserRole::StateUser,
            }
        );
    }

    #[test]
    fn blank_reason_is_rejected() {
        let mut c = submitted();
        let err = c
            .apply(Action::Unlock, &cms("   "), &FeatureFlags::default())
            .unwrap_err();
        assert_eq!(err, LifecycleError::ReasonRequired { action: Action::Unlock });
        assert_eq!(c.consolidated_status(), ConsolidatedStatus::Submitted);
    }

    #[test]
    fn approved_cannot_be_unlocked() {
        let mut c = submitted();
        let date = CalendarDate::parse("2024-05-01").unwrap();
        c.apply(
            Action::Approve,
            &cms("ok").with_release_date(date),
            &FeatureFlags::default(),
        )
        .unwrap();
        let err = c
            .apply(Action::Unlock, &cms("reopen"), &FeatureFlags::default())
            .unwrap_err();
        assert!(matches!(err, LifecycleError::InvalidTransition { .. }));
    }

    #[test]
    fn edit_is_not_a_transition() {
        let mut c = Contract::new_draft(ContractId::new(), "MN");
        let err = c
            .apply(Action::Edit, &state("x"), &FeatureFlags::default())
            .unwrap_err();
        assert_eq!(err, LifecycleError::NotATransition { action: Action::Edit });
    }

    #[test]
    fn transition_log_records_each_step() {
        let mut c = submitted();
        c.apply(Action::Unlock, &cms("u"), &FeatureFlags::default()).unwrap();
        assert_eq!(c.transitions.len(), 2);
        assert_eq!(c.transitions[0].from_status, ConsolidatedStatus::Draft);
        assert_eq!(c.transitions[1].to_status, ConsolidatedStatus::Unlocked);
    }

    #[test]
    fn deserializes_service_shape() {
        let json = serde_json::json!({
            "id": "0b5c8d0e-1f1a-4e38-9d2b-6b7c2a9c1f00",
            "stateCode": "FL",
            "status": "SUBMITTED",
            "reviewStatus": "WITHDRAWN",
            "initiallySubmittedAt": "2024-01-10",
            "revisions": [{
                "id": "7c1f6b0e-2a3b-4c5d-8e9f-0a1b2c3d4e5f",
                "submitInfo": {
                    "updatedAt": "2024-01-10T15:00:00.000Z",
                    "updatedBy": "state@example.gov",
                    "updatedReason": "Initial submission"
                },
                "unlockInfo": null
            }],
            "reviewStatusActions": [{
                "actionType": "WITHDRAW",
                "updatedAt": "2024-02-01T10:00:00.000Z",
                "updatedBy": "cms@example.gov",
                "updatedReason": "Duplicate"
            }]
        });
        let c: Contract = serde_json::from_value(json).unwrap();
        assert_eq!(c.consolidated_status(), ConsolidatedStatus::Withdrawn);
        assert_eq!(c.latest_review_action().unwrap().info.updated_reason, "Duplicate");
        assert!(c.transitions.is_empty());
    }
}
