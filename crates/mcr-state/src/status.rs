//! # Submission Statuses
//!
//! A contract carries two independent fields from the review service:
//!
//! - `status` — where the package is in the draft/submit cycle.
//! - `reviewStatus` — the outcome of CMS review.
//!
//! The consolidated status folds them into the one value lifecycle decisions
//! are made on: a review outcome other than `UNDER_REVIEW` wins, otherwise
//! the submission status shows through.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use mcr_core::McrError;

/// Position of a package in the draft/submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Draft,
    Unlocked,
    Submitted,
    Resubmitted,
}

/// Outcome of CMS review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    #[default]
    UnderReview,
    Approved,
    Withdrawn,
}

/// Submission status and review outcome folded into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsolidatedStatus {
    Draft,
    Unlocked,
    Submitted,
    Resubmitted,
    Approved,
    Withdrawn,
}

impl ConsolidatedStatus {
    /// All statuses, in lifecycle order.
    pub fn all() -> &'static [ConsolidatedStatus] {
        &[
            Self::Draft,
            Self::Unlocked,
            Self::Submitted,
            Self::Resubmitted,
            Self::Approved,
            Self::Withdrawn,
        ]
    }

    /// Fold a submission status and review status together.
    pub fn consolidate(status: SubmissionStatus, review: ReviewStatus) -> Self {
        match review {
            ReviewStatus::Approved => Self::Approved,
            ReviewStatus::Withdrawn => Self::Withdrawn,
            ReviewStatus::UnderReview => status.into(),
        }
    }

    /// Whether CMS currently has the package in front of it.
    pub fn is_under_review(&self) -> bool {
        matches!(self, Self::Submitted | Self::Resubmitted)
    }

    /// Whether the state can currently edit the package.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::Unlocked)
    }

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Unlocked => "UNLOCKED",
            Self::Submitted => "SUBMITTED",
            Self::Resubmitted => "RESUBMITTED",
            Self::Approved => "APPROVED",
            Self::Withdrawn => "WITHDRAWN",
        }
    }
}

impl From<SubmissionStatus> for ConsolidatedStatus {
    fn from(status: SubmissionStatus) -> Self {
        match status {
            SubmissionStatus::Draft => Self::Draft,
            SubmissionStatus::Unlocked => Self::Unlocked,
            SubmissionStatus::Submitted => Self::Submitted,
            SubmissionStatus::Resubmitted => Self::Resubmitted,
        }
    }
}

impl std::fmt::Display for ConsolidatedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ConsolidatedStatus::from(*self).fmt(f)
    }
}

impl FromStr for ConsolidatedStatus {
    type Err = McrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == upper)
            .ok_or_else(|| McrError::UnknownStatus(s.to_string()))
    }
}
