//! # User Roles
//!
//! The review service issues one of six roles per session. Lifecycle gating
//! only distinguishes three groups of them, captured by [`ActorKind`]:
//!
//! | Role                  | Actor kind |
//! |-----------------------|------------|
//! | `STATE_USER`          | State      |
//! | `CMS_USER`            | Cms        |
//! | `CMS_APPROVER_USER`   | Cms        |
//! | `ADMIN_USER`          | ReadOnly   |
//! | `HELPDESK_USER`       | ReadOnly   |
//! | `BUSINESS_OWNER_USER` | ReadOnly   |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::McrError;

/// A session role as issued by the review service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// A state agency user who prepares and submits packages.
    StateUser,
    /// A CMS reviewer.
    CmsUser,
    /// A CMS reviewer with approval authority.
    CmsApproverUser,
    /// Application administrator.
    AdminUser,
    /// Help desk staff.
    HelpdeskUser,
    /// Business owner with read access.
    BusinessOwnerUser,
}

/// The group a role belongs to for lifecycle decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorKind {
    /// Submitting state.
    State,
    /// Reviewing body.
    Cms,
    /// Everyone else; may look, may not act.
    ReadOnly,
}

impl UserRole {
    /// All roles, in the order the service documents them.
    pub fn all() -> &'static [UserRole] {
        &[
            Self::StateUser,
            Self::CmsUser,
            Self::CmsApproverUser,
            Self::AdminUser,
            Self::HelpdeskUser,
            Self::BusinessOwnerUser,
        ]
    }

    /// Wire name (`STATE_USER`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StateUser => "STATE_USER",
            Self::CmsUser => "CMS_USER",
            Self::CmsApproverUser => "CMS_APPROVER_USER",
            Self::AdminUser => "ADMIN_USER",
            Self::HelpdeskUser => "HELPDESK_USER",
            Self::BusinessOwnerUser => "BUSINESS_OWNER_USER",
        }
    }

    /// Which lifecycle group this role acts as.
    pub fn actor_kind(&self) -> ActorKind {
        match self {
            Self::StateUser => ActorKind::State,
            Self::CmsUser | Self::CmsApproverUser => ActorKind::Cms,
            Self::AdminUser | Self::HelpdeskUser | Self::BusinessOwnerUser => ActorKind::ReadOnly,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = McrError;

    /// Accepts the wire name in any case, and the short CLI forms
    /// `state`, `cms`, `cms-approver`, `admin`, `helpdesk`, `business-owner`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "STATE_USER" | "STATE" => Ok(Self::StateUser),
            "CMS_USER" | "CMS" => Ok(Self::CmsUser),
            "CMS_APPROVER_USER" | "CMS_APPROVER" => Ok(Self::CmsApproverUser),
            "ADMIN_USER" | "ADMIN" => Ok(Self::AdminUser),
            "HELPDESK_USER" | "HELPDESK" => Ok(Self::HelpdeskUser),
            "BUSINESS_OWNER_USER" | "BUSINESS_OWNER" => Ok(Self::BusinessOwnerUser),
            _ => Err(McrError::UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_round_trips_through_as_str() {
        for role in UserRole::all() {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), *role);
        }
    }

    #[test]
    fn short_forms_parse() {
        assert_eq!("cms".parse::<UserRole>().unwrap(), UserRole::CmsUser);
        assert_eq!("state".parse::<UserRole>().unwrap(), UserRole::StateUser);
        assert_eq!(
            "business-owner".parse::<UserRole>().unwrap(),
            UserRole::BusinessOwnerUser
        );
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(matches!(
            "ZONE_ADMIN".parse::<UserRole>(),
            Err(McrError::UnknownRole(_))
        ));
    }

    #[test]
    fn approvers_act_as_cms() {
        assert_eq!(UserRole::CmsApproverUser.actor_kind(), ActorKind::Cms);
        assert_eq!(UserRole::HelpdeskUser.actor_kind(), ActorKind::ReadOnly);
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&UserRole::CmsApproverUser).unwrap();
        assert_eq!(json, "\"CMS_APPROVER_USER\"");
    }
}
