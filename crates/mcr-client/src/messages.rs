//! User-facing error copy.
//!
//! A failed lifecycle request is shown to the user as a heading and a
//! sentence. Errors tied to one input field name that field so the form can
//! highlight it; everything else gets the generic system-error copy.

use serde::Serialize;

use mcr_state::LifecycleError;

use crate::error::ClientError;
use crate::graphql::ApiErrorCode;

pub const GENERIC_HEADING: &str = "System error";
pub const GENERIC_MESSAGE: &str =
    "We're having trouble loading this page. Please refresh your browser and if you continue to experience an error, let us know.";

/// What the user sees when a request fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFacingError {
    pub heading: String,
    pub message: String,
    /// Input field the error is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// API error code, when the failure came from the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl UserFacingError {
    fn new(heading: &str, message: impl Into<String>) -> Self {
        Self {
            heading: heading.to_string(),
            message: message.into(),
            field: None,
            code: None,
        }
    }

    pub fn generic() -> Self {
        Self::new(GENERIC_HEADING, GENERIC_MESSAGE)
    }

    /// Whether this is the catch-all copy.
    pub fn is_generic(&self) -> bool {
        self.field.is_none() && self.heading == GENERIC_HEADING && self.message == GENERIC_MESSAGE
    }

    fn with_code(mut self, code: Option<ApiErrorCode>) -> Self {
        self.code = code.map(String::from);
        self
    }
}

impl std::fmt::Display for UserFacingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.heading, self.message)
    }
}

/// Label for a mutation input field.
fn field_label(argument: &str) -> Option<&'static str> {
    match argument {
        "unlockedReason" => Some("Reason for unlocking submission"),
        "submittedReason" => Some("Summary of changes"),
        "updatedReason" => Some("Reason for this change"),
        "dateApprovalReleasedToState" => Some("Date released to state"),
        _ => None,
    }
}

impl From<&ClientError> for UserFacingError {
    fn from(err: &ClientError) -> Self {
        let code = err.code();
        let user = match (&code, err) {
            (_, ClientError::MutationInFlight { .. }) => Self::new(
                "Request in progress",
                "This submission is already being updated. Wait for that request to finish and try again.",
            ),
            (_, ClientError::Lifecycle(e)) => return Self::from(e),
            (Some(ApiErrorCode::BadUserInput), _) => match err.argument_name() {
                Some(argument) => {
                    let label = field_label(argument).unwrap_or(argument);
                    let mut user = Self::new(
                        "Error attempting to save",
                        format!("{label} is missing or invalid. Update the field and try again."),
                    );
                    user.field = Some(argument.to_string());
                    user
                }
                None => Self::generic(),
            },
            (Some(ApiErrorCode::NotFound), _) => Self::new(
                "Submission not found",
                "We could not find this submission. It may have been deleted.",
            ),
            (Some(ApiErrorCode::Forbidden), _) => Self::new(
                "Not allowed",
                "You do not have permission to make this change.",
            ),
            (Some(ApiErrorCode::Unauthenticated), _) => Self::new(
                "Session expired",
                "Your session has expired. Sign in again to continue.",
            ),
            _ => Self::generic(),
        };
        user.with_code(code)
    }
}

impl From<&LifecycleError> for UserFacingError {
    fn from(err: &LifecycleError) -> Self {
        match err {
            LifecycleError::ReasonRequired { .. } => {
                let mut user = Self::new("Missing information", "You must provide a reason for this change.");
                user.field = Some("reason".to_string());
                user
            }
            LifecycleError::ReleaseDateRequired => {
                let mut user = Self::new(
                    "Missing information",
                    "You must provide the date the approval was released to the state.",
                );
                user.field = Some("dateApprovalReleasedToState".to_string());
                user
            }
            LifecycleError::NotPermitted { .. }
            | LifecycleError::InvalidTransition { .. }
            | LifecycleError::NotATransition { .. } => {
                Self::new("Action not available", err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::{ErrorExtensions, GraphQlError};
    use mcr_core::ContractId;
    use mcr_state::Action;

    fn gql(code: &str, arg: Option<&str>) -> ClientError {
        ClientError::GraphQl {
            operation: "unlockContract",
            errors: vec![GraphQlError {
                message: "rejected".to_string(),
                extensions: Some(ErrorExtensions {
                    code: Some(ApiErrorCode::from(code.to_string())),
                    argument_name: arg.map(str::to_string),
                }),
            }],
        }
    }

    #[test]
    fn bad_input_names_the_field() {
        let user = UserFacingError::from(&gql("BAD_USER_INPUT", Some("unlockedReason")));
        assert_eq!(user.field.as_deref(), Some("unlockedReason"));
        assert!(user.message.starts_with("Reason for unlocking submission"));
        assert_eq!(user.code.as_deref(), Some("BAD_USER_INPUT"));
        assert!(!user.is_generic());
    }

    #[test]
    fn bad_input_without_field_is_generic() {
        assert!(UserFacingError::from(&gql("BAD_USER_INPUT", None)).is_generic());
    }

    #[test]
    fn unknown_code_is_generic_but_keeps_code() {
        let user = UserFacingError::from(&gql("SOMETHING_NEW", None));
        assert!(user.is_generic());
        assert_eq!(user.code.as_deref(), Some("SOMETHING_NEW"));
    }

    #[test]
    fn server_errors_are_generic() {
        let err = ClientError::Status {
            operation: "withdrawContract",
            status: 500,
            body: "oops".to_string(),
        };
        let user = UserFacingError::from(&err);
        assert!(user.is_generic());
        assert_eq!(user.code.as_deref(), Some("INTERNAL_SERVER_ERROR"));
    }

    #[test]
    fn forbidden_and_not_found_have_copy() {
        assert_eq!(UserFacingError::from(&gql("FORBIDDEN", None)).heading, "Not allowed");
        assert_eq!(
            UserFacingError::from(&gql("NOT_FOUND", None)).heading,
            "Submission not found"
        );
    }

    #[test]
    fn in_flight_has_its_own_copy() {
        let err = ClientError::MutationInFlight {
            contract_id: ContractId::new(),
        };
        let user = UserFacingError::from(&err);
        assert_eq!(user.heading, "Request in progress");
        assert_eq!(user.code, None);
    }

    #[test]
    fn missing_reason_points_at_reason() {
        let err = ClientError::Lifecycle(LifecycleError::ReasonRequired {
            action: Action::Unlock,
        });
        assert_eq!(UserFacingError::from(&err).field.as_deref(), Some("reason"));
    }
}
