//! Review API client error types.

use mcr_core::ContractId;
use mcr_state::LifecycleError;

use crate::config::ConfigError;
use crate::graphql::{ApiErrorCode, GraphQlError};

/// Errors from review API calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error calling {operation}: {source}")]
    Http {
        operation: &'static str,
        source: reqwest::Error,
    },

    /// The API answered with a non-2xx status.
    #[error("review API {operation} returned {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// The API answered with GraphQL errors.
    #[error("review API {operation} failed: {}", first_message(.errors))]
    GraphQl {
        operation: &'static str,
        errors: Vec<GraphQlError>,
    },

    /// The response had neither errors nor the expected data.
    #[error("review API {operation} returned no data")]
    MissingData { operation: &'static str },

    /// Response deserialization failed.
    #[error("failed to deserialize response from {operation}: {source}")]
    Deserialization {
        operation: &'static str,
        source: serde_json::Error,
    },

    /// The request was refused locally before being sent.
    #[error("rejected before sending: {0}")]
    Lifecycle(#[from] LifecycleError),

    /// Another mutation on the same contract has not finished yet.
    #[error("a request for contract {contract_id} is already in progress")]
    MutationInFlight { contract_id: ContractId },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

fn first_message(errors: &[GraphQlError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("unknown error")
}

impl ClientError {
    /// The API error code behind this failure, if there is one.
    ///
    /// HTTP statuses are mapped onto the same codes so callers only deal
    /// with one vocabulary.
    pub fn code(&self) -> Option<ApiErrorCode> {
        match self {
            Self::GraphQl { errors, .. } => errors.iter().find_map(|e| e.code().cloned()),
            Self::Status { status, .. } => match status {
                400 => Some(ApiErrorCode::BadUserInput),
                401 => Some(ApiErrorCode::Unauthenticated),
                403 => Some(ApiErrorCode::Forbidden),
                404 => Some(ApiErrorCode::NotFound),
                500..=599 => Some(ApiErrorCode::InternalServerError),
                _ => None,
            },
            _ => None,
        }
    }

    /// The input field a `BAD_USER_INPUT` error points at.
    pub fn argument_name(&self) -> Option<&str> {
        match self {
            Self::GraphQl { errors, .. } => errors.iter().find_map(GraphQlError::argument_name),
            _ => None,
        }
    }
}
