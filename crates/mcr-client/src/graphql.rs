//! # GraphQL Wire Format
//!
//! Request/response envelopes and the operation documents the client sends.
//! Every mutation returns `{ contract { ...ContractFields } }` so the caller
//! always gets the aggregate as the service now sees it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST` body.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

/// Response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// One entry of the `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<ErrorExtensions>,
}

/// Machine-readable error details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorExtensions {
    #[serde(default)]
    pub code: Option<ApiErrorCode>,
    /// Input field the error refers to, for `BAD_USER_INPUT`.
    #[serde(default)]
    pub argument_name: Option<String>,
}

/// Error codes the review API reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApiErrorCode {
    BadUserInput,
    NotFound,
    Forbidden,
    Unauthenticated,
    InternalServerError,
    /// A code this client does not know, kept verbatim.
    Other(String),
}

impl ApiErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::BadUserInput => "BAD_USER_INPUT",
            Self::NotFound => "NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::Other(code) => code,
        }
    }
}

impl From<String> for ApiErrorCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "BAD_USER_INPUT" => Self::BadUserInput,
            "NOT_FOUND" => Self::NotFound,
            "FORBIDDEN" => Self::Forbidden,
            "UNAUTHENTICATED" => Self::Unauthenticated,
            "INTERNAL_SERVER_ERROR" => Self::InternalServerError,
            _ => Self::Other(code),
        }
    }
}

impl From<ApiErrorCode> for String {
    fn from(code: ApiErrorCode) -> Self {
        code.as_str().to_string()
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GraphQlError {
    pub fn code(&self) -> Option<&ApiErrorCode> {
        self.extensions.as_ref().and_then(|e| e.code.as_ref())
    }

    pub fn argument_name(&self) -> Option<&str> {
        self.extensions
            .as_ref()
            .and_then(|e| e.argument_name.as_deref())
    }
}

// ─── Documents ───────────────────────────────────────────────────────

macro_rules! contract_fields {
    () => {
        r#"
fragment ContractFields on Contract {
    id
    stateCode
    status
    reviewStatus
    initiallySubmittedAt
    dateApprovalReleasedToState
    revisions {
        id
        submitInfo { updatedAt updatedBy updatedReason }
        unlockInfo { updatedAt updatedBy updatedReason }
    }
    reviewStatusActions { actionType updatedAt updatedBy updatedReason }
}
"#
    };
}

macro_rules! with_contract_fields {
    ($body:literal) => {
        concat!($body, contract_fields!())
    };
}

pub const FETCH_CONTRACT: &str = with_contract_fields!(
    "query fetchContract($input: FetchContractInput!) { fetchContract(input: $input) { contract { ...ContractFields } } }"
);

pub const SUBMIT_CONTRACT: &str = with_contract_fields!(
    "mutation submitContract($input: SubmitContractInput!) { submitContract(input: $input) { contract { ...ContractFields } } }"
);

pub const UNLOCK_CONTRACT: &str = with_contract_fields!(
    "mutation unlockContract($input: UnlockContractInput!) { unlockContract(input: $input) { contract { ...ContractFields } } }"
);

pub const APPROVE_CONTRACT: &str = with_contract_fields!(
    "mutation approveContract($input: ApproveContractInput!) { approveContract(input: $input) { contract { ...ContractFields } } }"
);

pub const WITHDRAW_CONTRACT: &str = with_contract_fields!(
    "mutation withdrawContract($input: WithdrawContractInput!) { withdrawContract(input: $input) { contract { ...ContractFields } } }"
);

pub const UNDO_WITHDRAW_CONTRACT: &str = with_contract_fields!(
    "mutation undoWithdrawContract($input: UndoWithdrawContractInput!) { undoWithdrawContract(input: $input) { contract { ...ContractFields } } }"
);
