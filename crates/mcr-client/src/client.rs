//! # Review API Client
//!
//! One GraphQL endpoint, one query and five mutations. Every operation
//! returns the contract as the service sees it after the call.
//!
//! | Operation              | Kind     | Input fields                                   |
//! |------------------------|----------|------------------------------------------------|
//! | `fetchContract`        | query    | `contractID`                                   |
//! | `submitContract`       | mutation | `contractID`, `submittedReason`                |
//! | `unlockContract`       | mutation | `contractID`, `unlockedReason`                 |
//! | `approveContract`      | mutation | `contractID`, `dateApprovalReleasedToState`    |
//! | `withdrawContract`     | mutation | `contractID`, `updatedReason`                  |
//! | `undoWithdrawContract` | mutation | `contractID`, `updatedReason`                  |
//!
//! Only the query is retried.

use std::time::Duration;

use serde_json::{json, Value};
use url::Url;

use mcr_core::{CalendarDate, ContractId};
use mcr_state::Contract;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::graphql::{self, GraphQlRequest, GraphQlResponse};

/// Client for the review service's lifecycle API.
#[derive(Debug, Clone)]
pub struct ReviewClient {
    http: reqwest::Client,
    endpoint: Url,
    max_query_retries: u32,
}

impl ReviewClient {
    /// Build a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let endpoint = config.endpoint_url()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Http {
                operation: "client_init",
                source: e,
            })?;
        Ok(Self {
            http,
            endpoint,
            max_query_retries: config.max_query_retries,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch a contract by id.
    pub async fn fetch_contract(&self, id: ContractId) -> Result<Contract, ClientError> {
        self.call(
            "fetchContract",
            graphql::FETCH_CONTRACT,
            json!({ "input": { "contractID": id } }),
            self.max_query_retries,
        )
        .await
    }

    /// Submit or resubmit. The first submission may omit the reason.
    pub async fn submit(
        &self,
        id: ContractId,
        reason: Option<&str>,
    ) -> Result<Contract, ClientError> {
        let mut input = json!({ "contractID": id });
        if let Some(reason) = reason {
            input["submittedReason"] = Value::from(reason);
        }
        self.mutate("submitContract", graphql::SUBMIT_CONTRACT, input)
            .await
    }

    pub async fn unlock(&self, id: ContractId, reason: &str) -> Result<Contract, ClientError> {
        self.mutate(
            "unlockContract",
            graphql::UNLOCK_CONTRACT,
            json!({ "contractID": id, "unlockedReason": reason }),
        )
        .await
    }

    /// Approve and record the date the approval was released to the state.
    pub async fn approve(
        &self,
        id: ContractId,
        released_to_state: CalendarDate,
    ) -> Result<Contract, ClientError> {
        self.mutate(
            "approveContract",
            graphql::APPROVE_CONTRACT,
            json!({ "contractID": id, "dateApprovalReleasedToState": released_to_state }),
        )
        .await
    }

    pub async fn withdraw(&self, id: ContractId, reason: &str) -> Result<Contract, ClientError> {
        self.mutate(
            "withdrawContract",
            graphql::WITHDRAW_CONTRACT,
            json!({ "contractID": id, "updatedReason": reason }),
        )
        .await
    }

    pub async fn undo_withdraw(
        &self,
        id: ContractId,
        reason: &str,
    ) -> Result<Contract, ClientError> {
        self.mutate(
            "undoWithdrawContract",
            graphql::UNDO_WITHDRAW_CONTRACT,
            json!({ "contractID": id, "updatedReason": reason }),
        )
        .await
    }

    // ─── Transport ───────────────────────────────────────────────────

    async fn mutate(
        &self,
        operation: &'static str,
        document: &'static str,
        input: Value,
    ) -> Result<Contract, ClientError> {
        self.call(operation, document, json!({ "input": input }), 0)
            .await
    }

    /// POST `document`, then pull `data.<operation>.contract` out of the
    /// response.
    async fn call(
        &self,
        operation: &'static str,
        document: &'static str,
        variables: Value,
        retries: u32,
    ) -> Result<Contract, ClientError> {
        let body = GraphQlRequest {
            query: document,
            variables,
        };
        tracing::debug!(operation, endpoint = %self.endpoint, "review API request");

        let resp = crate::retry::retry_send(retries, || {
            self.http.post(self.endpoint.clone()).json(&body).send()
        })
        .await
        .map_err(|e| ClientError::Http {
            operation,
            source: e,
        })?;

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|e| ClientError::Http {
            operation,
            source: e,
        })?;

        // Error statuses often still carry a GraphQL `errors` array, which
        // is more useful than the status alone.
        let parsed = serde_json::from_slice::<GraphQlResponse>(&bytes);
        if !status.is_success() {
            return Err(match parsed {
                Ok(r) if !r.errors.is_empty() => ClientError::GraphQl {
                    operation,
                    errors: r.errors,
                },
                _ => ClientError::Status {
                    operation,
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&bytes).into_owned(),
                },
            });
        }

        let resp = parsed.map_err(|e| ClientError::Deserialization {
            operation,
            source: e,
        })?;
        if !resp.errors.is_empty() {
            return Err(ClientError::GraphQl {
                operation,
                errors: resp.errors,
            });
        }

        let contract = resp
            .data
            .and_then(|mut data| data.get_mut(operation).map(Value::take))
            .and_then(|mut payload| payload.get_mut("contract").map(Value::take))
            .filter(|c| !c.is_null())
            .ok_or(ClientError::MissingData { operation })?;

        serde_json::from_value(contract).map_err(|e| ClientError::Deserialization {
            operation,
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg = ClientConfig {
            timeout_secs: 0,
            ..ClientConfig::default()
        };
        assert!(matches!(
            ReviewClient::new(cfg),
            Err(ClientError::Config(ConfigError::ZeroTimeout))
        ));
    }

    #[test]
    fn too_many_retries_are_rejected() {
        let cfg = ClientConfig {
            max_query_retries: u32::MAX,
            ..ClientConfig::default()
        };
        assert!(matches!(
            ReviewClient::new(cfg),
            Err(ClientError::Config(ConfigError::TooManyRetries { .. }))
        ));
    }

    #[test]
    fn bad_endpoint_is_rejected() {
        let err = ReviewClient::new(ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Config(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn endpoint_is_kept() {
        let client = ReviewClient::new(ClientConfig::new("https://api.example.gov/graphql")).unwrap();
        assert_eq!(client.endpoint().as_str(), "https://api.example.gov/graphql");
    }
}
