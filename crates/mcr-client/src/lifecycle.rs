//! # Lifecycle Actions
//!
//! The call-site wrapper around the five mutations. [`LifecycleActions::perform`]
//! checks the request locally, sends it, and turns a failure into
//! something a user can read.
//!
//! ## Failure handling
//!
//! - A request the gating table refuses never leaves the process.
//! - A second request for a contract that already has one outstanding is
//!   refused with `MutationInFlight`.
//! - A rejected request logs a warning, increments
//!   `mcr_mutation_failures_total{action, code}`, and returns the
//!   [`UserFacingError`] for it.
//!
//! The caller's contract is never modified. On success the contract the
//! service returned is handed back; on failure the caller keeps what it had.

use mcr_state::{Action, Contract, FeatureFlags, LifecycleError, TransitionEvidence};

use crate::client::ReviewClient;
use crate::error::ClientError;
use crate::guard::InFlight;
use crate::messages::UserFacingError;

/// A failed lifecycle request.
#[derive(Debug, thiserror::Error)]
#[error("{action} failed: {user}")]
pub struct ActionError {
    pub action: Action,
    /// What to show the user.
    pub user: UserFacingError,
    #[source]
    pub cause: ClientError,
}

/// Gated, single-flight lifecycle mutations.
#[derive(Debug, Clone)]
pub struct LifecycleActions {
    client: ReviewClient,
    in_flight: InFlight,
    flags: FeatureFlags,
}

impl LifecycleActions {
    pub fn new(client: ReviewClient, flags: FeatureFlags) -> Self {
        Self {
            client,
            in_flight: InFlight::new(),
            flags,
        }
    }

    pub fn client(&self) -> &ReviewClient {
        &self.client
    }

    pub fn flags(&self) -> &FeatureFlags {
        &self.flags
    }

    /// Whether a mutation for `contract` is outstanding.
    pub fn is_in_flight(&self, contract: &Contract) -> bool {
        self.in_flight.is_active(&contract.id)
    }

    /// Perform `action` on `contract` as the actor described by `evidence`.
    pub async fn perform(
        &self,
        contract: &Contract,
        action: Action,
        evidence: &TransitionEvidence,
    ) -> Result<Contract, ActionError> {
        match self.send(contract, action, evidence).await {
            Ok(updated) => {
                tracing::info!(
                    contract_id = %contract.id,
                    action = %action,
                    from = %contract.consolidated_status(),
                    to = %updated.consolidated_status(),
                    "lifecycle action accepted"
                );
                Ok(updated)
            }
            Err(cause) => Err(self.fail(contract, action, cause)),
        }
    }

    async fn send(
        &self,
        contract: &Contract,
        action: Action,
        evidence: &TransitionEvidence,
    ) -> Result<Contract, ClientError> {
        contract.check(action, evidence, &self.flags)?;
        let _guard = self
            .in_flight
            .try_acquire(contract.id)
            .ok_or(ClientError::MutationInFlight {
                contract_id: contract.id,
            })?;

        let id = contract.id;
        let reason = evidence.trimmed_reason();
        match action {
            Action::Submit | Action::Resubmit => self.client.submit(id, reason).await,
            Action::Unlock => self.client.unlock(id, reason.unwrap_or_default()).await,
            Action::Approve => {
                let date = evidence
                    .release_date
                    .ok_or(LifecycleError::ReleaseDateRequired)?;
                self.client.approve(id, date).await
            }
            Action::Withdraw => self.client.withdraw(id, reason.unwrap_or_default()).await,
            Action::UndoWithdraw => {
                self.client
                    .undo_withdraw(id, reason.unwrap_or_default())
                    .await
            }
            Action::View | Action::Edit => Err(LifecycleError::NotATransition { action }.into()),
        }
    }

    fn fail(&self, contract: &Contract, action: Action, cause: ClientError) -> ActionError {
        let user = UserFacingError::from(&cause);
        let code = user.code.clone().unwrap_or_else(|| "LOCAL".to_string());
        tracing::warn!(
            contract_id = %contract.id,
            action = %action,
            code = %code,
            error = %cause,
            "lifecycle action failed"
        );
        metrics::counter!(
            "mcr_mutation_failures_total",
            "action" => action.as_str(),
            "code" => code
        )
        .increment(1);
        ActionError {
            action,
            user,
            cause,
        }
    }
}
