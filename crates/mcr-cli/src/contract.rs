//! # Contract Subcommand
//!
//! Lifecycle requests against the review API. Each request fetches the
//! contract first so the gating check runs against the service's current
//! view, then sends the mutation through [`LifecycleActions`].
//!
//! ## Subcommands
//!
//! - `show` — Status, permitted actions and banners for a role.
//! - `submit` / `resubmit` — State user submits (again).
//! - `unlock` — CMS returns the package to the state.
//! - `approve` — CMS approves; `--date` is the release-to-state date.
//! - `withdraw` / `undo-withdraw` — CMS withdraws or reverts a withdrawal.
//!
//! A refused request prints the user-facing copy to stderr and exits 2.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use mcr_client::{LifecycleActions, ReviewClient};
use mcr_core::{CalendarDate, ContractId, UserRole};
use mcr_state::{banners, Action, Banner, ConsolidatedStatus, Contract, TransitionEvidence};

use crate::config::Config;

/// Exit code for a request the service or the gating table refused.
pub const EXIT_REFUSED: u8 = 2;

/// Arguments for `mcr contract`.
#[derive(Args, Debug)]
pub struct ContractArgs {
    #[command(subcommand)]
    pub command: ContractCommand,
}

/// Who is acting on which contract.
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Contract id.
    #[arg(long)]
    pub id: ContractId,

    /// Role of the acting user.
    #[arg(long)]
    pub role: UserRole,

    /// Email of the acting user.
    #[arg(long, default_value = "cli@localhost")]
    pub user: String,
}

/// Inputs shared by the lifecycle mutations.
#[derive(Args, Debug, Clone)]
pub struct Request {
    #[command(flatten)]
    pub target: Target,

    /// Reason for the change. Required for everything except a first
    /// submission and an approval.
    #[arg(long)]
    pub reason: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ContractCommand {
    /// Show status, permitted actions and banners.
    Show(Target),

    /// Submit a draft (DRAFT → SUBMITTED).
    Submit(Request),

    /// Resubmit after an unlock (UNLOCKED → RESUBMITTED).
    Resubmit(Request),

    /// Return a package to the state (SUBMITTED/RESUBMITTED → UNLOCKED).
    Unlock(Request),

    /// Approve and release to the state (→ APPROVED).
    Approve {
        #[command(flatten)]
        request: Request,

        /// Date the approval was released to the state (YYYY-MM-DD).
        /// Defaults to today.
        #[arg(long)]
        date: Option<CalendarDate>,
    },

    /// Withdraw a submitted package (→ WITHDRAWN).
    Withdraw(Request),

    /// Revert a withdrawal (WITHDRAWN → SUBMITTED/RESUBMITTED).
    UndoWithdraw(Request),
}

impl ContractCommand {
    /// The lifecycle action, or `None` for `show`.
    pub fn action(&self) -> Option<Action> {
        match self {
            Self::Show(_) => None,
            Self::Submit(_) => Some(Action::Submit),
            Self::Resubmit(_) => Some(Action::Resubmit),
            Self::Unlock(_) => Some(Action::Unlock),
            Self::Approve { .. } => Some(Action::Approve),
            Self::Withdraw(_) => Some(Action::Withdraw),
            Self::UndoWithdraw(_) => Some(Action::UndoWithdraw),
        }
    }

    pub fn target(&self) -> &Target {
        match self {
            Self::Show(target) => target,
            Self::Submit(r)
            | Self::Resubmit(r)
            | Self::Unlock(r)
            | Self::Withdraw(r)
            | Self::UndoWithdraw(r) => &r.target,
            Self::Approve { request, .. } => &request.target,
        }
    }

    /// Build the evidence for a mutation.
    pub fn evidence(&self) -> TransitionEvidence {
        let target = self.target();
        let mut evidence = TransitionEvidence::new(target.role, target.user.clone());
        match self {
            Self::Show(_) => {}
            Self::Approve { request, date } => {
                evidence = evidence.with_release_date(date.unwrap_or_else(CalendarDate::today));
                if let Some(reason) = &request.reason {
                    evidence = evidence.with_reason(reason.clone());
                }
            }
            Self::Submit(r)
            | Self::Resubmit(r)
            | Self::Unlock(r)
            | Self::Withdraw(r)
            | Self::UndoWithdraw(r) => {
                if let Some(reason) = &r.reason {
                    evidence = evidence.with_reason(reason.clone());
                }
            }
        }
        evidence
    }
}

/// What `show` prints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSummary {
    pub id: ContractId,
    pub state_code: String,
    pub status: ConsolidatedStatus,
    pub allowed_actions: Vec<Action>,
    pub banners: Vec<BannerView>,
}

#[derive(Debug, Serialize)]
pub struct BannerView {
    #[serde(flatten)]
    pub banner: Banner,
    pub heading: String,
}

impl ContractSummary {
    pub fn new(contract: &Contract, role: UserRole, config: &Config) -> Self {
        Self {
            id: contract.id,
            state_code: contract.state_code.clone(),
            status: contract.consolidated_status(),
            allowed_actions: contract.allowed_actions(role, &config.flags).iter().collect(),
            banners: banners(contract, role)
                .into_iter()
                .map(|banner| BannerView {
                    heading: banner.heading(),
                    banner,
                })
                .collect(),
        }
    }
}

pub fn run_contract(args: &ContractArgs, config: &Config) -> Result<u8> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(execute(&args.command, config))
}

/// Run one contract command against the configured API. Returns the exit
/// code: 0 on success, [`EXIT_REFUSED`] when the request was refused.
pub async fn execute(command: &ContractCommand, config: &Config) -> Result<u8> {
    let client = ReviewClient::new(config.api.clone())?;
    let target = command.target();
    let contract = client
        .fetch_contract(target.id)
        .await
        .with_context(|| format!("failed to fetch contract {}", target.id))?;

    let Some(action) = command.action() else {
        let summary = ContractSummary::new(&contract, target.role, config);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(0);
    };

    let actions = LifecycleActions::new(client, config.flags);
    match actions.perform(&contract, action, &command.evidence()).await {
        Ok(updated) => {
            println!("{}", serde_json::to_string_pretty(&updated)?);
            Ok(0)
        }
        Err(err) => {
            eprintln!("{}", err.user.heading);
            eprintln!("{}", err.user.message);
            Ok(EXIT_REFUSED)
        }
    }
}
