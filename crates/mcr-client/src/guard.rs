//! One in-flight mutation per contract.
//!
//! A guard is taken before a mutation is sent and released when it is
//! dropped, whether the request finished, failed, or the future was
//! abandoned.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use mcr_core::ContractId;

/// Set of contracts with a mutation in flight. Cheap to clone; clones share
/// the same set.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    active: Arc<Mutex<HashSet<ContractId>>>,
}

/// Held while a mutation for `contract_id` is outstanding.
#[derive(Debug)]
pub struct InFlightGuard {
    active: Arc<Mutex<HashSet<ContractId>>>,
    contract_id: ContractId,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `contract_id`, or `None` if it is already claimed.
    pub fn try_acquire(&self, contract_id: ContractId) -> Option<InFlightGuard> {
        let mut active = self.active.lock();
        if !active.insert(contract_id) {
            return None;
        }
        Some(InFlightGuard {
            active: Arc::clone(&self.active),
            contract_id,
        })
    }

    pub fn is_active(&self, contract_id: &ContractId) -> bool {
        self.active.lock().contains(contract_id)
    }
}

impl InFlightGuard {
    pub fn contract_id(&self) -> ContractId {
        self.contract_id
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active.lock().remove(&self.contract_id);
    }
}
