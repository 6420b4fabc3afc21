//! The authorization gate in front of every privileged command.

use crate::error::GovernanceError;
use kyc_store::GovernanceStore;
use kyc_types::Address;
use std::sync::Arc;

/// Checks callers against the registered governance authority.
#[derive(Clone)]
pub struct GovernanceGuard {
    store: Arc<dyn GovernanceStore + Send + Sync>,
}

impl GovernanceGuard {
    pub fn new(store: Arc<dyn GovernanceStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Succeed iff `caller` is exactly the current governance authority.
    ///
    /// Pure predicate: nothing is written on either outcome.
    pub fn authorize(&self, caller: &Address) -> Result<(), GovernanceError> {
        let government = self.store.government_address()?;
        if government != *caller {
            tracing::warn!(caller = %caller, "rejected non-governance caller");
            return Err(GovernanceError::Unauthorized { got: *caller });
        }
        Ok(())
    }

    /// The current governance authority.
    pub fn government(&self) -> Result<Address, GovernanceError> {
        Ok(self.store.government_address()?)
    }
}
