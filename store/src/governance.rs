//! Governance authority trait.

use crate::StoreError;
use kyc_types::Address;

/// Read access to the registered governance authority.
pub trait GovernanceStore {
    /// The single address currently empowered to manage trusted service providers.
    fn government_address(&self) -> Result<Address, StoreError>;
}
