//! Trusted service provider set storage.

use crate::StoreError;
use kyc_types::Address;

/// The set of addresses trusted to accredit.
///
/// Insert and remove are idempotent; the returned flag reports whether the
/// set actually changed.
pub trait TspStore {
    fn insert_tsp(&self, tsp: &Address) -> Result<bool, StoreError>;

    fn remove_tsp(&self, tsp: &Address) -> Result<bool, StoreError>;

    fn is_tsp(&self, address: &Address) -> Result<bool, StoreError>;

    /// All trusted service providers, in address order.
    fn list_tsps(&self) -> Result<Vec<Address>, StoreError>;
}
