//! Membership oracle trait.

use crate::StoreError;
use kyc_types::{Address, Membership};

/// Read access to participants' membership tiers.
pub trait MembershipStore {
    /// Current membership of `owner`, or [`StoreError::NotFound`].
    fn get_membership(&self, owner: &Address) -> Result<Membership, StoreError>;
}
