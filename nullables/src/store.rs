//! Nullable store: thread-safe in-memory governance, membership and TSP state.

use kyc_store::{GovernanceStore, MembershipStore, StoreError, TspStore};
use kyc_types::{Address, Membership, MembershipType};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// An in-memory state store for testing.
/// Thread-safe so it can sit behind `Arc<dyn Trait + Send + Sync>`.
pub struct NullStore {
    government: Mutex<Address>,
    memberships: Mutex<HashMap<Address, Membership>>,
    tsps: Mutex<BTreeSet<Address>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl NullStore {
    /// A store whose governance authority is `government`, with no
    /// memberships and an empty TSP set.
    pub fn new(government: Address) -> Self {
        Self {
            government: Mutex::new(government),
            memberships: Mutex::new(HashMap::new()),
            tsps: Mutex::new(BTreeSet::new()),
        }
    }

    /// Transfer the governance authority.
    pub fn set_government(&self, government: Address) {
        *lock(&self.government) = government;
    }

    /// Assign (or reassign) a membership tier.
    pub fn set_membership(&self, owner: Address, membership_type: MembershipType) {
        lock(&self.memberships).insert(owner, Membership::new(owner, membership_type));
    }

    pub fn remove_membership(&self, owner: &Address) -> Option<Membership> {
        lock(&self.memberships).remove(owner)
    }

    /// All memberships, in owner order.
    pub fn memberships(&self) -> Vec<Membership> {
        let mut all: Vec<_> = lock(&self.memberships).values().cloned().collect();
        all.sort_by_key(|m| m.owner);
        all
    }
}

impl GovernanceStore for NullStore {
    fn government_address(&self) -> Result<Address, StoreError> {
        Ok(*lock(&self.government))
    }
}

impl MembershipStore for NullStore {
    fn get_membership(&self, owner: &Address) -> Result<Membership, StoreError> {
        lock(&self.memberships)
            .get(owner)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(owner.to_string()))
    }
}

impl TspStore for NullStore {
    fn insert_tsp(&self, tsp: &Address) -> Result<bool, StoreError> {
        Ok(lock(&self.tsps).insert(*tsp))
    }

    fn remove_tsp(&self, tsp: &Address) -> Result<bool, StoreError> {
        Ok(lock(&self.tsps).remove(tsp))
    }

    fn is_tsp(&self, address: &Address) -> Result<bool, StoreError> {
        Ok(lock(&self.tsps).contains(address))
    }

    fn list_tsps(&self) -> Result<Vec<Address>, StoreError> {
        Ok(lock(&self.tsps).iter().copied().collect())
    }
}
