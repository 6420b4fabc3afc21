//! Nullable bank: in-memory spendable balances and the liquidity pool account.

use kyc_store::{PoolLedger, StoreError};
use kyc_types::{Address, Coins};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct BankState {
    balances: HashMap<Address, Coins>,
    frozen: HashSet<Address>,
    pool: Coins,
}

/// An in-memory pool ledger.
///
/// All balances live under one lock so a deposit either moves the full
/// amount or leaves everything untouched.
#[derive(Default)]
pub struct NullBank {
    state: Mutex<BankState>,
}

impl NullBank {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, BankState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add `amount` to `owner`'s spendable balance.
    pub fn credit(&self, owner: Address, amount: &Coins) -> Result<(), StoreError> {
        let mut state = self.state();
        let current = state.balances.get(&owner).cloned().unwrap_or_default();
        let next = current
            .checked_add(amount)
            .map_err(|e| StoreError::Overflow(e.to_string()))?;
        state.balances.insert(owner, next);
        Ok(())
    }

    /// Seed the pool balance directly (genesis import).
    pub fn set_pool(&self, amount: Coins) {
        self.state().pool = amount;
    }

    pub fn freeze(&self, owner: Address) {
        self.state().frozen.insert(owner);
    }

    pub fn unfreeze(&self, owner: &Address) {
        self.state().frozen.remove(owner);
    }

    pub fn balance_of(&self, owner: &Address) -> Coins {
        self.state().balances.get(owner).cloned().unwrap_or_default()
    }

    /// All non-empty spendable balances, in owner order.
    pub fn balances(&self) -> Vec<(Address, Coins)> {
        let mut all: Vec<_> = self
            .state()
            .balances
            .iter()
            .filter(|(_, c)| !c.is_zero())
            .map(|(a, c)| (*a, c.clone()))
            .collect();
        all.sort_by_key(|(a, _)| *a);
        all
    }
}

impl PoolLedger for NullBank {
    fn deposit_into_pool(
        &self,
        depositor: &Address,
        amount: &Coins,
    ) -> Result<Coins, StoreError> {
        let mut state = self.state();
        if state.frozen.contains(depositor) {
            return Err(StoreError::AccountFrozen(depositor.to_string()));
        }

        let balance = state.balances.get(depositor).cloned().unwrap_or_default();
        let remaining = match balance.checked_sub(amount) {
            Some(r) => r,
            None => {
                let (denom, needed) = amount
                    .iter()
                    .find(|(denom, needed)| balance.amount_of(denom) < *needed)
                    .map(|(d, n)| (d.to_string(), n))
                    .unwrap_or_default();
                return Err(StoreError::InsufficientFunds {
                    available: balance.amount_of(&denom),
                    denom,
                    needed,
                });
            }
        };
        let pool = state
            .pool
            .checked_add(amount)
            .map_err(|e| StoreError::Overflow(e.to_string()))?;

        state.balances.insert(*depositor, remaining);
        state.pool = pool.clone();
        Ok(pool)
    }

    fn liquidity_pool_amount(&self) -> Result<Coins, StoreError> {
        Ok(self.state().pool.clone())
    }
}
