//! Liquidity pool ledger primitives.

use crate::StoreError;
use kyc_types::{Address, Coins};

/// Ledger primitives backing the module-owned liquidity pool.
pub trait PoolLedger {
    /// Move `amount` from the depositor's spendable balance into the pool
    /// and return the pool balance after the move.
    ///
    /// Atomic: on error no balance has changed.
    fn deposit_into_pool(&self, depositor: &Address, amount: &Coins)
        -> Result<Coins, StoreError>;

    /// Current pool balance.
    fn liquidity_pool_amount(&self) -> Result<Coins, StoreError>;
}
