//! Liquidity pool accountant.
//!
//! The pool is a single module-owned balance. Deposits are the only write
//! path here, so the balance never decreases through this type.

use crate::error::KeeperError;
use crate::event::{EventBus, KycEvent};
use crate::msg::DepositAccepted;
use kyc_store::PoolLedger;
use kyc_types::{Address, Coin, Coins};
use std::sync::Arc;

pub struct LiquidityPoolAccountant {
    ledger: Arc<dyn PoolLedger + Send + Sync>,
}

impl LiquidityPoolAccountant {
    pub fn new(ledger: Arc<dyn PoolLedger + Send + Sync>) -> Self {
        Self { ledger }
    }

    /// Move `amount` from `depositor` into the pool and return the new total.
    ///
    /// The amount is validated before the ledger is touched; a ledger
    /// failure leaves every balance unchanged and emits nothing. The new
    /// total comes from the transfer itself, so once coins have moved the
    /// command cannot fail.
    pub fn deposit(
        &mut self,
        depositor: &Address,
        amount: Vec<Coin>,
        events: &EventBus,
    ) -> Result<DepositAccepted, KeeperError> {
        let amount = Coins::try_from_coins(amount)?;

        let amount_pool = self
            .ledger
            .deposit_into_pool(depositor, &amount)
            .map_err(|cause| KeeperError::DepositFailed { cause })?;
        tracing::info!(
            depositor = %depositor,
            amount = %amount,
            pool = %amount_pool,
            "deposit into liquidity pool"
        );

        events.emit(&KycEvent::LiquidityPoolDeposit {
            depositor: *depositor,
            amount,
        });
        Ok(DepositAccepted { amount_pool })
    }

    /// Current pool balance.
    pub fn liquidity_pool_amount(&self) -> Result<Coins, KeeperError> {
        Ok(self.ledger.liquidity_pool_amount()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyc_nullables::NullBank;
    use kyc_store::StoreError;
    use kyc_types::CoinsError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Ledger that applies deposits but cannot serve balance reads.
    #[derive(Default)]
    struct WriteOnlyLedger {
        pool: Mutex<Coins>,
    }

    impl PoolLedger for WriteOnlyLedger {
        fn deposit_into_pool(&self, _: &Address, amount: &Coins) -> Result<Coins, StoreError> {
            let mut pool = self.pool.lock().unwrap();
            *pool = pool.checked_add(amount).unwrap();
            Ok(pool.clone())
        }

        fn liquidity_pool_amount(&self) -> Result<Coins, StoreError> {
            Err(StoreError::Backend("read failed".into()))
        }
    }

    fn addr(n: u8) -> Address {
        Address::from_bytes([n; 32])
    }

    fn setup(funds: u128) -> (Arc<NullBank>, LiquidityPoolAccountant) {
        let bank = Arc::new(NullBank::new());
        bank.credit(addr(1), &Coins::single("tokenx", funds).unwrap())
            .unwrap();
        (bank.clone(), LiquidityPoolAccountant::new(bank))
    }

    #[test]
    fn deposits_accumulate() {
        let (_bank, mut pool) = setup(1_000);
        let bus = EventBus::new();
        pool.deposit(&addr(1), vec![Coin::new("tokenx", 100)], &bus)
            .unwrap();
        let out = pool
            .deposit(&addr(1), vec![Coin::new("tokenx", 50)], &bus)
            .unwrap();
        assert_eq!(out.amount_pool, Coins::single("tokenx", 150).unwrap());
    }

    #[test]
    fn invalid_amount_never_reaches_ledger() {
        let (bank, mut pool) = setup(1_000);
        let err = pool
            .deposit(&addr(1), vec![Coin::new("tokenx", -5)], &EventBus::new())
            .unwrap_err();
        assert!(matches!(
            err,
            KeeperError::InvalidAmount(CoinsError::NegativeAmount { .. })
        ));
        let err = pool
            .deposit(&addr(1), vec![], &EventBus::new())
            .unwrap_err();
        assert!(matches!(err, KeeperError::InvalidAmount(CoinsError::Empty)));
        assert_eq!(bank.balance_of(&addr(1)).amount_of("tokenx"), 1_000);
    }

    #[test]
    fn insufficient_funds_is_deposit_failed() {
        let (bank, mut pool) = setup(10);
        let err = pool
            .deposit(&addr(1), vec![Coin::new("tokenx", 11)], &EventBus::new())
            .unwrap_err();
        assert!(matches!(
            err,
            KeeperError::DepositFailed {
                cause: StoreError::InsufficientFunds { .. }
            }
        ));
        assert!(pool.liquidity_pool_amount().unwrap().is_zero());
        assert_eq!(bank.balance_of(&addr(1)).amount_of("tokenx"), 10);
    }

    #[test]
    fn frozen_account_is_deposit_failed() {
        let (bank, mut pool) = setup(10);
        bank.freeze(addr(1));
        let err = pool
            .deposit(&addr(1), vec![Coin::new("tokenx", 1)], &EventBus::new())
            .unwrap_err();
        assert_eq!(err.kind(), "deposit_failed");
    }

    #[test]
    fn committed_deposit_succeeds_without_pool_read() {
        let ledger = Arc::new(WriteOnlyLedger::default());
        let mut pool = LiquidityPoolAccountant::new(ledger.clone());
        let seen = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();
        let counter = seen.clone();
        bus.subscribe(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let out = pool
            .deposit(&addr(1), vec![Coin::new("tokenx", 5)], &bus)
            .unwrap();
        assert_eq!(out.amount_pool, Coins::single("tokenx", 5).unwrap());
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(
            *ledger.pool.lock().unwrap(),
            Coins::single("tokenx", 5).unwrap()
        );
    }
}
