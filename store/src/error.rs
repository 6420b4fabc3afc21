use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("key not found: {0}")]
    NotFound(String),

    #[error("insufficient funds: need {needed}{denom}, have {available}{denom}")]
    InsufficientFunds {
        denom: String,
        needed: u128,
        available: u128,
    },

    #[error("account {0} is frozen")]
    AccountFrozen(String),

    #[error("balance overflow: {0}")]
    Overflow(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}
