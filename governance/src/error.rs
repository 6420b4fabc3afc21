use kyc_store::StoreError;
use kyc_types::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("invalid government address: {got}")]
    Unauthorized { got: Address },

    #[error("cannot read governance authority: {0}")]
    Store(#[from] StoreError),
}
