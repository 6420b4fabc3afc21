use kyc_governance::GovernanceError;
use kyc_store::StoreError;
use kyc_types::{Address, AddressError, CoinsError, MembershipType};
use thiserror::Error;

/// Every way a command or query can fail.
///
/// All variants are terminal for the command: nothing has been written when
/// one is returned, and nothing is retried.
#[derive(Debug, Error)]
pub enum KeeperError {
    #[error("invalid government address: {got}")]
    Unauthorized { got: Address },

    #[error("tsp {candidate} has no membership")]
    NoMembership { candidate: Address },

    #[error("membership of tsp {candidate} is {got} but must be {want}")]
    WrongTier {
        candidate: Address,
        got: MembershipType,
        want: MembershipType,
    },

    #[error("malformed {field} address {value:?}: {source}")]
    MalformedAddress {
        field: &'static str,
        value: String,
        #[source]
        source: AddressError,
    },

    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] CoinsError),

    #[error("deposit into liquidity pool failed: {cause}")]
    DepositFailed {
        #[source]
        cause: StoreError,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("invalid genesis: {0}")]
    Genesis(String),

    #[error("config error: {0}")]
    Config(String),
}

impl KeeperError {
    /// Stable machine-readable name of the failed precondition.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::NoMembership { .. } => "no_membership",
            Self::WrongTier { .. } => "wrong_tier",
            Self::MalformedAddress { .. } => "malformed_address",
            Self::InvalidAmount(_) => "invalid_amount",
            Self::DepositFailed { .. } => "deposit_failed",
            Self::Store(_) => "store",
            Self::Genesis(_) => "genesis",
            Self::Config(_) => "config",
        }
    }
}

impl From<GovernanceError> for KeeperError {
    fn from(e: GovernanceError) -> Self {
        match e {
            GovernanceError::Unauthorized { got } => Self::Unauthorized { got },
            GovernanceError::Store(e) => Self::Store(e),
        }
    }
}
