//! Inbound commands, queries and their responses.
//!
//! Address fields arrive as raw strings exactly as the caller supplied them;
//! the [`MsgServer`](crate::MsgServer) decodes them before doing anything else.

use kyc_types::{Address, Coin, Coins};
use serde::{Deserialize, Serialize};

/// A state-changing command, already authenticated by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Msg {
    AddTsp {
        government: String,
        tsp: String,
    },
    RemoveTsp {
        government: String,
        tsp: String,
    },
    DepositIntoLiquidityPool {
        depositor: String,
        amount: Vec<Coin>,
    },
}

impl Msg {
    /// Command name, as used in logs and events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddTsp { .. } => "add_tsp",
            Self::RemoveTsp { .. } => "remove_tsp",
            Self::DepositIntoLiquidityPool { .. } => "deposit_into_liquidity_pool",
        }
    }

    /// The raw address of the party the command is attributed to.
    pub fn signer(&self) -> &str {
        match self {
            Self::AddTsp { government, .. } | Self::RemoveTsp { government, .. } => government,
            Self::DepositIntoLiquidityPool { depositor, .. } => depositor,
        }
    }
}

/// Confirmation that an address is in the TSP set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TspAdded {
    pub tsp: Address,
}

/// Confirmation that an address is not in the TSP set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TspRemoved {
    pub tsp: Address,
}

/// Confirmation of a deposit, with the pool total after it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositAccepted {
    pub amount_pool: Coins,
}

/// Successful outcome of a [`Msg`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MsgResponse {
    AddTsp(TspAdded),
    RemoveTsp(TspRemoved),
    DepositIntoLiquidityPool(DepositAccepted),
}

/// Read-only requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    TrustedServiceProviders,
    IsTrustedServiceProvider { address: String },
    LiquidityPoolAmount,
    Government,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryResponse {
    TrustedServiceProviders { tsps: Vec<Address> },
    IsTrustedServiceProvider { address: Address, trusted: bool },
    LiquidityPoolAmount { amount: Coins },
    Government { address: Address },
}
