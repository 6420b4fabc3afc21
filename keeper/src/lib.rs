//! Trusted service provider registry and liquidity pool for the KYC core.
//!
//! Control flow for every inbound command:
//!
//! ```text
//! MsgServer ─decode addresses─→ GovernanceGuard ─→ MembershipStore
//!     │                              (AddTsp / RemoveTsp)   (AddTsp)
//!     ├──→ TspRegistry ──────────────→ TspStore
//!     └──→ LiquidityPoolAccountant ──→ PoolLedger
//!                    │
//!                    └──→ EventBus (after the state change)
//! ```
//!
//! Commands are applied one at a time: every mutating entry point takes
//! `&mut self`, and every precondition is checked before the first write.

pub mod config;
pub mod error;
pub mod event;
pub mod genesis;
pub mod msg;
pub mod msg_server;
pub mod pool;
pub mod registry;

pub use config::KeeperConfig;
pub use error::KeeperError;
pub use event::{EventBus, KycEvent, MODULE_NAME};
pub use genesis::GenesisState;
pub use msg::{
    DepositAccepted, Msg, MsgResponse, Query, QueryResponse, TspAdded, TspRemoved,
};
pub use msg_server::{KeeperStores, MsgServer};
pub use pool::LiquidityPoolAccountant;
pub use registry::TspRegistry;
