//! Storage and collaborator traits for the KYC core.
//!
//! The governance authority, membership oracle and pool ledger are owned by
//! the host ledger; the TSP set is owned by this core. Every backend (the
//! host's state store, in-memory for testing) implements these traits. The
//! rest of the workspace depends only on the traits.

pub mod error;
pub mod governance;
pub mod membership;
pub mod pool;
pub mod tsp;

pub use error::StoreError;
pub use governance::GovernanceStore;
pub use membership::MembershipStore;
pub use pool::PoolLedger;
pub use tsp::TspStore;
