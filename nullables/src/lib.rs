//! Nullable infrastructure for deterministic testing.
//!
//! Every host-ledger collaborator (governance authority, membership oracle,
//! TSP set, pool ledger) is abstracted behind a `kyc-store` trait. This crate
//! provides in-memory implementations that:
//! - Are seeded and inspected programmatically
//! - Never touch the filesystem or network
//! - Apply each write under a single lock, so a failed write changes nothing
//!
//! Usage: swap the host state store for nullables in tests and in the daemon.

pub mod bank;
pub mod store;

pub use bank::NullBank;
pub use store::NullStore;
