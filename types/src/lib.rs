//! Fundamental types for the KYC trust and liquidity pool core.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! participant addresses, coin amounts, and membership tiers.

pub mod address;
pub mod coins;
pub mod error;
pub mod membership;

pub use address::Address;
pub use coins::{Coin, Coins};
pub use error::{AddressError, CoinsError, UnknownMembershipType};
pub use membership::{Membership, MembershipType};
