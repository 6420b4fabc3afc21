//! Governance guard for the KYC core.
//!
//! Exactly one address, the governance authority, may manage trusted service
//! providers. The authority is host state: it is read fresh for every
//! command so an authority transfer takes effect immediately. There is no
//! hierarchy and no delegation.

pub mod error;
pub mod guard;

pub use error::GovernanceError;
pub use guard::GovernanceGuard;
