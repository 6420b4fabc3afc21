//! Membership tiers and records.
//!
//! Memberships are owned by an external oracle; this workspace only reads them.

use crate::address::Address;
use crate::error::UnknownMembershipType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trust ladder, lowest to highest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    Green,
    Bronze,
    Silver,
    Gold,
    Black,
}

impl MembershipType {
    /// The only tier eligible for promotion to trusted service provider.
    pub const ENTRY_TIER: Self = Self::Black;

    /// Every tier, lowest first.
    pub const ALL: [Self; 5] = [
        Self::Green,
        Self::Bronze,
        Self::Silver,
        Self::Gold,
        Self::Black,
    ];

    /// Whether a holder of this tier may be added as a TSP.
    pub fn is_tsp_eligible(&self) -> bool {
        *self == Self::ENTRY_TIER
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Black => "black",
        }
    }
}

impl fmt::Display for MembershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MembershipType {
    type Err = UnknownMembershipType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownMembershipType(s.to_string()))
    }
}

/// A participant's current membership.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub owner: Address,
    pub membership_type: MembershipType,
}

impl Membership {
    pub fn new(owner: Address, membership_type: MembershipType) -> Self {
        Self {
            owner,
            membership_type,
        }
    }
}
