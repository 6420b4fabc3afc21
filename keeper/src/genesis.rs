//! Module genesis state: import at chain start, export for upgrades.

use crate::error::KeeperError;
use kyc_types::{Address, Coins};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// State this module owns or observes at genesis.
///
/// The governance authority and the pool balance belong to the host; they
/// are recorded so an import can be checked against the host state. The TSP
/// set is owned here and is imported as-is: tiers are only checked when a
/// TSP is added by command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub government: Address,
    #[serde(default)]
    pub trusted_service_providers: Vec<Address>,
    #[serde(default)]
    pub liquidity_pool_amount: Coins,
}

impl GenesisState {
    /// A genesis with an empty TSP set and an empty pool.
    pub fn new(government: Address) -> Self {
        Self {
            government,
            trusted_service_providers: Vec::new(),
            liquidity_pool_amount: Coins::zero(),
        }
    }

    pub fn validate(&self) -> Result<(), KeeperError> {
        let mut seen = HashSet::new();
        for tsp in &self.trusted_service_providers {
            if !seen.insert(tsp) {
                return Err(KeeperError::Genesis(format!(
                    "duplicate trusted service provider {tsp}"
                )));
            }
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self, KeeperError> {
        serde_json::from_str(s).map_err(|e| KeeperError::Genesis(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String, KeeperError> {
        serde_json::to_string_pretty(self).map_err(|e| KeeperError::Genesis(e.to_string()))
    }
}
