//! Chain state file: the module genesis plus the host state it runs against.

use anyhow::Context;
use kyc_keeper::{GenesisState, KeeperStores, MsgServer};
use kyc_nullables::{NullBank, NullStore};
use kyc_types::{Address, Coins, Membership};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// A participant's spendable balance at genesis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    pub address: Address,
    pub coins: Coins,
}

/// Everything needed to stand up an in-memory chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainState {
    #[serde(flatten)]
    pub kyc: GenesisState,
    #[serde(default)]
    pub memberships: Vec<Membership>,
    #[serde(default)]
    pub accounts: Vec<GenesisAccount>,
    #[serde(default)]
    pub frozen: Vec<Address>,
}

/// A running in-memory chain.
pub struct Chain {
    pub store: Arc<NullStore>,
    pub bank: Arc<NullBank>,
    pub server: MsgServer,
    frozen: Vec<Address>,
}

impl ChainState {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading chain state {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing chain state {}", path.display()))
    }

    /// Reject host entries that would silently overwrite one another.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut owners = HashSet::new();
        for m in &self.memberships {
            anyhow::ensure!(owners.insert(m.owner), "duplicate membership for {}", m.owner);
        }
        let mut holders = HashSet::new();
        for account in &self.accounts {
            anyhow::ensure!(
                holders.insert(account.address),
                "duplicate account {}",
                account.address
            );
        }
        let mut frozen = HashSet::new();
        for address in &self.frozen {
            anyhow::ensure!(frozen.insert(*address), "duplicate frozen address {address}");
        }
        Ok(())
    }

    /// Seed host state, then import the module genesis.
    ///
    /// Nothing is seeded if the state fails [`ChainState::validate`].
    pub fn build(self) -> anyhow::Result<Chain> {
        self.validate()?;
        let store = Arc::new(NullStore::new(self.kyc.government));
        for m in &self.memberships {
            store.set_membership(m.owner, m.membership_type);
        }

        let bank = Arc::new(NullBank::new());
        for account in &self.accounts {
            bank.credit(account.address, &account.coins)?;
        }
        for address in &self.frozen {
            bank.freeze(*address);
        }
        bank.set_pool(self.kyc.liquidity_pool_amount.clone());

        let mut server = MsgServer::new(KeeperStores::new(store.clone(), bank.clone()));
        server.init_genesis(&self.kyc)?;
        Ok(Chain {
            store,
            bank,
            server,
            frozen: self.frozen,
        })
    }
}

impl Chain {
    pub fn export(&self) -> anyhow::Result<ChainState> {
        Ok(ChainState {
            kyc: self.server.export_genesis()?,
            memberships: self.store.memberships(),
            accounts: self
                .bank
                .balances()
                .into_iter()
                .map(|(address, coins)| GenesisAccount { address, coins })
                .collect(),
            frozen: self.frozen.clone(),
        })
    }
}
