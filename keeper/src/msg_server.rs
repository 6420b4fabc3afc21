//! Command dispatcher: decodes inbound commands, routes them, and surfaces
//! outcomes unchanged.

use crate::error::KeeperError;
use crate::event::{EventBus, KycEvent};
use crate::genesis::GenesisState;
use crate::msg::{DepositAccepted, Msg, MsgResponse, Query, QueryResponse, TspAdded, TspRemoved};
use crate::pool::LiquidityPoolAccountant;
use crate::registry::TspRegistry;
use kyc_governance::GovernanceGuard;
use kyc_store::{GovernanceStore, MembershipStore, PoolLedger, TspStore};
use kyc_types::{Address, Coin};
use std::sync::Arc;
use tracing::info_span;

/// Host collaborators the keeper is wired to.
#[derive(Clone)]
pub struct KeeperStores {
    pub governance: Arc<dyn GovernanceStore + Send + Sync>,
    pub memberships: Arc<dyn MembershipStore + Send + Sync>,
    pub tsps: Arc<dyn TspStore + Send + Sync>,
    pub pool: Arc<dyn PoolLedger + Send + Sync>,
}

impl KeeperStores {
    /// Wire every collaborator from one state store and one pool ledger.
    pub fn new<S, P>(state: Arc<S>, ledger: Arc<P>) -> Self
    where
        S: GovernanceStore + MembershipStore + TspStore + Send + Sync + 'static,
        P: PoolLedger + Send + Sync + 'static,
    {
        Self {
            governance: state.clone(),
            memberships: state.clone(),
            tsps: state,
            pool: ledger,
        }
    }
}

/// Decode a caller-supplied address, failing closed.
fn decode_field(field: &'static str, value: &str) -> Result<Address, KeeperError> {
    Address::decode(value).map_err(|source| KeeperError::MalformedAddress {
        field,
        value: value.to_string(),
        source,
    })
}

/// Stateless routing over the registry and the pool accountant.
///
/// Every entry point that can change state takes `&mut self`, so commands
/// are applied strictly one after another.
pub struct MsgServer {
    registry: TspRegistry,
    pool: LiquidityPoolAccountant,
    events: EventBus,
}

impl MsgServer {
    pub fn new(stores: KeeperStores) -> Self {
        let guard = GovernanceGuard::new(stores.governance);
        Self {
            registry: TspRegistry::new(guard, stores.memberships, stores.tsps),
            pool: LiquidityPoolAccountant::new(stores.pool),
            events: EventBus::new(),
        }
    }

    /// Register an event listener. Listeners see events only for commands
    /// that succeeded.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&KycEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    /// Decode, route and apply one command.
    pub fn handle(&mut self, msg: Msg) -> Result<MsgResponse, KeeperError> {
        let kind = msg.kind();
        let _span = info_span!("msg", kind = %kind, signer = %msg.signer()).entered();

        let result = match msg {
            Msg::AddTsp { government, tsp } => {
                self.add_tsp(&government, &tsp).map(MsgResponse::AddTsp)
            }
            Msg::RemoveTsp { government, tsp } => {
                self.remove_tsp(&government, &tsp).map(MsgResponse::RemoveTsp)
            }
            Msg::DepositIntoLiquidityPool { depositor, amount } => self
                .deposit_into_liquidity_pool(&depositor, amount)
                .map(MsgResponse::DepositIntoLiquidityPool),
        };
        if let Err(e) = &result {
            tracing::warn!(error = %e, reason = e.kind(), "command rejected");
        }
        result
    }

    pub fn add_tsp(&mut self, government: &str, tsp: &str) -> Result<TspAdded, KeeperError> {
        let government = decode_field("government", government)?;
        let tsp = decode_field("tsp", tsp)?;
        self.registry.add_tsp(&government, &tsp, &self.events)
    }

    pub fn remove_tsp(&mut self, government: &str, tsp: &str) -> Result<TspRemoved, KeeperError> {
        let government = decode_field("government", government)?;
        let tsp = decode_field("tsp", tsp)?;
        self.registry.remove_tsp(&government, &tsp, &self.events)
    }

    pub fn deposit_into_liquidity_pool(
        &mut self,
        depositor: &str,
        amount: Vec<Coin>,
    ) -> Result<DepositAccepted, KeeperError> {
        let depositor = decode_field("depositor", depositor)?;
        self.pool.deposit(&depositor, amount, &self.events)
    }

    /// Answer a read-only request.
    pub fn query(&self, query: Query) -> Result<QueryResponse, KeeperError> {
        match query {
            Query::TrustedServiceProviders => Ok(QueryResponse::TrustedServiceProviders {
                tsps: self.registry.trusted_service_providers()?,
            }),
            Query::IsTrustedServiceProvider { address } => {
                let address = decode_field("address", &address)?;
                Ok(QueryResponse::IsTrustedServiceProvider {
                    trusted: self.registry.is_trusted_service_provider(&address)?,
                    address,
                })
            }
            Query::LiquidityPoolAmount => Ok(QueryResponse::LiquidityPoolAmount {
                amount: self.pool.liquidity_pool_amount()?,
            }),
            Query::Government => Ok(QueryResponse::Government {
                address: self.registry.government()?,
            }),
        }
    }

    /// Import the TSP set, after checking the genesis against host state.
    ///
    /// Fails without writing anything if the genesis is invalid, names a
    /// different governance authority, or disagrees with the pool ledger.
    pub fn init_genesis(&mut self, genesis: &GenesisState) -> Result<(), KeeperError> {
        genesis.validate()?;

        let government = self.registry.government()?;
        if government != genesis.government {
            return Err(KeeperError::Genesis(format!(
                "genesis government {} does not match host authority {government}",
                genesis.government
            )));
        }
        let pool = self.pool.liquidity_pool_amount()?;
        if pool != genesis.liquidity_pool_amount {
            return Err(KeeperError::Genesis(format!(
                "genesis pool {} does not match ledger pool {pool}",
                genesis.liquidity_pool_amount
            )));
        }

        for tsp in &genesis.trusted_service_providers {
            self.registry.import(tsp)?;
        }
        tracing::info!(
            tsps = genesis.trusted_service_providers.len(),
            pool = %pool,
            "genesis imported"
        );
        Ok(())
    }

    pub fn export_genesis(&self) -> Result<GenesisState, KeeperError> {
        Ok(GenesisState {
            government: self.registry.government()?,
            trusted_service_providers: self.registry.trusted_service_providers()?,
            liquidity_pool_amount: self.pool.liquidity_pool_amount()?,
        })
    }
}
