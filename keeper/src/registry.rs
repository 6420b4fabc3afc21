//! Trusted service provider registry.
//!
//! Tier gating happens only at add time: a TSP whose membership later changes
//! stays in the set until governance removes it.

use crate::error::KeeperError;
use crate::event::{EventBus, KycEvent};
use crate::msg::{TspAdded, TspRemoved};
use kyc_governance::GovernanceGuard;
use kyc_store::{MembershipStore, StoreError, TspStore};
use kyc_types::{Address, MembershipType};
use std::sync::Arc;

pub struct TspRegistry {
    guard: GovernanceGuard,
    memberships: Arc<dyn MembershipStore + Send + Sync>,
    tsps: Arc<dyn TspStore + Send + Sync>,
}

impl TspRegistry {
    pub fn new(
        guard: GovernanceGuard,
        memberships: Arc<dyn MembershipStore + Send + Sync>,
        tsps: Arc<dyn TspStore + Send + Sync>,
    ) -> Self {
        Self {
            guard,
            memberships,
            tsps,
        }
    }

    /// Promote `candidate` to trusted service provider.
    ///
    /// Requires the governance authority as caller and an entry-tier
    /// membership for the candidate. Adding an existing TSP succeeds without
    /// changing the set.
    pub fn add_tsp(
        &mut self,
        government: &Address,
        candidate: &Address,
        events: &EventBus,
    ) -> Result<TspAdded, KeeperError> {
        self.guard.authorize(government)?;

        let membership = match self.memberships.get_membership(candidate) {
            Ok(m) => m,
            Err(StoreError::NotFound(_)) => {
                return Err(KeeperError::NoMembership {
                    candidate: *candidate,
                })
            }
            Err(e) => return Err(e.into()),
        };
        if !membership.membership_type.is_tsp_eligible() {
            return Err(KeeperError::WrongTier {
                candidate: *candidate,
                got: membership.membership_type,
                want: MembershipType::ENTRY_TIER,
            });
        }

        if self.tsps.insert_tsp(candidate)? {
            tracing::info!(tsp = %candidate, "trusted service provider added");
        } else {
            tracing::debug!(tsp = %candidate, "trusted service provider already present");
        }
        events.emit(&KycEvent::TspAdded {
            government: *government,
            tsp: *candidate,
        });
        Ok(TspAdded { tsp: *candidate })
    }

    /// Remove `target` from the TSP set, whatever its current tier.
    ///
    /// Removing an address that is not a TSP succeeds without changing the set.
    pub fn remove_tsp(
        &mut self,
        government: &Address,
        target: &Address,
        events: &EventBus,
    ) -> Result<TspRemoved, KeeperError> {
        self.guard.authorize(government)?;

        if self.tsps.remove_tsp(target)? {
            tracing::info!(tsp = %target, "trusted service provider removed");
        } else {
            tracing::debug!(tsp = %target, "trusted service provider already absent");
        }
        events.emit(&KycEvent::TspRemoved {
            government: *government,
            tsp: *target,
        });
        Ok(TspRemoved { tsp: *target })
    }

    /// All trusted service providers, in address order.
    pub fn trusted_service_providers(&self) -> Result<Vec<Address>, KeeperError> {
        Ok(self.tsps.list_tsps()?)
    }

    pub fn is_trusted_service_provider(&self, address: &Address) -> Result<bool, KeeperError> {
        Ok(self.tsps.is_tsp(address)?)
    }

    /// Current governance authority.
    pub fn government(&self) -> Result<Address, KeeperError> {
        Ok(self.guard.government()?)
    }

    /// Insert without authorization or tier checks. Genesis import only.
    pub(crate) fn import(&mut self, tsp: &Address) -> Result<(), KeeperError> {
        self.tsps.insert_tsp(tsp)?;
        Ok(())
    }
}
