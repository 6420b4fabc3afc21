//! Domain events emitted after a command has been applied.

use kyc_types::{Address, Coins};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Module name attached to every event.
pub const MODULE_NAME: &str = "kyc";

/// Events that downstream indexers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KycEvent {
    /// An address was added to the TSP set (or was already present).
    TspAdded { government: Address, tsp: Address },
    /// An address was removed from the TSP set (or was already absent).
    TspRemoved { government: Address, tsp: Address },
    /// Coins were moved from a depositor into the liquidity pool.
    LiquidityPoolDeposit { depositor: Address, amount: Coins },
}

impl KycEvent {
    /// Event type name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TspAdded { .. } => "add_tsp",
            Self::TspRemoved { .. } => "remove_tsp",
            Self::LiquidityPoolDeposit { .. } => "deposit_into_liquidity_pool",
        }
    }

    /// The address the action is attributed to.
    pub fn sender(&self) -> &Address {
        match self {
            Self::TspAdded { government, .. } | Self::TspRemoved { government, .. } => government,
            Self::LiquidityPoolDeposit { depositor, .. } => depositor,
        }
    }

    /// Flat key/value attributes, `module` and `sender` first.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            ("module", MODULE_NAME.to_string()),
            ("sender", self.sender().to_string()),
        ];
        match self {
            Self::TspAdded { tsp, .. } | Self::TspRemoved { tsp, .. } => {
                attrs.push(("tsp", tsp.to_string()));
            }
            Self::LiquidityPoolDeposit { amount, .. } => {
                attrs.push(("amount", amount.to_string()));
            }
        }
        attrs
    }
}

/// Synchronous fan-out event bus.
///
/// Listeners are invoked inline on the emitting thread, in subscription
/// order. A panicking listener is logged and skipped; it never fails the
/// command that emitted the event nor starves later listeners.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&KycEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&KycEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &KycEvent) {
        tracing::debug!(kind = event.kind(), sender = %event.sender(), "emitting event");
        for (idx, listener) in self.listeners.iter().enumerate() {
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                tracing::error!(kind = event.kind(), listener = idx, "event listener panicked");
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    };

    fn addr(n: u8) -> Address {
        Address::from_bytes([n; 32])
    }

    fn added() -> KycEvent {
        KycEvent::TspAdded {
            government: addr(1),
            tsp: addr(2),
        }
    }

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));

        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        bus.emit(&added());
        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        EventBus::default().emit(&added());
    }

    #[test]
    fn panicking_listener_does_not_stop_others() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(|_| panic!("indexer down")));
        let s = Arc::clone(&seen);
        bus.subscribe(Box::new(move |e| s.lock().unwrap().push(e.clone())));

        bus.emit(&added());
        assert_eq!(*seen.lock().unwrap(), vec![added()]);
    }

    #[test]
    fn attributes_attribute_the_sender() {
        let attrs = added().attributes();
        assert_eq!(attrs[0], ("module", "kyc".to_string()));
        assert_eq!(attrs[1], ("sender", addr(1).to_string()));
        assert_eq!(attrs[2], ("tsp", addr(2).to_string()));
    }

    #[test]
    fn deposit_event_carries_amount() {
        let event = KycEvent::LiquidityPoolDeposit {
            depositor: addr(3),
            amount: Coins::single("tokenx", 100).unwrap(),
        };
        assert_eq!(event.kind(), "deposit_into_liquidity_pool");
        assert_eq!(event.sender(), &addr(3));
        assert_eq!(event.attributes()[2], ("amount", "100tokenx".to_string()));
    }
}
