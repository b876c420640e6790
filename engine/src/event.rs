//! Events emitted by the claim engine for subscribers.

use std::sync::RwLock;

use sigdrop_types::Address;

/// Claim-level events that observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClaimEvent {
    /// Tokens were minted and the signature consumed. `total_claimed` is the
    /// claimed total right after this claim committed, so it orders processed
    /// events by commit even when concurrent deliveries interleave.
    ClaimProcessed {
        claimant: Address,
        amount: u128,
        total_claimed: u128,
    },
    /// A claim was rejected; nothing changed.
    ClaimRejected {
        claimant: Address,
        amount: u128,
        reason: &'static str,
    },
}

type Listener = Box<dyn Fn(&ClaimEvent) + Send + Sync>;

/// Synchronous fan-out event bus for claim events.
///
/// Listeners are invoked inline on the claiming thread after the ledger lock
/// has been released; keep handlers fast.
pub struct EventBus {
    listeners: RwLock<Vec<Listener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn subscribe(&self, listener: Listener) {
        self.listeners
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(listener);
    }

    pub fn emit(&self, event: &ClaimEvent) {
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for listener in listeners.iter() {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .map(|l| l.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
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
    use std::sync::{Arc, Mutex};

    #[test]
    fn all_listeners_receive_events_in_order() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for id in 0..2 {
            let seen = Arc::clone(&seen);
            bus.subscribe(Box::new(move |e| seen.lock().unwrap().push((id, e.clone()))));
        }
        let event = ClaimEvent::ClaimProcessed {
            claimant: Address::new([1; 20]),
            amount: 2,
            total_claimed: 2,
        };
        bus.emit(&event);
        assert_eq!(bus.listener_count(), 2);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(0, event.clone()), (1, event)]
        );
    }

    #[test]
    fn emit_without_listeners_is_noop() {
        EventBus::default().emit(&ClaimEvent::ClaimRejected {
            claimant: Address::ZERO,
            amount: 0,
            reason: "test",
        });
    }
}
