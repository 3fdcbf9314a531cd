//! Named publish/subscribe shared by every component of the application.
//!
//! The bus is a cheap `Clone` handle; all clones share one subscriber
//! registry. Handlers run synchronously on the emitting task, in
//! registration order, with the registry lock released.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tokio::sync::mpsc;

/// Subscribing to this name receives every event.
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub name: String,
    pub payload: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Arc<dyn Fn(&Event) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: HashMap<String, Vec<(SubscriptionId, Handler)>>,
}

#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<Mutex<Registry>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.lock();
        let handlers: usize = registry.handlers.values().map(Vec::len).sum();
        f.debug_struct("EventBus")
            .field("handlers", &handlers)
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    // A handler that panicked must not take the whole bus down with it.
    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register `handler` for events named `name` (or every event for `*`).
    pub fn on<F>(&self, name: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let mut registry = self.lock();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry
            .handlers
            .entry(name.to_string())
            .or_default()
            .push((id, Arc::new(handler)));
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn off(&self, id: SubscriptionId) -> bool {
        let mut registry = self.lock();
        let mut removed = false;
        registry.handlers.retain(|_, handlers| {
            let before = handlers.len();
            handlers.retain(|(sub, _)| *sub != id);
            removed |= handlers.len() != before;
            !handlers.is_empty()
        });
        removed
    }

    /// Deliver an event to its named subscribers, then to wildcard ones.
    ///
    /// Returns the number of handlers invoked.
    pub fn emit(&self, name: &str, payload: Value) -> usize {
        let handlers: Vec<Handler> = {
            let registry = self.lock();
            let named = registry.handlers.get(name).into_iter().flatten();
            let wildcard = if name == WILDCARD {
                None
            } else {
                registry.handlers.get(WILDCARD)
            };
            named
                .chain(wildcard.into_iter().flatten())
                .map(|(_, handler)| handler.clone())
                .collect()
        };

        let event = Event {
            name: name.to_string(),
            payload,
        };
        for handler in &handlers {
            handler(&event);
        }

        tracing::trace!(event = name, handlers = handlers.len(), "emitted");
        handlers.len()
    }

    /// Forward matching events into a channel for async consumers.
    ///
    /// The subscription lives until `off` is called with the returned id;
    /// events emitted after the receiver is dropped are discarded.
    pub fn subscribe(&self, name: &str) -> (SubscriptionId, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.on(name, move |event| {
            let _ = tx.send(event.clone());
        });
        (id, rx)
    }

    pub fn handler_count(&self, name: &str) -> usize {
        self.lock().handlers.get(name).map_or(0, Vec::len)
    }

    /// Drop every subscription.
    pub fn clear(&self) {
        self.lock().handlers.clear();
    }
}
