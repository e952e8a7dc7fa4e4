//! Minimal synchronous publish mechanism

use std::sync::Arc;

use parking_lot::RwLock;

use crate::event::NavigationEvent;

type Subscriber = Box<dyn Fn(&NavigationEvent) + Send + Sync>;

/// In-process event bus for navigation lifecycle notifications.
///
/// Delivery is synchronous and ordered by emission order; there is no
/// persistence or replay. Subscribers registered while an emission is
/// in progress see only later events.
#[derive(Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, subscriber: F)
    where
        F: Fn(&NavigationEvent) + Send + Sync + 'static,
    {
        self.subscribers.write().push(Box::new(subscriber));
    }

    pub fn emit(&self, event: NavigationEvent) {
        tracing::trace!(?event, "Emitting navigation event");
        for subscriber in self.subscribers.read().iter() {
            subscriber(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}
