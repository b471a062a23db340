//! In-process publish/subscribe channel for game events.
//!
//! RULE: observers run synchronously, in registration order, on the thread
//! applying the input, in the middle of arrow resolution. They receive the
//! event only, never the engine, so they cannot re-enter the dispatcher.

use crate::event::{EventKind, GameEvent};
use std::collections::BTreeMap;

/// Handle returned by registration, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

pub type Observer = Box<dyn FnMut(&GameEvent)>;

#[derive(Default)]
pub struct EventEmitter {
    next_id:   u64,
    observers: BTreeMap<EventKind, Vec<(SubscriptionId, Observer)>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observer for `kind`.
    pub fn register(&mut self, kind: EventKind, observer: Observer) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.observers.entry(kind).or_default().push((id, observer));
        id
    }

    pub fn on_damage<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.register(EventKind::Damage, Box::new(observer))
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unregister(&mut self, id: SubscriptionId) -> bool {
        for list in self.observers.values_mut() {
            if let Some(idx) = list.iter().position(|(sub, _)| *sub == id) {
                list.remove(idx);
                return true;
            }
        }
        false
    }

    pub fn observer_count(&self, kind: EventKind) -> usize {
        self.observers.get(&kind).map_or(0, Vec::len)
    }

    pub fn emit(&mut self, event: &GameEvent) {
        if let Some(list) = self.observers.get_mut(&event.kind()) {
            for (_, observer) in list.iter_mut() {
                observer(event);
            }
        }
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: BTreeMap<_, _> = self
            .observers
            .iter()
            .map(|(kind, list)| (*kind, list.len()))
            .collect();
        f.debug_struct("EventEmitter").field("observers", &counts).finish()
    }
}
