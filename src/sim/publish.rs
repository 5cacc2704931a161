//! State publication for the UI
//!
//! Each published value is a small "watch" cell: it keeps the latest value for
//! polling and pushes to subscribers whenever the value actually changes. New
//! subscribers are fed the current value straight away.

use super::state::{PlayerKind, PopulationCounts};

/// Handle returned by `subscribe_*`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

/// Latest value plus change listeners
pub struct Watch<T> {
    value: T,
    subscribers: Vec<(SubscriptionId, Callback<T>)>,
}

impl<T: Clone + PartialEq> Watch<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Store `value`; notify only if it differs. Returns true on change.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        for (_, callback) in &mut self.subscribers {
            callback(&self.value);
        }
        true
    }

    fn subscribe(&mut self, id: SubscriptionId, mut callback: Callback<T>) {
        callback(&self.value);
        self.subscribers.push((id, callback));
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }
}

/// Counts, winner and paused flag, observable by the front-end
pub struct StatePublisher {
    counts: Watch<PopulationCounts>,
    winner: Watch<Option<PlayerKind>>,
    paused: Watch<bool>,
    next_id: u64,
}

impl Default for StatePublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl StatePublisher {
    pub fn new() -> Self {
        Self {
            counts: Watch::new(PopulationCounts::default()),
            winner: Watch::new(None),
            paused: Watch::new(false),
            next_id: 1,
        }
    }

    fn next_subscription(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn counts(&self) -> PopulationCounts {
        *self.counts.get()
    }

    pub fn winner(&self) -> Option<PlayerKind> {
        *self.winner.get()
    }

    pub fn paused(&self) -> bool {
        *self.paused.get()
    }

    pub fn subscribe_counts(
        &mut self,
        callback: impl FnMut(&PopulationCounts) + 'static,
    ) -> SubscriptionId {
        let id = self.next_subscription();
        self.counts.subscribe(id, Box::new(callback));
        id
    }

    pub fn subscribe_winner(
        &mut self,
        callback: impl FnMut(&Option<PlayerKind>) + 'static,
    ) -> SubscriptionId {
        let id = self.next_subscription();
        self.winner.subscribe(id, Box::new(callback));
        id
    }

    pub fn subscribe_paused(&mut self, callback: impl FnMut(&bool) + 'static) -> SubscriptionId {
        let id = self.next_subscription();
        self.paused.subscribe(id, Box::new(callback));
        id
    }

    /// Drop a subscription from whichever stream holds it
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.counts.unsubscribe(id) || self.winner.unsubscribe(id) || self.paused.unsubscribe(id)
    }

    pub(crate) fn publish_counts(&mut self, counts: PopulationCounts) -> bool {
        self.counts.set(counts)
    }

    pub(crate) fn publish_winner(&mut self, winner: Option<PlayerKind>) -> bool {
        self.winner.set(winner)
    }

    pub(crate) fn publish_paused(&mut self, paused: bool) -> bool {
        self.paused.set(paused)
    }
}
