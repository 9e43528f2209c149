//! Change-notification channel.
//!
//! A registry of zero-argument callbacks keyed by opaque subscription ids.
//! Every mutating session or timer operation broadcasts through this after
//! the mutation is applied and before the call returns. The registry is
//! caller-owned rather than process-global, so independent engines (and
//! tests) observe only their own state.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Opaque handle returned by [`Notifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Callback = Arc<dyn Fn() + Send + Sync>;

/// An arena of observer callbacks.
#[derive(Default)]
pub struct Notifier {
    observers: Mutex<BTreeMap<u64, Callback>>,
    next_id: AtomicU64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; the returned id deregisters it later.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.observers
            .lock()
            .unwrap()
            .insert(id, Arc::new(callback));
        SubscriptionId(id)
    }

    /// Remove a callback. Returns false if the id was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.lock().unwrap().remove(&id.0).is_some()
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.lock().unwrap().len()
    }

    /// Invoke every registered callback exactly once, synchronously.
    ///
    /// Iterates a snapshot taken at notify time with the registry lock
    /// released, so a callback may subscribe or unsubscribe (itself
    /// included) without deadlocking or skipping other observers.
    pub fn notify(&self) {
        let snapshot: Vec<Callback> = self.observers.lock().unwrap().values().cloned().collect();
        for callback in snapshot {
            callback();
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("observers", &self.observer_count())
            .finish()
    }
}
