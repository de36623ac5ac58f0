//! A persisted two-valued setting with change notification.

use folio_storage::StoreHandle;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// A setting with exactly two states, stored as a string under a fixed key.
pub trait TwoValued: Copy + Eq + Debug + Default + Send + Sync + 'static {
    /// The key-value store key the setting lives under.
    const KEY: &'static str;

    /// The other value.
    fn flipped(self) -> Self;

    /// The persisted form.
    fn as_str(self) -> &'static str;

    /// Parse the persisted form. `None` for anything unrecognized.
    fn parse(value: &str) -> Option<Self>;
}

/// Broadcast to subscribers after every [`Toggle::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change<V> {
    pub value: V,
}

type Listener<V> = Arc<dyn Fn(&Change<V>) + Send + Sync>;

struct Listeners<V> {
    next_id: u64,
    entries: Vec<(u64, Listener<V>)>,
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}
impl Subscription {
    /// Remove the listener now. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}
impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// The current value of a [`TwoValued`] setting, kept in sync with the store.
///
/// The value is read once at construction; afterwards the in-memory value is
/// authoritative for the session. Subscribers are called synchronously, in
/// the order they subscribed, once per [`toggle`](Self::toggle).
pub struct Toggle<V: TwoValued> {
    store: StoreHandle,
    value: Mutex<V>,
    listeners: Arc<Mutex<Listeners<V>>>,
}

impl<V: TwoValued> Toggle<V> {
    /// Restore the persisted value, falling back to the default when it is
    /// missing, unreadable or unrecognized.
    pub fn load(store: StoreHandle) -> Self {
        let value = match store.get(V::KEY) {
            Ok(Some(raw)) => V::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(key = V::KEY, value = %raw, "Unrecognized persisted value; using default");
                V::default()
            }),
            Ok(None) => V::default(),
            Err(err) => {
                tracing::warn!(key = V::KEY, error = ?err, "Could not read persisted value; using default");
                V::default()
            },
        };
        Self {
            store,
            value: Mutex::new(value),
            listeners: Arc::new(Mutex::new(Listeners { next_id: 0, entries: Vec::new() })),
        }
    }

    pub fn get(&self) -> V {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Flip the value, persist it and notify every subscriber.
    ///
    /// A failed write is logged but does not undo the change: the session
    /// keeps the new value and subscribers still hear about it.
    ///
    /// The write happens under the value lock so concurrent toggles persist
    /// in the same order they flip.
    pub fn toggle(&self) -> V {
        let value = {
            let mut current = self.value.lock().unwrap_or_else(PoisonError::into_inner);
            *current = current.flipped();
            if let Err(err) = self.store.set(V::KEY, current.as_str()) {
                tracing::warn!(key = V::KEY, error = ?err, "Failed to persist toggled value");
            }
            *current
        };
        tracing::debug!(key = V::KEY, value = value.as_str(), "Toggled");
        self.notify(&Change { value });
        value
    }

    /// Register `listener` for every subsequent change.
    ///
    /// Listeners are invoked outside the registry lock, so a listener may drop
    /// its own (or another) subscription while being notified.
    pub fn subscribe(&self, listener: impl Fn(&Change<V>) + Send + Sync + 'static) -> Subscription {
        let id = {
            let mut listeners = lock(&self.listeners);
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, Arc::new(listener)));
            id
        };
        let registry: Weak<Mutex<Listeners<V>>> = Arc::downgrade(&self.listeners);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    lock(&registry).entries.retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.listeners).entries.len()
    }

    fn notify(&self, change: &Change<V>) {
        let snapshot: Vec<Listener<V>> = lock(&self.listeners).entries.iter().map(|(_, l)| Arc::clone(l)).collect();
        for listener in snapshot {
            listener(change);
        }
    }
}

fn lock<V>(listeners: &Mutex<Listeners<V>>) -> MutexGuard<'_, Listeners<V>> {
    listeners.lock().unwrap_or_else(PoisonError::into_inner)
}
