//! Register/dispose handling for host notifications.
//!
//! Hosts forward container resizes (or any other layout-affecting event)
//! through an [`ObserverRegistry`]. Each registration returns a
//! [`Subscription`] guard; dropping it unregisters the callback, so a
//! table that goes away early never leaves a dangling observer behind.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

/// Size reported by a resize observer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

type Callback<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next_id: u64,
    callbacks: Vec<(u64, Callback<T>)>,
}

/// Single-threaded set of callbacks notified in registration order
pub struct ObserverRegistry<T> {
    inner: Rc<RefCell<Registry<T>>>,
}

impl<T> Default for ObserverRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ObserverRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("len", &self.len())
            .finish()
    }
}

impl<T> ObserverRegistry<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                callbacks: Vec::new(),
            })),
        }
    }

    /// Register a callback. It stays live until the returned guard drops.
    #[must_use = "dropping the subscription unregisters the callback"]
    pub fn register<F>(&self, callback: F) -> Subscription<T>
    where
        F: Fn(&T) + 'static,
    {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.callbacks.push((id, Rc::new(callback)));
        tracing::trace!(id, "observer registered");
        Subscription {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver `value` to every live callback. Returns how many ran.
    ///
    /// Callbacks may register or dispose subscriptions while running; such
    /// changes apply from the next notification.
    pub fn notify(&self, value: &T) -> usize {
        let callbacks: Vec<Callback<T>> = self
            .inner
            .borrow()
            .callbacks
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in &callbacks {
            callback(value);
        }
        callbacks.len()
    }

    /// Number of live callbacks
    pub fn len(&self) -> usize {
        self.inner.borrow().callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Guard for a registered callback
pub struct Subscription<T> {
    id: u64,
    registry: Weak<RefCell<Registry<T>>>,
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl<T> Subscription<T> {
    /// Unregister now instead of at drop.
    pub fn dispose(self) {
        drop(self);
    }

    /// Whether the registry still exists and holds this callback
    pub fn is_active(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let active = registry
            .borrow()
            .callbacks
            .iter()
            .any(|(id, _)| *id == self.id);
        active
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            // A callback disposing itself during notify is fine: notify
            // only holds clones, not the borrow.
            if let Ok(mut registry) = registry.try_borrow_mut() {
                registry.callbacks.retain(|(id, _)| *id != self.id);
                tracing::trace!(id = self.id, "observer disposed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_notify_in_registration_order() {
        let registry = ObserverRegistry::<u32>::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = {
            let log = Rc::clone(&log);
            registry.register(move |v| log.borrow_mut().push(("a", *v)))
        };
        let b = {
            let log = Rc::clone(&log);
            registry.register(move |v| log.borrow_mut().push(("b", *v)))
        };
        assert_eq!(registry.notify(&7), 2);
        assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7)]);
        drop((a, b));
    }

    #[test]
    fn test_drop_unregisters() {
        let registry = ObserverRegistry::<ContainerSize>::new();
        let hits = Rc::new(Cell::new(0));
        let sub = {
            let hits = Rc::clone(&hits);
            registry.register(move |_| hits.set(hits.get() + 1))
        };
        registry.notify(&ContainerSize::default());
        assert!(sub.is_active());
        sub.dispose();
        registry.notify(&ContainerSize::default());
        assert_eq!(hits.get(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_release_on_early_return() {
        fn mount(registry: &ObserverRegistry<u32>, fail: bool) -> Option<Subscription<u32>> {
            let sub = registry.register(|_| {});
            if fail {
                return None;
            }
            Some(sub)
        }
        let registry = ObserverRegistry::new();
        assert!(mount(&registry, true).is_none());
        assert!(registry.is_empty());
        let kept = mount(&registry, false);
        assert_eq!(registry.len(), 1);
        drop(kept);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_subscription_outlives_registry() {
        let registry = ObserverRegistry::<u32>::new();
        let sub = registry.register(|_| {});
        drop(registry);
        assert!(!sub.is_active());
        drop(sub);
    }
}
