//! drag subscriptions for mounted node visuals
//!
//! A node can only be grabbed while it holds a `DragBinding`. Bindings are acquired when a visual mounts and
//! released when the binding is dropped, so unmounting a visual can never leave a stale subscription behind.

use std::{
    cell::RefCell,
    collections::BTreeSet,
    rc::{Rc, Weak},
};

/// registry of node indices currently subscribed to drag events
#[derive(Debug, Clone, Default)]
pub struct DragBindings(Rc<RefCell<BTreeSet<usize>>>);

impl DragBindings {
    pub fn new() -> Self {
        DragBindings::default()
    }

    /// subscribe the node at `index`. the subscription lasts as long as the returned binding.
    pub fn acquire(&self, index: usize) -> DragBinding {
        if !self.0.borrow_mut().insert(index) {
            log::warn!("node {} acquired a second drag binding", index);
        }
        log::debug!("drag binding acquired for node {}", index);
        DragBinding {
            index,
            registry: Rc::downgrade(&self.0),
        }
    }

    pub fn is_bound(&self, index: usize) -> bool {
        self.0.borrow().contains(&index)
    }

    /// number of live bindings
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// a live drag subscription. dropping it releases the subscription.
#[derive(Debug)]
pub struct DragBinding {
    index: usize,
    registry: Weak<RefCell<BTreeSet<usize>>>,
}

impl DragBinding {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Drop for DragBinding {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().remove(&self.index);
            log::debug!("drag binding released for node {}", self.index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_released_on_drop() {
        let bindings = DragBindings::new();
        let b0 = bindings.acquire(0);
        let b1 = bindings.acquire(1);
        assert_eq!(bindings.len(), 2);
        assert_eq!(b1.index(), 1);
        drop(b1);
        assert!(bindings.is_bound(0));
        assert!(!bindings.is_bound(1));
        drop(b0);
        assert!(bindings.is_empty());
    }

    #[test]
    fn binding_outliving_registry() {
        let bindings = DragBindings::new();
        let b = bindings.acquire(3);
        drop(bindings);
        // registry is gone, dropping the binding must not panic
        drop(b);
    }
}
