//! # Model-Changed Propagation
//!
//! The event contract that ties edits to re-validation. A concrete
//! widget mutates the shared data instance and calls `model_changed()`
//! on its control description; the description broadcasts over this bus;
//! every live control — the editing one included — re-validates and asks
//! the rule tracker to re-evaluate rules for its own path.
//!
//! ## Ordering & Re-Entrancy
//!
//! - Notification order is registration order.
//! - The broadcast is fire-and-forget, carries no payload, and runs each
//!   handler to completion before notifying the next.
//! - Handlers must not broadcast again; only an actual edit does. The
//!   list is snapshotted before notifying, so a handler that registers
//!   new observers (a renderer building controls mid-cycle) does not
//!   affect the broadcast already in flight.
//!
//! ## Teardown
//!
//! Observers are held as `Weak` references. Dropping the rendered tree
//! drops the descriptions, and the bus prunes the dead entries on its
//! next broadcast.

use std::cell::RefCell;
use std::rc::Weak;

/// A live subscriber to "model changed" notifications.
pub trait ModelObserver {
    /// Called synchronously on every broadcast, including the one fired
    /// by the initial render.
    fn on_model_changed(&self);
}

/// Observer registry for "model changed" notifications.
#[derive(Default)]
pub struct ChangeBus {
    observers: RefCell<Vec<Weak<dyn ModelObserver>>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observer. Registration order is notification order;
    /// there is no unsubscribe — dropping the observer is the teardown.
    pub fn subscribe(&self, observer: Weak<dyn ModelObserver>) {
        self.observers.borrow_mut().push(observer);
    }

    /// Notify every live observer, in registration order, then prune
    /// dead entries.
    pub fn broadcast(&self) {
        let live: Vec<_> = self
            .observers
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .collect();
        for observer in &live {
            observer.on_model_changed();
        }
        self.observers
            .borrow_mut()
            .retain(|observer| observer.strong_count() > 0);
    }

    /// Number of currently live observers.
    pub fn observer_count(&self) -> usize {
        self.observers
            .borrow()
            .iter()
            .filter(|observer| observer.strong_count() > 0)
            .count()
    }
}
