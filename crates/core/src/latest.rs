//! Single-slot holder for the most recent action
//!
//! The owner stores a new action on every tick; a long-lived timer reads
//! the slot only when it fires, so it never runs an action captured at
//! construction time.

use crate::action::Action;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared slot holding the latest action
///
/// Clones share the same slot. One writer (the binding that owns it) and
/// any number of fired timers reading it.
pub struct LatestActionRef<A> {
    slot: Arc<RwLock<Action<A>>>,
}

impl<A> LatestActionRef<A> {
    /// Create a slot seeded with the initial action
    pub fn new(action: Action<A>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(action)),
        }
    }

    /// Replace the stored action
    pub fn store(&self, action: Action<A>) {
        *self.slot.write() = action;
    }

    /// Current action
    pub fn load(&self) -> Action<A> {
        self.slot.read().clone()
    }
}

impl<A> Clone for LatestActionRef<A> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}
