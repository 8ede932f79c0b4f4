//! Callable actions with pointer identity

use std::fmt;
use std::sync::Arc;

/// A shareable action invoked by a coalescer
///
/// Cloning an `Action` keeps its identity. Wrapping the same closure twice
/// with [`Action::new`] produces two distinct identities, which is how a
/// function recreated on every render looks to its consumers.
pub struct Action<A> {
    func: Arc<dyn Fn(A) + Send + Sync>,
}

impl<A> Action<A> {
    /// Wrap a closure as a new action
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self { func: Arc::new(func) }
    }

    /// Run the action
    pub fn call(&self, args: A) {
        (self.func)(args)
    }

    /// Whether both handles point at the same action
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl<A> Clone for Action<A> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
        }
    }
}

impl<A> fmt::Debug for Action<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("ptr", &Arc::as_ptr(&self.func).cast::<()>())
            .finish()
    }
}
