//! View liveness and load cancellation

use futures::future::{AbortHandle, AbortRegistration};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle that cancels a view's pending load
///
/// Cancelling aborts an in-flight artifact load and marks the view dead, so
/// a highlighted-text response arriving afterwards is ignored.
#[derive(Debug, Clone)]
pub struct LifecycleHandle {
    alive: Arc<AtomicBool>,
    abort: AbortHandle,
}

impl LifecycleHandle {
    pub(crate) fn new() -> (Self, AbortRegistration) {
        let (abort, registration) = AbortHandle::new_pair();
        let handle = Self {
            alive: Arc::new(AtomicBool::new(true)),
            abort,
        };
        (handle, registration)
    }

    /// Abort the pending load and mark the view dead
    pub fn cancel(&self) {
        self.alive.store(false, Ordering::Release);
        self.abort.abort();
    }

    #[inline]
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}
