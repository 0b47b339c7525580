use std::fmt;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

type Hook = Box<dyn FnOnce() + Send>;

/// A cancellation hook for a running query.
///
/// Wraps a callback that stops the query's execution. The callback runs
/// at most once: the first [`cancel`](Self::cancel) takes it, later calls
/// do nothing. `QueryCancel` is `Sync`, so a registry can cancel from a
/// different thread than the one executing the query.
pub struct QueryCancel {
    hook: Mutex<Option<Hook>>,
    cancelled: AtomicBool,
}

impl QueryCancel {
    #[must_use]
    pub fn new(hook: impl FnOnce() + Send + 'static) -> Self {
        Self {
            hook: Mutex::new(Some(Box::new(hook))),
            cancelled: AtomicBool::new(false),
        }
    }

    /// Run the hook if it has not run yet.
    pub fn cancel(&self) {
        // A poisoned lock still holds a valid Option; take it regardless.
        let hook = self
            .hook
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
        if let Some(hook) = hook {
            self.cancelled.store(true, Ordering::Release);
            hook();
        }
    }

    /// `true` once the hook has been taken by [`cancel`](Self::cancel).
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl fmt::Debug for QueryCancel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCancel")
            .field("cancelled", &self.is_cancelled())
            .finish_non_exhaustive()
    }
}
