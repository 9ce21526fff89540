//! In-flight markers for cache loads and page requests
//!
//! The owner holds `&mut` across the request, so observers keep a clone of
//! the flag instead of asking the owner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Whether a request is in flight; clones observe the same flag
#[derive(Debug, Clone, Default)]
pub struct ActivityFlag {
    active: Arc<AtomicBool>,
}

impl ActivityFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Mark the flag active until the returned guard is dropped
    pub fn begin(&self) -> ActivityGuard {
        self.active.store(true, Ordering::SeqCst);
        ActivityGuard {
            active: Arc::clone(&self.active),
        }
    }
}

/// Clears its flag on drop, also when the request future is cancelled
#[derive(Debug)]
#[must_use = "the flag is cleared as soon as the guard is dropped"]
pub struct ActivityGuard {
    active: Arc<AtomicBool>,
}

impl Drop for ActivityGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }
}
