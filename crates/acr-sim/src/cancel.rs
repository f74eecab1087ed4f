//! Cooperative cancellation for in-flight replicate runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag checked by every replicate at each step boundary.
///
/// Cloning is cheap and all clones observe the same flag, so one token can
/// cover an entire ensemble: trigger it once and every running replicate
/// stops at its next step with [`RunError::Cancelled`][crate::RunError].
/// Cancellation is cooperative; a step already in progress finishes first.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.  Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
