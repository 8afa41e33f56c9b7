//! Cooperative cancellation.
//!
//! A `CancellationHandle` is created and owned by the caller and lent to every
//! operator entry point. It moves from live to canceled at most once and never
//! back. Operators consult it exactly once, before resolving their source.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct CancellationHandle {
    canceled: Arc<AtomicBool>,
}

impl CancellationHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Repeated calls are no-ops.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::Release);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Acquire)
    }
}

/// Fail with `Error::Canceled` if the handle has been canceled.
///
/// An absent handle behaves as permanently live.
pub fn ensure_live(cancel: Option<&CancellationHandle>) -> Result<()> {
    match cancel {
        Some(handle) if handle.is_canceled() => Err(Error::Canceled),
        _ => Ok(()),
    }
}
