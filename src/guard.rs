//! Single in-flight request guard

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::Error;

/// Allows at most one pending request at a time.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct RequestGuard {
    busy: Arc<AtomicBool>,
}

/// Held for the duration of a request; releases the guard on drop.
#[derive(Debug)]
pub struct InFlight {
    busy: Arc<AtomicBool>,
}

impl RequestGuard {
    /// Create an idle guard
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a request as started, or fail if one is already pending
    pub fn begin(&self) -> Result<InFlight, Error> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::RequestInFlight)?;
        Ok(InFlight {
            busy: Arc::clone(&self.busy),
        })
    }

    /// Whether a request is currently pending
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
