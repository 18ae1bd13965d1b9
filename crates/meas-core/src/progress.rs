//! Cooperative cancellation for long-running operations (spec.md §5
//! "Cancellation and timeouts"): agent initialisation, destination-chooser
//! construction, syntax computation, and replay setup all poll a handle
//! between work items rather than spawning their own timeout machinery.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Polled between units of work by any long-running `meas-*` operation.
/// Checking is the caller's responsibility — nothing here spawns a thread or
/// enforces a deadline; it's a cooperative flag, not a watchdog.
pub trait ProgressMonitor {
    fn should_cancel(&self) -> bool;
}

/// The default monitor: never cancels. Used wherever a caller has no
/// cancellation policy of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl ProgressMonitor for NeverCancel {
    fn should_cancel(&self) -> bool {
        false
    }
}

/// A monitor backed by a shared flag, so one thread (a UI, a request
/// handler) can cancel work running on another.
#[derive(Debug, Clone, Default)]
pub struct AtomicCancelFlag(Arc<AtomicBool>);

impl AtomicCancelFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl ProgressMonitor for AtomicCancelFlag {
    fn should_cancel(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
