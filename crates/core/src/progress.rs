//! Progress reporting and cooperative cancellation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Sink for progress updates from a running resampling job.
///
/// The engine reports a completed fraction after every block and polls
/// `is_cancelled` once per block; cancellation is cooperative and has block
/// granularity, there is no sub-block preemption.
pub trait ProgressSink {
    /// Report the completed fraction, in `[0, 1]`
    fn report(&self, fraction: f64);

    /// Whether the job should stop at the next block boundary
    fn is_cancelled(&self) -> bool;

    /// Report an error message; `fatal` marks errors that abort the job
    fn report_error(&self, message: &str, fatal: bool);
}

/// Progress sink that ignores everything and never cancels
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn report(&self, _fraction: f64) {}

    fn is_cancelled(&self) -> bool {
        false
    }

    fn report_error(&self, _message: &str, _fatal: bool) {}
}

/// Shareable cancellation flag.
///
/// Clones share one flag, so a controller thread can hold a clone and
/// cancel a job running elsewhere.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Create a new, unset flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested
    pub fn is_set(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl ProgressSink for CancelFlag {
    fn report(&self, _fraction: f64) {}

    fn is_cancelled(&self) -> bool {
        self.is_set()
    }

    fn report_error(&self, _message: &str, _fatal: bool) {}
}
