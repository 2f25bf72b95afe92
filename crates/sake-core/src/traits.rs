//! Cooperative cancellation for long-running searches.
//!
//! The search polls a [`SearchControl`] between node expansions. Returning
//! `true` ends the search early; results found so far are kept.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Polled by the search engine to decide whether to stop early.
///
/// Implementations must be `Sync` because parallel searches share a single
/// control across worker threads.
pub trait SearchControl: Sync {
    fn should_stop(&self) -> bool;
}

/// Never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStop;

impl SearchControl for NeverStop {
    fn should_stop(&self) -> bool {
        false
    }
}

/// Cancelled once the flag is set, typically from another thread.
impl SearchControl for AtomicBool {
    fn should_stop(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// Stops once a wall-clock instant has passed.
#[derive(Debug, Clone, Copy)]
pub struct Deadline(Instant);

impl Deadline {
    pub fn after(timeout: Duration) -> Self {
        Self(Instant::now() + timeout)
    }
}

impl SearchControl for Deadline {
    fn should_stop(&self) -> bool {
        Instant::now() >= self.0
    }
}

impl<T: SearchControl + ?Sized> SearchControl for &T {
    fn should_stop(&self) -> bool {
        (**self).should_stop()
    }
}

/// Stops as soon as either control does.
impl<A: SearchControl, B: SearchControl> SearchControl for (A, B) {
    fn should_stop(&self) -> bool {
        self.0.should_stop() || self.1.should_stop()
    }
}
