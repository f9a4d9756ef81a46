// src/utils/time.rs
//! Clock abstraction used by the sampling scheduler
//!
//! The scheduler never reads wall time directly. It asks a [`TimeProvider`] for
//! the current time and for a pacing pause, so tests can drive it from a
//! [`MockTimeProvider`] instead of real time.

use crate::config::constants::scheduler::NANOSECONDS_PER_SECOND;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Time provider trait for dependency injection and testing
pub trait TimeProvider: Send + Sync {
    /// Current time in nanoseconds
    fn now_nanos(&self) -> u64;

    /// Give up the CPU for roughly `quantum` while pacing
    fn pause(&self, quantum: Duration) {
        if quantum.is_zero() {
            std::thread::yield_now();
        } else {
            std::thread::sleep(quantum);
        }
    }
}

/// System time provider using the wall clock
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_nanos(&self) -> u64 {
        current_timestamp_nanos()
    }
}

/// Monotonic time provider, nanoseconds since its creation
pub struct MonotonicTimeProvider {
    origin: Instant,
}

impl MonotonicTimeProvider {
    /// Clock starting at zero now
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for MonotonicTimeProvider {
    fn now_nanos(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}

/// Mock time provider for deterministic testing
///
/// Pausing advances the mock clock by the requested quantum instead of
/// sleeping, so a paced loop runs at full speed with exact virtual timing.
pub struct MockTimeProvider {
    current_time: AtomicU64,
    pauses: AtomicU64,
}

impl MockTimeProvider {
    /// Mock clock reading `initial_time_nanos`
    pub fn new(initial_time_nanos: u64) -> Self {
        Self {
            current_time: AtomicU64::new(initial_time_nanos),
            pauses: AtomicU64::new(0),
        }
    }

    /// Move the clock forward
    pub fn advance_by(&self, nanos: u64) {
        self.current_time.fetch_add(nanos, Ordering::SeqCst);
    }

    /// Set the clock reading
    pub fn set_time(&self, nanos: u64) {
        self.current_time.store(nanos, Ordering::SeqCst);
    }

    /// Number of pacing pauses requested so far
    pub fn pause_count(&self) -> u64 {
        self.pauses.load(Ordering::SeqCst)
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_nanos(&self) -> u64 {
        self.current_time.load(Ordering::SeqCst)
    }

    fn pause(&self, quantum: Duration) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
        // A zero quantum would never let virtual time move.
        self.advance_by(quantum.as_nanos().max(1) as u64);
    }
}

/// Wall-clock timestamp in nanoseconds since the Unix epoch
pub fn current_timestamp_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

/// Inter-sample period for a frequency, in (fractional) nanoseconds
///
/// Zero frequency yields an infinite period; callers clamp the rate first.
pub fn sample_period_nanos(frequency_hz: u32) -> f64 {
    NANOSECONDS_PER_SECOND as f64 / f64::from(frequency_hz)
}
