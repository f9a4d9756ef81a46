// src/acquisition/event_queue.rs
//! Shared device event queue
//!
//! Every sampling thread and every command acknowledgement pushes into one
//! unbounded lock-free FIFO; a single consumer drains it by polling. Pushing
//! never blocks and never fails. A consumer that polls too slowly makes the
//! queue grow without limit, as on the real hardware, which has no
//! backpressure channel either. Growth is observable through
//! [`EventQueue::len`], [`EventQueue::high_water_mark`] and a warning logged
//! each time the backlog crosses the configured threshold.

use crate::hal::Quantum;
use crossbeam::queue::SegQueue;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use tracing::warn;

/// Unbounded multi-producer event FIFO
pub struct EventQueue {
    queue: SegQueue<Quantum>,
    backlog_warning: usize,
    over_threshold: AtomicBool,
    high_water_mark: AtomicUsize,
    pushed: AtomicU64,
    popped: AtomicU64,
}

/// Counters describing queue traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
    /// Events waiting to be polled
    pub pending: usize,
    /// Largest backlog observed
    pub high_water_mark: usize,
    /// Events pushed since creation
    pub total_pushed: u64,
    /// Events polled since creation
    pub total_popped: u64,
}

impl EventQueue {
    /// Create a queue that warns once the backlog exceeds `backlog_warning`
    pub fn new(backlog_warning: usize) -> Self {
        Self {
            queue: SegQueue::new(),
            backlog_warning,
            over_threshold: AtomicBool::new(false),
            high_water_mark: AtomicUsize::new(0),
            pushed: AtomicU64::new(0),
            popped: AtomicU64::new(0),
        }
    }

    /// Enqueue one event (never blocks)
    pub fn push(&self, quantum: Quantum) {
        self.queue.push(quantum);
        self.pushed.fetch_add(1, Ordering::Relaxed);

        let pending = self.queue.len();
        self.high_water_mark.fetch_max(pending, Ordering::Relaxed);

        if self.backlog_warning > 0
            && pending > self.backlog_warning
            && !self.over_threshold.swap(true, Ordering::Relaxed)
        {
            warn!(pending, threshold = self.backlog_warning, "event queue backlog is growing; consumer polls too slowly");
        }
    }

    /// Dequeue one event, `None` when nothing is available
    pub fn try_pop(&self) -> Option<Quantum> {
        let quantum = self.queue.pop()?;
        self.popped.fetch_add(1, Ordering::Relaxed);

        if self.queue.len() <= self.backlog_warning {
            self.over_threshold.store(false, Ordering::Relaxed);
        }
        Some(quantum)
    }

    /// Number of events waiting to be polled
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no event is waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Largest backlog observed so far
    pub fn high_water_mark(&self) -> usize {
        self.high_water_mark.load(Ordering::Relaxed)
    }

    /// Snapshot of the traffic counters
    pub fn stats(&self) -> QueueStats {
        QueueStats {
            pending: self.len(),
            high_water_mark: self.high_water_mark(),
            total_pushed: self.pushed.load(Ordering::Relaxed),
            total_popped: self.popped.load(Ordering::Relaxed),
        }
    }

    /// Drop every pending event, returning how many were discarded
    pub fn clear(&self) -> usize {
        let mut discarded = 0;
        while self.try_pop().is_some() {
            discarded += 1;
        }
        discarded
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new(crate::config::constants::scheduler::DEFAULT_BACKLOG_WARNING_EVENTS)
    }
}
