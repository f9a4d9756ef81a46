// src/hal/scheduler.rs
//! Per-module sampling thread
//!
//! One dedicated thread per running module. Each iteration asks the generator
//! for one sample vector, pushes one data event per channel, then waits for
//! the next absolute deadline `start + tick * period`. Deadlines are absolute,
//! so pacing jitter never accumulates into drift. The clock is injected, which
//! lets tests run the loop on virtual time.

use crate::acquisition::EventQueue;
use crate::error::{EmulatorError, EmulatorResult};
use crate::hal::simulation::SignalGenerator;
use crate::hal::types::{ModuleType, Quantum};
use crate::utils::time::{sample_period_nanos, TimeProvider};
use crossbeam::channel;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, trace};

/// Everything a sampling thread needs besides its generator
#[derive(Clone)]
pub struct SamplingPlan {
    /// Module the thread samples for
    pub module_type: ModuleType,
    /// Ticks per second
    pub frequency_hz: u32,
    /// Pause between deadline checks
    pub pace_quantum: Duration,
    /// Time source for deadlines and pauses
    pub clock: Arc<dyn TimeProvider>,
}

/// Handle to a running sampling thread
pub struct ModuleThread {
    module_type: ModuleType,
    handle: Option<JoinHandle<()>>,
    stop: Arc<AtomicBool>,
    ticks: Arc<AtomicU64>,
}

impl ModuleThread {
    /// Spawn the sampling loop and return once the thread is running
    pub fn start(plan: SamplingPlan, generator: Arc<SignalGenerator>, queue: Arc<EventQueue>) -> EmulatorResult<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let ticks = Arc::new(AtomicU64::new(0));
        let (alive_tx, alive_rx) = channel::bounded::<()>(1);

        let module_type = plan.module_type;
        let name = format!("capd-{}", format!("{:?}", module_type).to_lowercase());
        let thread_stop = Arc::clone(&stop);
        let thread_ticks = Arc::clone(&ticks);

        let handle = thread::Builder::new()
            .name(name)
            .spawn(move || {
                let _ = alive_tx.send(());
                drop(alive_tx);
                run(&plan, &generator, &queue, &thread_stop, &thread_ticks);
                // no tick can follow, so the session is free to go
                generator.release();
            })
            .map_err(|source| {
                error!(module = ?module_type, %source, "failed to spawn sampling thread");
                EmulatorError::SchedulerSpawn { module: module_type, source }
            })?;

        // A disconnect means the thread already died; nothing left to wait for.
        let _ = alive_rx.recv();

        Ok(Self {
            module_type,
            handle: Some(handle),
            stop,
            ticks,
        })
    }

    /// Ask the loop to exit; it notices within one sample period
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Wait for the thread to exit (signals it first)
    pub fn join(&mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!(module = ?self.module_type, "sampling thread panicked");
            }
        }
    }

    /// Whether stop has been requested
    pub fn is_stopping(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Whether the thread has exited
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Ticks completed so far
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }
}

impl Drop for ModuleThread {
    fn drop(&mut self) {
        self.join();
    }
}

fn run(plan: &SamplingPlan, generator: &SignalGenerator, queue: &EventQueue, stop: &AtomicBool, ticks: &AtomicU64) {
    let period = sample_period_nanos(plan.frequency_hz);
    let mut deadline = plan.clock.now_nanos() as f64;
    let mut tick: u64 = 0;

    debug!(module = ?plan.module_type, frequency_hz = plan.frequency_hz, "sampling thread started");

    while !stop.load(Ordering::Acquire) {
        let samples = generator.calculate(tick);
        for (channel, sample) in samples.into_iter().enumerate() {
            queue.push(Quantum::data(plan.module_type, channel as u8, sample));
        }

        tick += 1;
        ticks.store(tick, Ordering::Relaxed);
        deadline += period;

        while (plan.clock.now_nanos() as f64) < deadline {
            if stop.load(Ordering::Relaxed) {
                break;
            }
            plan.clock.pause(plan.pace_quantum);
        }
        trace!(module = ?plan.module_type, tick, "tick complete");
    }

    debug!(module = ?plan.module_type, ticks = tick, "sampling thread exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmulatorConfig;
    use crate::hal::simulation::VitalSigns;
    use crate::utils::time::{MockTimeProvider, MonotonicTimeProvider};
    use std::time::Instant;

    fn generator(module_type: ModuleType) -> Arc<SignalGenerator> {
        let vitals = Arc::new(VitalSigns::default());
        let generator = SignalGenerator::for_module(module_type, &EmulatorConfig::default(), &[], vitals.clone(), vitals);
        generator.prepare(1000);
        Arc::new(generator)
    }

    fn wait_for_ticks(thread: &ModuleThread, ticks: u64) {
        let started = Instant::now();
        while thread.ticks() < ticks {
            assert!(started.elapsed() < Duration::from_secs(10), "sampling thread stalled");
            thread::yield_now();
        }
    }

    #[test]
    fn test_virtual_clock_paces_by_period() {
        let clock = Arc::new(MockTimeProvider::new(0));
        let queue = Arc::new(EventQueue::new(0));
        let plan = SamplingPlan {
            module_type: ModuleType::Pulse,
            frequency_hz: 1000,
            pace_quantum: Duration::from_micros(250),
            clock: clock.clone(),
        };

        let mut thread = ModuleThread::start(plan, generator(ModuleType::Pulse), queue.clone()).unwrap();
        wait_for_ticks(&thread, 20);
        thread.join();

        let ticks = thread.ticks();
        assert!(thread.is_finished());
        assert_eq!(queue.len() as u64, ticks);
        // four 250 us pauses per 1 ms period
        assert!(clock.pause_count() >= (ticks - 1) * 4);
        assert!(clock.now_nanos() >= (ticks - 1) * 1_000_000);
    }

    #[test]
    fn test_one_event_per_channel_per_tick() {
        let clock = Arc::new(MockTimeProvider::new(0));
        let queue = Arc::new(EventQueue::new(0));
        let plan = SamplingPlan {
            module_type: ModuleType::Ecg,
            frequency_hz: 1000,
            pace_quantum: Duration::from_micros(500),
            clock,
        };

        let mut thread = ModuleThread::start(plan, generator(ModuleType::Ecg), queue.clone()).unwrap();
        wait_for_ticks(&thread, 5);
        thread.join();

        let ticks = thread.ticks() as usize;
        assert_eq!(queue.len(), ticks * 9);

        let mut expected_channel = 0u8;
        while let Some(quantum) = queue.try_pop() {
            assert_eq!(quantum.module_type, ModuleType::Ecg);
            assert_eq!(quantum.channel_id, expected_channel);
            expected_channel = (expected_channel + 1) % 9;
        }
    }

    #[test]
    fn test_stop_exits_within_a_period() {
        let queue = Arc::new(EventQueue::new(0));
        let plan = SamplingPlan {
            module_type: ModuleType::Pressure,
            frequency_hz: 10,
            pace_quantum: Duration::from_micros(250),
            clock: Arc::new(MonotonicTimeProvider::new()),
        };

        let mut thread = ModuleThread::start(plan, generator(ModuleType::Pressure), queue).unwrap();
        assert!(!thread.is_finished());

        let stopped_at = Instant::now();
        thread.stop();
        assert!(thread.is_stopping());
        thread.join();
        assert!(stopped_at.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn test_thread_releases_session_on_exit() {
        let plan = SamplingPlan {
            module_type: ModuleType::Ecg,
            frequency_hz: 1000,
            pace_quantum: Duration::from_micros(250),
            clock: Arc::new(MockTimeProvider::new(0)),
        };
        let generator = generator(ModuleType::Ecg);

        let mut thread = ModuleThread::start(plan, Arc::clone(&generator), Arc::new(EventQueue::new(0))).unwrap();
        wait_for_ticks(&thread, 3);
        match generator.as_ref() {
            SignalGenerator::Ecg(ecg) => assert!(ecg.buffer_len().is_some()),
            _ => unreachable!(),
        }

        thread.join();
        match generator.as_ref() {
            SignalGenerator::Ecg(ecg) => assert!(ecg.buffer_len().is_none()),
            _ => unreachable!(),
        }
    }
}
