// src/hal/simulation/ecg.rs
//! Nine-lead ECG generator
//!
//! Preparation turns the stored harmonics of every lead into one second of
//! samples: the inverse transform restores one heart period at the native
//! rate, and the rest of the second is bridged by a straight line from the
//! last sample of the period back to its first, so the buffer wraps without a
//! step. When the module runs at another rate the second is resampled to that
//! rate. Sampling then walks one shared cursor through all buffers, which keeps
//! the leads phase-locked.

use super::ecg_spectrum::ECG_HARMONICS;
use crate::config::constants::ecg::{NATIVE_PERIOD_SAMPLES, NATIVE_RATE_HZ};
use crate::config::constants::module::ECG_CHANNEL_COUNT;
use crate::config::constants::scheduler::HARD_MAX_FREQUENCY_HZ;
use crate::config::EcgSettings;
use crate::processing::fourier::reconstruct_real;
use crate::utils::conversion::saturate_sample;
use parking_lot::Mutex;
use rustfft::num_complex::Complex64;
use tracing::debug;

struct Session {
    buffers: Vec<Vec<i32>>,
    cursor: usize,
}

/// Harmonic ECG model with a shared sampling cursor
pub struct EcgGenerator {
    resample: bool,
    session: Mutex<Option<Session>>,
}

impl EcgGenerator {
    /// Unprepared generator; [`EcgGenerator::prepare`] builds the waveform
    pub fn new(settings: &EcgSettings) -> Self {
        Self {
            resample: settings.resample,
            session: Mutex::new(None),
        }
    }

    /// Number of leads
    pub fn channel_count(&self) -> usize {
        ECG_CHANNEL_COUNT as usize
    }

    /// Build the per-lead buffers for a session at `frequency_hz`
    ///
    /// Buffers never grow past [`HARD_MAX_FREQUENCY_HZ`] samples.
    pub fn prepare(&self, frequency_hz: u32) {
        let target_len = if self.resample && frequency_hz > 0 {
            frequency_hz.min(HARD_MAX_FREQUENCY_HZ) as usize
        } else {
            NATIVE_RATE_HZ
        };

        let buffers: Vec<Vec<i32>> = ECG_HARMONICS
            .iter()
            .map(|lead| {
                let harmonics: Vec<Complex64> = lead.iter().map(|&(re, im)| Complex64::new(re, im)).collect();
                let second = native_second(&reconstruct_real(&harmonics, NATIVE_PERIOD_SAMPLES));
                resample_periodic(&second, target_len)
                    .into_iter()
                    .map(saturate_sample)
                    .collect()
            })
            .collect();

        debug!(frequency_hz, buffer_len = target_len, "ECG waveform prepared");
        *self.session.lock() = Some(Session { buffers, cursor: 0 });
    }

    /// Drop the prepared buffers
    pub fn release(&self) {
        *self.session.lock() = None;
    }

    /// Next sample of every lead; zeros when no session is prepared
    pub fn calculate(&self) -> Vec<i32> {
        let mut guard = self.session.lock();
        let Some(session) = guard.as_mut() else {
            return vec![0; self.channel_count()];
        };

        let cursor = session.cursor;
        let samples = session.buffers.iter().map(|buffer| buffer[cursor]).collect();
        let len = session.buffers.first().map_or(1, Vec::len).max(1);
        session.cursor = (cursor + 1) % len;
        samples
    }

    /// Length of the prepared per-lead buffers
    pub fn buffer_len(&self) -> Option<usize> {
        self.session
            .lock()
            .as_ref()
            .map(|session| session.buffers.first().map_or(0, Vec::len))
    }

    /// Copy of the prepared buffers, one per lead
    pub fn buffers(&self) -> Option<Vec<Vec<i32>>> {
        self.session.lock().as_ref().map(|session| session.buffers.clone())
    }
}

/// Extend one period to a native second, bridging the gap linearly
fn native_second(period: &[f64]) -> Vec<f64> {
    let (Some(&first), Some(&last)) = (period.first(), period.last()) else {
        return vec![0.0; NATIVE_RATE_HZ];
    };

    let gap = NATIVE_RATE_HZ.saturating_sub(period.len());
    let mut second = Vec::with_capacity(period.len() + gap);
    second.extend_from_slice(period);
    second.extend((0..gap).map(|j| last + (first - last) * (j + 1) as f64 / (gap + 1) as f64));
    second
}

/// Linear resampling of one periodic cycle to `target_len` points
fn resample_periodic(cycle: &[f64], target_len: usize) -> Vec<f64> {
    if cycle.is_empty() || target_len == cycle.len() {
        return cycle.to_vec();
    }

    let step = cycle.len() as f64 / target_len as f64;
    (0..target_len)
        .map(|i| {
            let position = i as f64 * step;
            let index = position.floor() as usize % cycle.len();
            let next = (index + 1) % cycle.len();
            let fraction = position - position.floor();
            cycle[index] + (cycle[next] - cycle[index]) * fraction
        })
        .collect()
}
