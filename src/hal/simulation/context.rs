// src/hal/simulation/context.rs
//! Visual-context collaborators of the generators
//!
//! The pulse generator reads its rate from a [`PulseContext`]; the pressure
//! generator reads the systolic and diastolic thresholds from a
//! [`PressureContext`] and reports the measured pressure back to it once per
//! second. [`VitalSigns`] implements both with atomics, so a front end can
//! adjust the values while the schedulers are running.

use crate::config::constants::{pulse, vitals};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Source of the simulated pulse rate
pub trait PulseContext: Send + Sync {
    /// Pulse rate in beats per minute
    fn pulse_rate_bpm(&self) -> u32;
}

/// Pressure display collaborator
pub trait PressureContext: Send + Sync {
    /// Upper pulsatile threshold in mmHg
    fn systolic_mmhg(&self) -> u32;

    /// Lower pulsatile threshold in mmHg
    fn diastolic_mmhg(&self) -> u32;

    /// Called once per simulated second with the current cuff pressure
    fn report_pressure(&self, mmhg: f64);
}

/// Thread-safe vital sign values shared with the generators
#[derive(Debug)]
pub struct VitalSigns {
    pulse_rate_bpm: AtomicU32,
    systolic_mmhg: AtomicU32,
    diastolic_mmhg: AtomicU32,
    last_pressure_bits: AtomicU64,
}

impl VitalSigns {
    /// Vital signs with the given rate and thresholds
    pub fn new(pulse_rate_bpm: u32, systolic_mmhg: u32, diastolic_mmhg: u32) -> Self {
        Self {
            pulse_rate_bpm: AtomicU32::new(pulse_rate_bpm),
            systolic_mmhg: AtomicU32::new(systolic_mmhg),
            diastolic_mmhg: AtomicU32::new(diastolic_mmhg),
            last_pressure_bits: AtomicU64::new(0f64.to_bits()),
        }
    }

    /// Update the pulse rate
    pub fn set_pulse_rate_bpm(&self, bpm: u32) {
        self.pulse_rate_bpm.store(bpm, Ordering::Relaxed);
    }

    /// Update both thresholds; they are swapped if given in the wrong order
    pub fn set_blood_pressure(&self, systolic_mmhg: u32, diastolic_mmhg: u32) {
        let (high, low) = if systolic_mmhg >= diastolic_mmhg {
            (systolic_mmhg, diastolic_mmhg)
        } else {
            (diastolic_mmhg, systolic_mmhg)
        };
        self.systolic_mmhg.store(high, Ordering::Relaxed);
        self.diastolic_mmhg.store(low, Ordering::Relaxed);
    }

    /// Pressure most recently reported by the pressure generator
    pub fn last_pressure_mmhg(&self) -> f64 {
        f64::from_bits(self.last_pressure_bits.load(Ordering::Relaxed))
    }
}

impl Default for VitalSigns {
    fn default() -> Self {
        Self::new(
            pulse::DEFAULT_RATE_BPM,
            vitals::DEFAULT_SYSTOLIC_MMHG,
            vitals::DEFAULT_DIASTOLIC_MMHG,
        )
    }
}

impl PulseContext for VitalSigns {
    fn pulse_rate_bpm(&self) -> u32 {
        self.pulse_rate_bpm.load(Ordering::Relaxed)
    }
}

impl PressureContext for VitalSigns {
    fn systolic_mmhg(&self) -> u32 {
        self.systolic_mmhg.load(Ordering::Relaxed)
    }

    fn diastolic_mmhg(&self) -> u32 {
        self.diastolic_mmhg.load(Ordering::Relaxed)
    }

    fn report_pressure(&self, mmhg: f64) {
        self.last_pressure_bits.store(mmhg.to_bits(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let vitals = VitalSigns::default();
        assert_eq!(vitals.pulse_rate_bpm(), 60);
        assert_eq!(vitals.systolic_mmhg(), 120);
        assert_eq!(vitals.diastolic_mmhg(), 80);
        assert_eq!(vitals.last_pressure_mmhg(), 0.0);
    }

    #[test]
    fn test_blood_pressure_is_ordered() {
        let vitals = VitalSigns::default();
        vitals.set_blood_pressure(70, 130);
        assert_eq!(vitals.systolic_mmhg(), 130);
        assert_eq!(vitals.diastolic_mmhg(), 70);
    }

    #[test]
    fn test_report_pressure_round_trips() {
        let vitals = VitalSigns::default();
        vitals.report_pressure(123.25);
        assert_eq!(vitals.last_pressure_mmhg(), 123.25);
    }
}
