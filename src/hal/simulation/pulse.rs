// src/hal/simulation/pulse.rs
//! Photoplethysmographic pulse generator: a single sinusoid at the heart rate

use super::context::PulseContext;
use crate::config::PulseSettings;
use crate::utils::conversion::saturate_sample;
use std::f64::consts::PI;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Sinusoidal pulse at the context heart rate
pub struct PulseGenerator {
    amplitude: f64,
    context: Arc<dyn PulseContext>,
    frequency_hz: AtomicU32,
}

impl PulseGenerator {
    /// Generator sampling at `frequency_hz` until the next prepare
    pub fn new(settings: &PulseSettings, context: Arc<dyn PulseContext>, frequency_hz: u32) -> Self {
        Self {
            amplitude: settings.amplitude,
            context,
            frequency_hz: AtomicU32::new(frequency_hz.max(1)),
        }
    }

    /// Adopt the session sampling rate
    pub fn prepare(&self, frequency_hz: u32) {
        self.frequency_hz.store(frequency_hz.max(1), Ordering::Relaxed);
    }

    /// Sample at `tick`
    pub fn calculate(&self, tick: u64) -> i32 {
        let sample_rate = self.frequency_hz.load(Ordering::Relaxed) as f64;
        let beats_per_second = self.context.pulse_rate_bpm() as f64 / 60.0;
        let phase = 2.0 * PI / sample_rate * beats_per_second * tick as f64;
        saturate_sample(phase.sin() * self.amplitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::simulation::context::VitalSigns;

    fn generator(bpm: u32) -> PulseGenerator {
        let vitals = Arc::new(VitalSigns::default());
        vitals.set_pulse_rate_bpm(bpm);
        PulseGenerator::new(&PulseSettings::default(), vitals, 1000)
    }

    fn assert_near(actual: i32, expected: i32) {
        assert!((actual - expected).abs() <= 1, "{actual} vs {expected}");
    }

    #[test]
    fn test_quarter_period_reaches_amplitude() {
        let pulse = generator(60);
        assert_eq!(pulse.calculate(0), 0);
        assert_near(pulse.calculate(250), 100_000);
        assert_near(pulse.calculate(750), -100_000);
    }

    #[test]
    fn test_rate_follows_context() {
        let pulse = generator(120);
        // 2 Hz at 1 kHz: peak after 125 ticks
        assert_near(pulse.calculate(125), 100_000);
    }

    #[test]
    fn test_period_tracks_prepared_frequency() {
        let pulse = generator(60);
        pulse.prepare(500);
        assert_near(pulse.calculate(125), 100_000);
    }
}
