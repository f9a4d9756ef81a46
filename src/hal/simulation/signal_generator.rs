// src/hal/simulation/signal_generator.rs
//! Signal generator variants of the emulated modules
//!
//! A generator is shared between the module (which forwards commands and
//! prepares sessions) and the module's sampling thread (which calls
//! [`SignalGenerator::calculate`] once per tick). All methods take `&self`;
//! command state lives in atomics and session state behind a lock.

use super::context::{PressureContext, PulseContext};
use super::ecg::EcgGenerator;
use super::pressure::PressureGenerator;
use super::pulse::PulseGenerator;
use crate::config::EmulatorConfig;
use crate::hal::command::Command;
use crate::hal::types::{ModuleParameter, ModuleType};
use std::sync::Arc;
use tracing::debug;

/// Signal model of one module
pub enum SignalGenerator {
    /// Always zero, ignores commands
    Null,
    /// Single-channel pulse sinusoid
    Pulse(PulseGenerator),
    /// Single-channel cuff pressure
    Pressure(PressureGenerator),
    /// Nine phase-locked ECG leads
    Ecg(EcgGenerator),
}

impl SignalGenerator {
    /// Generator matching `module_type`; types without a model get the null generator
    pub fn for_module(
        module_type: ModuleType,
        config: &EmulatorConfig,
        parameters: &[ModuleParameter],
        pulse_context: Arc<dyn PulseContext>,
        pressure_context: Arc<dyn PressureContext>,
    ) -> Self {
        let frequency_hz = config.scheduler.default_frequency_hz;
        match module_type {
            ModuleType::Pulse => SignalGenerator::Pulse(PulseGenerator::new(&config.pulse, pulse_context, frequency_hz)),
            ModuleType::Pressure => SignalGenerator::Pressure(PressureGenerator::new(
                &config.pressure,
                parameters,
                pressure_context,
                frequency_hz,
            )),
            ModuleType::Ecg => SignalGenerator::Ecg(EcgGenerator::new(&config.ecg)),
            _ => SignalGenerator::Null,
        }
    }

    /// Number of samples produced per tick
    pub fn channel_count(&self) -> usize {
        match self {
            SignalGenerator::Null => 1,
            SignalGenerator::Pulse(_) | SignalGenerator::Pressure(_) => 1,
            SignalGenerator::Ecg(ecg) => ecg.channel_count(),
        }
    }

    /// Update signal-shaping state; never emits events
    pub fn execute(&self, command: Command) {
        match self {
            SignalGenerator::Pressure(pressure) => pressure.execute(command),
            SignalGenerator::Null | SignalGenerator::Pulse(_) | SignalGenerator::Ecg(_) => {}
        }
    }

    /// Allocate per-session state before sampling starts
    pub fn prepare(&self, frequency_hz: u32) {
        debug!(frequency_hz, generator = self.name(), "preparing generator");
        match self {
            SignalGenerator::Null => {}
            SignalGenerator::Pulse(pulse) => pulse.prepare(frequency_hz),
            SignalGenerator::Pressure(pressure) => pressure.prepare(frequency_hz),
            SignalGenerator::Ecg(ecg) => ecg.prepare(frequency_hz),
        }
    }

    /// Drop per-session state after sampling stops
    pub fn release(&self) {
        debug!(generator = self.name(), "releasing generator");
        if let SignalGenerator::Ecg(ecg) = self {
            ecg.release();
        }
    }

    /// One sample per channel for `tick`
    pub fn calculate(&self, tick: u64) -> Vec<i32> {
        match self {
            SignalGenerator::Null => vec![0; self.channel_count()],
            SignalGenerator::Pulse(pulse) => vec![pulse.calculate(tick)],
            SignalGenerator::Pressure(pressure) => vec![pressure.calculate(tick)],
            SignalGenerator::Ecg(ecg) => ecg.calculate(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            SignalGenerator::Null => "null",
            SignalGenerator::Pulse(_) => "pulse",
            SignalGenerator::Pressure(_) => "pressure",
            SignalGenerator::Ecg(_) => "ecg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::simulation::context::VitalSigns;

    fn generator(module_type: ModuleType) -> SignalGenerator {
        let vitals = Arc::new(VitalSigns::default());
        SignalGenerator::for_module(module_type, &EmulatorConfig::default(), &[], vitals.clone(), vitals)
    }

    #[test]
    fn test_variant_per_module_type() {
        assert!(matches!(generator(ModuleType::Null), SignalGenerator::Null));
        assert!(matches!(generator(ModuleType::Combi), SignalGenerator::Null));
        assert!(matches!(generator(ModuleType::Pulse), SignalGenerator::Pulse(_)));
        assert!(matches!(generator(ModuleType::Pressure), SignalGenerator::Pressure(_)));
        assert!(matches!(generator(ModuleType::Ecg), SignalGenerator::Ecg(_)));
    }

    #[test]
    fn test_null_generator_is_silent() {
        let null = generator(ModuleType::Null);
        null.execute(Command::OpPumpOn);
        null.prepare(1000);
        assert_eq!(null.calculate(17), vec![0]);
    }

    #[test]
    fn test_sample_vector_matches_channel_count() {
        for module_type in [ModuleType::Pulse, ModuleType::Pressure, ModuleType::Ecg] {
            let generator = generator(module_type);
            generator.prepare(1000);
            assert_eq!(generator.calculate(1).len(), generator.channel_count());
            generator.release();
        }
    }

    #[test]
    fn test_commands_reach_pressure_model() {
        let generator = generator(ModuleType::Pressure);
        generator.execute(Command::OpPumpOn);
        match &generator {
            SignalGenerator::Pressure(pressure) => assert!(pressure.is_pump_on()),
            _ => unreachable!(),
        }
    }
}
