// src/hal/simulation/pressure.rs
//! Cuff pressure generator
//!
//! An integrator driven by the pump and the valve. Every tick the pump adds
//! its rate and the valve bleeds its rate off; the result never drops below
//! zero and never exceeds the maximum cuff pressure. A pulsatile component is
//! laid over the output whose amplitude peaks halfway between the diastolic
//! and systolic thresholds, as oscillometric cuffs observe.

use super::context::PressureContext;
use crate::config::constants::parameter;
use crate::config::PressureSettings;
use crate::hal::command::Command;
use crate::hal::types::ModuleParameter;
use crate::utils::conversion::{pressure_gain, saturate_sample};
use std::f64::consts::PI;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU32, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Pump and valve driven cuff pressure integrator
pub struct PressureGenerator {
    settings: PressureSettings,
    context: Arc<dyn PressureContext>,
    gain: f64,
    max_value: i64,
    valve_open: AtomicBool,
    pump_on: AtomicBool,
    value: AtomicI64,
    frequency_hz: AtomicU32,
}

/// Value of parameter `id`, zero when the module does not carry it
pub(crate) fn parameter_value(parameters: &[ModuleParameter], id: u8) -> f64 {
    parameters
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.value)
        .unwrap_or(0.0)
}

impl PressureGenerator {
    /// Generator calibrated from the module `parameters`
    pub fn new(
        settings: &PressureSettings,
        parameters: &[ModuleParameter],
        context: Arc<dyn PressureContext>,
        frequency_hz: u32,
    ) -> Self {
        let gain = pressure_gain(
            parameter_value(parameters, parameter::ADC_BIT_DEPTH),
            parameter_value(parameters, parameter::ADC_REFERENCE_LEVEL),
            parameter_value(parameters, parameter::PULSE_CHANNEL_GAIN),
            parameter_value(parameters, parameter::PRESSURE_SENSITIVITY),
        );
        let max_value = if gain > 0.0 {
            (settings.max_pressure_mmhg / gain) as i64
        } else {
            0
        };

        Self {
            settings: settings.clone(),
            context,
            gain,
            max_value,
            valve_open: AtomicBool::new(false),
            pump_on: AtomicBool::new(false),
            value: AtomicI64::new(0),
            frequency_hz: AtomicU32::new(frequency_hz.max(1)),
        }
    }

    /// Apply the pump and valve operations; everything else is ignored
    pub fn execute(&self, command: Command) {
        match command {
            Command::OpGateOn => self.valve_open.store(true, Ordering::Relaxed),
            Command::OpGateOff => self.valve_open.store(false, Ordering::Relaxed),
            Command::OpPumpOn => self.pump_on.store(true, Ordering::Relaxed),
            Command::OpPumpOff => self.pump_on.store(false, Ordering::Relaxed),
            _ => return,
        }
        debug!(?command, valve_open = self.is_valve_open(), pump_on = self.is_pump_on(), "pressure actuators changed");
    }

    /// Adopt the session sampling rate
    pub fn prepare(&self, frequency_hz: u32) {
        self.frequency_hz.store(frequency_hz.max(1), Ordering::Relaxed);
    }

    /// Advance the integrator one tick and return the overlaid sample
    pub fn calculate(&self, tick: u64) -> i32 {
        let increase = if self.is_pump_on() {
            self.settings.pump_on_rate
        } else {
            self.settings.pump_off_rate
        };
        let decrease = if self.is_valve_open() {
            self.settings.valve_open_rate
        } else {
            self.settings.valve_closed_rate
        };

        // Only the sampling thread writes the integrator.
        let value = (self.value.load(Ordering::Relaxed) + increase as i64 - decrease as i64)
            .max(0)
            .min(self.max_value);
        self.value.store(value, Ordering::Relaxed);

        let pressure = value as f64 * self.gain;
        let frequency = self.frequency_hz.load(Ordering::Relaxed) as u64;
        if tick % frequency == 0 {
            self.context.report_pressure(pressure);
        }

        let amplitude = if self.gain > 0.0 {
            self.pulsatile_amplitude_mmhg(pressure) / self.gain
        } else {
            0.0
        };
        let beats_per_second = self.settings.heart_rate_bpm as f64 / 60.0;
        let overlay = amplitude * (2.0 * PI * beats_per_second * tick as f64 / frequency as f64).sin();

        saturate_sample(value as f64 + overlay)
    }

    /// Amplitude of the pulsatile overlay at cuff pressure `pressure`
    pub fn pulsatile_amplitude_mmhg(&self, pressure: f64) -> f64 {
        if pressure <= self.settings.pulse_cutoff_mmhg {
            return 0.0;
        }

        let systolic = self.context.systolic_mmhg() as f64;
        let diastolic = self.context.diastolic_mmhg() as f64;
        let floor = self.settings.pulse_floor_mmhg;

        if systolic > diastolic && (diastolic..=systolic).contains(&pressure) {
            let position = (pressure - diastolic) / (systolic - diastolic);
            floor + (self.settings.pulse_amplitude_mmhg - floor) * (PI * position).sin()
        } else {
            floor
        }
    }

    /// Integrator value in raw ADC units, without the pulsatile overlay
    pub fn value(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Upper bound of the integrator in raw ADC units
    pub fn max_value(&self) -> i64 {
        self.max_value
    }

    /// Raw-unit to mmHg factor derived from the calibration parameters
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Current cuff pressure in mmHg
    pub fn pressure_mmhg(&self) -> f64 {
        self.value() as f64 * self.gain
    }

    /// Whether the valve bleeds at the open rate
    pub fn is_valve_open(&self) -> bool {
        self.valve_open.load(Ordering::Relaxed)
    }

    /// Whether the pump inflates at the on rate
    pub fn is_pump_on(&self) -> bool {
        self.pump_on.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::simulation::context::VitalSigns;

    fn parameters() -> Vec<ModuleParameter> {
        vec![
            ModuleParameter::new(parameter::ADC_BIT_DEPTH, 24.0, "ADC bits"),
            ModuleParameter::new(parameter::ADC_REFERENCE_LEVEL, 10.0, "ADC reference"),
            ModuleParameter::new(parameter::PULSE_CHANNEL_GAIN, 132.00047302, "Channel gain"),
            ModuleParameter::new(parameter::PRESSURE_SENSITIVITY, 0.00079999997979, "Sensitivity"),
        ]
    }

    fn generator(settings: PressureSettings) -> (PressureGenerator, Arc<VitalSigns>) {
        let vitals = Arc::new(VitalSigns::default());
        let generator = PressureGenerator::new(&settings, &parameters(), vitals.clone(), 1000);
        (generator, vitals)
    }

    #[test]
    fn test_gain_from_parameters() {
        let (pressure, _) = generator(PressureSettings::default());
        let expected = 7.5 * 10.0 / 2f64.powi(24) / 132.00047302 / 0.00079999997979;
        assert!((pressure.gain() - expected).abs() < 1e-15);
        assert!((pressure.max_value() as f64 * pressure.gain() - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_default_actuators_deflate() {
        let (pressure, _) = generator(PressureSettings::default());
        assert!(!pressure.is_pump_on());
        assert!(!pressure.is_valve_open());
        pressure.calculate(1);
        assert_eq!(pressure.value(), 0);
    }

    #[test]
    fn test_pump_inflates_monotonically_to_clamp() {
        let settings = PressureSettings {
            pump_on_rate: 500_000,
            ..Default::default()
        };
        let (pressure, _) = generator(settings);
        pressure.execute(Command::OpPumpOn);
        pressure.execute(Command::OpGateOff);

        let mut previous = pressure.value();
        for tick in 1..100 {
            pressure.calculate(tick);
            assert!(pressure.value() >= previous);
            previous = pressure.value();
        }
        assert_eq!(pressure.value(), pressure.max_value());
    }

    #[test]
    fn test_open_valve_deflates_to_zero_and_stays() {
        let settings = PressureSettings {
            pump_on_rate: 500_000,
            ..Default::default()
        };
        let (pressure, _) = generator(settings);
        pressure.execute(Command::OpPumpOn);
        for tick in 1..10 {
            pressure.calculate(tick);
        }
        assert!(pressure.value() > 0);

        pressure.execute(Command::OpPumpOff);
        pressure.execute(Command::OpGateOn);
        let mut previous = pressure.value();
        for tick in 10..20_000 {
            pressure.calculate(tick);
            assert!(pressure.value() <= previous);
            previous = pressure.value();
        }
        assert_eq!(pressure.value(), 0);
    }

    #[test]
    fn test_pressure_reported_once_per_second() {
        let settings = PressureSettings {
            pump_on_rate: 1_000,
            ..Default::default()
        };
        let (pressure, vitals) = generator(settings);
        pressure.execute(Command::OpPumpOn);

        for tick in 1..1000 {
            pressure.calculate(tick);
        }
        assert_eq!(vitals.last_pressure_mmhg(), 0.0);

        pressure.calculate(1000);
        assert!((vitals.last_pressure_mmhg() - pressure.pressure_mmhg()).abs() < 1e-9);
        assert!(vitals.last_pressure_mmhg() > 0.0);
    }

    #[test]
    fn test_pulsatile_amplitude_profile() {
        let (pressure, _) = generator(PressureSettings::default());
        assert_eq!(pressure.pulsatile_amplitude_mmhg(2.0), 0.0);
        assert_eq!(pressure.pulsatile_amplitude_mmhg(40.0), 0.3);
        assert_eq!(pressure.pulsatile_amplitude_mmhg(200.0), 0.3);
        assert!((pressure.pulsatile_amplitude_mmhg(100.0) - 3.0).abs() < 1e-9);
        assert!((pressure.pulsatile_amplitude_mmhg(80.0) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_unrelated_commands_are_ignored() {
        let (pressure, _) = generator(PressureSettings::default());
        pressure.execute(Command::OpAdcReset);
        pressure.execute(Command::MsgPumpOn);
        assert!(!pressure.is_pump_on());
        assert!(!pressure.is_valve_open());
    }
}
