// src/config/mod.rs
//! Emulator configuration

pub mod constants;
pub mod loader;

pub use constants::*;
pub use loader::ConfigLoader;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Complete emulator configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct EmulatorConfig {
    /// Device identity
    #[serde(default)]
    pub device: DeviceSettings,
    /// Sampling scheduler
    #[serde(default)]
    pub scheduler: SchedulerSettings,
    /// Pressure model
    #[serde(default)]
    pub pressure: PressureSettings,
    /// Pulse model
    #[serde(default)]
    pub pulse: PulseSettings,
    /// ECG model
    #[serde(default)]
    pub ecg: EcgSettings,
}

/// Device identity
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DeviceSettings {
    /// Description reported by device search
    #[serde(default = "defaults::description")]
    pub description: String,

    /// Protocol version
    #[serde(default = "defaults::protocol_version")]
    pub version: u8,

    /// Fixed device handle; a random one is drawn when absent
    #[serde(default)]
    pub handle: Option<u32>,
}

/// Sampling scheduler settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SchedulerSettings {
    /// Sampling rate of a freshly opened module
    #[serde(default = "defaults::default_frequency_hz")]
    pub default_frequency_hz: u32,

    /// Highest sampling rate a module accepts; larger requests are clamped
    #[serde(default = "defaults::max_frequency_hz")]
    pub max_frequency_hz: u32,

    /// Pause between deadline checks while pacing
    #[serde(default = "defaults::pace_quantum_us")]
    pub pace_quantum_us: u64,

    /// Backlog size that triggers a queue growth warning (0 disables it)
    #[serde(default = "defaults::backlog_warning_events")]
    pub backlog_warning_events: usize,
}

/// Pressure integrator settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PressureSettings {
    /// Raw units added per tick while the pump runs
    #[serde(default = "defaults::pump_on_rate")]
    pub pump_on_rate: u32,
    /// Raw units added per tick while the pump is off
    #[serde(default = "defaults::pump_off_rate")]
    pub pump_off_rate: u32,
    /// Raw units bled per tick with the valve open
    #[serde(default = "defaults::valve_open_rate")]
    pub valve_open_rate: u32,
    /// Raw units leaked per tick with the valve closed
    #[serde(default = "defaults::valve_closed_rate")]
    pub valve_closed_rate: u32,

    /// Cuff pressure ceiling
    #[serde(default = "defaults::max_pressure_mmhg")]
    pub max_pressure_mmhg: f64,
    /// Pressure below which no pulsation is overlaid
    #[serde(default = "defaults::pulse_cutoff_mmhg")]
    pub pulse_cutoff_mmhg: f64,
    /// Peak pulsatile amplitude
    #[serde(default = "defaults::pulse_amplitude_mmhg")]
    pub pulse_amplitude_mmhg: f64,
    /// Pulsatile amplitude outside the diastolic-systolic band
    #[serde(default = "defaults::pulse_floor_mmhg")]
    pub pulse_floor_mmhg: f64,
    /// Rate of the pulsatile overlay
    #[serde(default = "defaults::heart_rate_bpm")]
    pub heart_rate_bpm: u32,
}

/// Pulse sinusoid settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PulseSettings {
    /// Peak sample value
    #[serde(default = "defaults::pulse_amplitude")]
    pub amplitude: f64,
}

/// ECG synthesis settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EcgSettings {
    /// Resample the native second to the configured module rate
    #[serde(default = "defaults::ecg_resample")]
    pub resample: bool,
}

/// Default value providers using constants
mod defaults {
    use crate::config::constants::*;

    pub fn description() -> String { device::DEFAULT_DESCRIPTION.to_string() }
    pub fn protocol_version() -> u8 { device::DEFAULT_PROTOCOL_VERSION }

    pub fn default_frequency_hz() -> u32 { scheduler::DEFAULT_FREQUENCY_HZ }
    pub fn max_frequency_hz() -> u32 { scheduler::DEFAULT_MAX_FREQUENCY_HZ }
    pub fn pace_quantum_us() -> u64 { scheduler::DEFAULT_PACE_QUANTUM_US }
    pub fn backlog_warning_events() -> usize { scheduler::DEFAULT_BACKLOG_WARNING_EVENTS }

    pub fn pump_on_rate() -> u32 { pressure::DEFAULT_PUMP_ON_RATE }
    pub fn pump_off_rate() -> u32 { pressure::DEFAULT_PUMP_OFF_RATE }
    pub fn valve_open_rate() -> u32 { pressure::DEFAULT_VALVE_OPEN_RATE }
    pub fn valve_closed_rate() -> u32 { pressure::DEFAULT_VALVE_CLOSED_RATE }
    pub fn max_pressure_mmhg() -> f64 { pressure::DEFAULT_MAX_PRESSURE_MMHG }
    pub fn pulse_cutoff_mmhg() -> f64 { pressure::DEFAULT_PULSE_CUTOFF_MMHG }
    pub fn pulse_amplitude_mmhg() -> f64 { pressure::DEFAULT_PULSE_AMPLITUDE_MMHG }
    pub fn pulse_floor_mmhg() -> f64 { pressure::DEFAULT_PULSE_FLOOR_MMHG }
    pub fn heart_rate_bpm() -> u32 { pressure::DEFAULT_HEART_RATE_BPM }

    pub fn pulse_amplitude() -> f64 { pulse::DEFAULT_AMPLITUDE }

    pub fn ecg_resample() -> bool { true }
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            description: defaults::description(),
            version: defaults::protocol_version(),
            handle: None,
        }
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            default_frequency_hz: defaults::default_frequency_hz(),
            max_frequency_hz: defaults::max_frequency_hz(),
            pace_quantum_us: defaults::pace_quantum_us(),
            backlog_warning_events: defaults::backlog_warning_events(),
        }
    }
}

impl Default for PressureSettings {
    fn default() -> Self {
        Self {
            pump_on_rate: defaults::pump_on_rate(),
            pump_off_rate: defaults::pump_off_rate(),
            valve_open_rate: defaults::valve_open_rate(),
            valve_closed_rate: defaults::valve_closed_rate(),
            max_pressure_mmhg: defaults::max_pressure_mmhg(),
            pulse_cutoff_mmhg: defaults::pulse_cutoff_mmhg(),
            pulse_amplitude_mmhg: defaults::pulse_amplitude_mmhg(),
            pulse_floor_mmhg: defaults::pulse_floor_mmhg(),
            heart_rate_bpm: defaults::heart_rate_bpm(),
        }
    }
}

impl Default for PulseSettings {
    fn default() -> Self {
        Self {
            amplitude: defaults::pulse_amplitude(),
        }
    }
}

impl Default for EcgSettings {
    fn default() -> Self {
        Self {
            resample: defaults::ecg_resample(),
        }
    }
}

impl EmulatorConfig {
    /// Check configuration consistency, collecting every violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.scheduler.default_frequency_hz == 0 {
            errors.push("scheduler.default_frequency_hz must be greater than 0".to_string());
        }
        if self.scheduler.max_frequency_hz == 0 || self.scheduler.max_frequency_hz > scheduler::HARD_MAX_FREQUENCY_HZ {
            errors.push(format!(
                "scheduler.max_frequency_hz must lie in [1, {}]",
                scheduler::HARD_MAX_FREQUENCY_HZ
            ));
        }
        if self.scheduler.default_frequency_hz > self.scheduler.max_frequency_hz {
            errors.push("scheduler.default_frequency_hz must not exceed scheduler.max_frequency_hz".to_string());
        }
        if self.scheduler.pace_quantum_us == 0 {
            errors.push("scheduler.pace_quantum_us must be greater than 0".to_string());
        }
        if self.device.description.chars().count() > legacy::SHORT_STRING_WIDTH {
            errors.push(format!(
                "device.description is longer than {} characters and would be truncated",
                legacy::SHORT_STRING_WIDTH
            ));
        }

        let pressure = &self.pressure;
        if pressure.pump_on_rate <= pressure.valve_closed_rate {
            errors.push("pressure.pump_on_rate must exceed pressure.valve_closed_rate or the cuff never inflates".to_string());
        }
        if pressure.valve_open_rate <= pressure.pump_off_rate {
            errors.push("pressure.valve_open_rate must exceed pressure.pump_off_rate or the cuff never deflates".to_string());
        }
        if !(pressure.max_pressure_mmhg > 0.0) {
            errors.push("pressure.max_pressure_mmhg must be positive".to_string());
        }
        if pressure.pulse_cutoff_mmhg < 0.0 || pressure.pulse_cutoff_mmhg >= pressure.max_pressure_mmhg {
            errors.push("pressure.pulse_cutoff_mmhg must lie in [0, max_pressure_mmhg)".to_string());
        }
        if pressure.pulse_floor_mmhg < 0.0 || pressure.pulse_floor_mmhg > pressure.pulse_amplitude_mmhg {
            errors.push("pressure.pulse_floor_mmhg must lie in [0, pulse_amplitude_mmhg]".to_string());
        }

        if !self.pulse.amplitude.is_finite() {
            errors.push("pulse.amplitude must be finite".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}
