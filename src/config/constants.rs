// src/config/constants.rs
//! Emulator-wide constants
//!
//! Catalog data for the emulated modules and the default values every
//! configuration section falls back to.

#![allow(missing_docs)]

/// Device identity constants
pub mod device {
    pub const DEFAULT_DESCRIPTION: &str = "CAPD emulator v1.0.0.0";
    pub const DEFAULT_PROTOCOL_VERSION: u8 = 3;
}

/// Sampling scheduler constants
pub mod scheduler {
    pub const DEFAULT_FREQUENCY_HZ: u32 = 1000;
    pub const DEFAULT_PACE_QUANTUM_US: u64 = 250;
    pub const DEFAULT_BACKLOG_WARNING_EVENTS: usize = 250_000;
    pub const DEFAULT_MAX_FREQUENCY_HZ: u32 = 100_000;
    /// Ceiling for the configurable maximum; an ECG session holds one second per lead
    pub const HARD_MAX_FREQUENCY_HZ: u32 = 1_000_000;

    pub const NANOSECONDS_PER_SECOND: u64 = 1_000_000_000;
    pub const NANOSECONDS_PER_MICROSECOND: u64 = 1_000;
}

/// Module catalog constants
pub mod module {
    /// Channel id reserved for events addressed to the module as a whole
    pub const WHOLE_MODULE_CHANNEL: u8 = 255;

    pub const NULL_VERSION: u32 = 1;
    pub const NULL_SERIAL: u32 = 1;
    pub const NULL_DESCRIPTION: &str = "Null module";

    pub const PRESSURE_VERSION: u32 = 5;
    pub const PRESSURE_SERIAL: u32 = 1_000_001;

    pub const PULSE_VERSION: u32 = 3;
    pub const PULSE_SERIAL: u32 = 1_000_002;

    pub const ECG_VERSION: u32 = 1;
    pub const ECG_SERIAL: u32 = 1_000_003;
    pub const ECG_CHANNEL_COUNT: u8 = 9;
}

/// Parameter ids shared by the module parameter tables
pub mod parameter {
    pub const ADC_BIT_DEPTH: u8 = 1;
    pub const ADC_REFERENCE_LEVEL: u8 = 2;
    pub const PULSE_CHANNEL_GAIN: u8 = 11;
    pub const PULSE_CHANNEL_GAIN_AUX: u8 = 12;
    pub const PRESSURE_SENSITIVITY: u8 = 51;
    pub const PRESSURE_BLOCK_TYPE: u8 = 60;
    pub const DAC_BIT_DEPTH: u8 = 51;
    pub const DAC_REFERENCE_LEVEL: u8 = 52;
    pub const DAC_TO_ADC_GAIN: u8 = 53;
    pub const CURRENT_FREQUENCY: u8 = 70;
}

/// Pressure integrator constants (raw ADC units per tick)
pub mod pressure {
    pub const DEFAULT_PUMP_ON_RATE: u32 = 300;
    pub const DEFAULT_PUMP_OFF_RATE: u32 = 0;
    pub const DEFAULT_VALVE_OPEN_RATE: u32 = 1_200;
    pub const DEFAULT_VALVE_CLOSED_RATE: u32 = 10;

    pub const DEFAULT_MAX_PRESSURE_MMHG: f64 = 300.0;
    pub const DEFAULT_PULSE_CUTOFF_MMHG: f64 = 5.0;
    pub const DEFAULT_PULSE_AMPLITUDE_MMHG: f64 = 3.0;
    pub const DEFAULT_PULSE_FLOOR_MMHG: f64 = 0.3;
    pub const DEFAULT_HEART_RATE_BPM: u32 = 60;

    /// Numerator of the raw-to-mmHg gain formula
    pub const GAIN_NUMERATOR: f64 = 7.5;
}

/// Pulse generator constants
pub mod pulse {
    pub const DEFAULT_AMPLITUDE: f64 = 100_000.0;
    pub const DEFAULT_RATE_BPM: u32 = 60;
}

/// ECG synthesis constants
pub mod ecg {
    /// Rate the harmonic table was captured at
    pub const NATIVE_RATE_HZ: usize = 1000;
    /// Length of one heart period at the native rate
    pub const NATIVE_PERIOD_SAMPLES: usize = 800;
    pub const HARMONIC_COUNT: usize = 32;
}

/// Visual context defaults
pub mod vitals {
    pub const DEFAULT_SYSTOLIC_MMHG: u32 = 120;
    pub const DEFAULT_DIASTOLIC_MMHG: u32 = 80;
}

/// Legacy record layout
pub mod legacy {
    pub const SHORT_STRING_WIDTH: usize = 32;
    pub const LONG_STRING_WIDTH: usize = 255;
    pub const QUANTUM_DATA_WIDTH: usize = 256;

    pub const DEVICE_RECORD_SIZE: usize = 40;
    pub const MODULE_RECORD_SIZE: usize = 56;
    pub const PARAMETER_RECORD_SIZE: usize = 265;
    pub const QUANTUM_RECORD_SIZE: usize = 259;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressure_rates_allow_inflation_and_deflation() {
        assert!(pressure::DEFAULT_PUMP_ON_RATE > pressure::DEFAULT_VALVE_CLOSED_RATE);
        assert!(pressure::DEFAULT_VALVE_OPEN_RATE > pressure::DEFAULT_PUMP_OFF_RATE);
    }

    #[test]
    fn test_ecg_period_fits_native_second() {
        assert!(ecg::NATIVE_PERIOD_SAMPLES < ecg::NATIVE_RATE_HZ);
        assert!(ecg::HARMONIC_COUNT <= ecg::NATIVE_PERIOD_SAMPLES);
        assert!(ecg::NATIVE_RATE_HZ as u32 <= scheduler::DEFAULT_MAX_FREQUENCY_HZ);
    }

    #[test]
    fn test_record_sizes_match_layout() {
        // handle + version + string[32] + 2 pad
        assert_eq!(legacy::DEVICE_RECORD_SIZE, 4 + 1 + 1 + legacy::SHORT_STRING_WIDTH + 2);
        // id, type, channels, pad, f32, spline, 3 pad, u32, u32, string[32], 3 pad
        assert_eq!(legacy::MODULE_RECORD_SIZE, 4 + 4 + 4 + 4 + 4 + 1 + legacy::SHORT_STRING_WIDTH + 3);
        assert_eq!(legacy::PARAMETER_RECORD_SIZE, 1 + 8 + 1 + legacy::LONG_STRING_WIDTH);
        assert_eq!(legacy::QUANTUM_RECORD_SIZE, 3 + legacy::QUANTUM_DATA_WIDTH);
    }
}
