// src/hal/types.rs
//! Core types shared by the device, its modules and the consumer facade

use crate::config::constants::module::WHOLE_MODULE_CHANNEL;
use crate::hal::command::Command;
use crate::utils::conversion::sample_to_bytes;
use serde::{Deserialize, Serialize};

/// Module type codes as reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ModuleType {
    /// Placeholder for unknown addresses
    Null = 0,
    /// Combined sensor module
    Combi = 2,
    /// Cuff pressure module
    Pressure = 3,
    /// Pulse module
    Pulse = 4,
    /// Nine-lead ECG module
    Ecg = 5,
    /// Device chassis
    Carcas = 14,
    /// Host interface board
    Interface = 15,
}

impl ModuleType {
    /// Wire code of the module type
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Module type for a wire code, if the code is known
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ModuleType::Null),
            2 => Some(ModuleType::Combi),
            3 => Some(ModuleType::Pressure),
            4 => Some(ModuleType::Pulse),
            5 => Some(ModuleType::Ecg),
            14 => Some(ModuleType::Carcas),
            15 => Some(ModuleType::Interface),
            _ => None,
        }
    }
}

/// Kind of an emitted event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum DataType {
    /// Command acknowledgement or notification
    State = 1,
    /// One sample of one channel
    Data = 2,
    /// Device-reported error
    Error = 3,
}

impl DataType {
    /// Wire code of the event kind
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Event kind for a wire code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(DataType::State),
            2 => Some(DataType::Data),
            3 => Some(DataType::Error),
            _ => None,
        }
    }
}

/// One emitted event ("quantum")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantum {
    /// Emitting module
    pub module_type: ModuleType,
    /// Channel within the module
    pub channel_id: u8,
    /// Event kind
    pub data_type: DataType,
    /// Sample bytes or state message
    pub data: Vec<u8>,
}

impl Quantum {
    /// Data event carrying one sample of `channel_id`
    pub fn data(module_type: ModuleType, channel_id: u8, sample: i32) -> Self {
        Self {
            module_type,
            channel_id,
            data_type: DataType::Data,
            data: sample_to_bytes(sample).to_vec(),
        }
    }

    /// Module-level state event: the message opcode followed by `extra`
    pub fn state(module_type: ModuleType, message: Command, extra: &[u8]) -> Self {
        let mut data = Vec::with_capacity(1 + extra.len());
        data.push(message.code());
        data.extend_from_slice(extra);

        Self {
            module_type,
            channel_id: WHOLE_MODULE_CHANNEL,
            data_type: DataType::State,
            data,
        }
    }

    /// Placeholder returned when no event is available
    pub fn null() -> Self {
        Self {
            module_type: ModuleType::Null,
            channel_id: 0,
            data_type: DataType::State,
            data: Vec::new(),
        }
    }

    /// Sample carried by a data event
    pub fn sample(&self) -> Option<i32> {
        match self.data_type {
            DataType::Data => crate::utils::conversion::bytes_to_sample(&self.data),
            _ => None,
        }
    }
}

/// Read-only calibration parameter attached to a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleParameter {
    /// Parameter id
    pub id: u8,
    /// Parameter value
    pub value: f64,
    /// Human-readable name
    pub description: String,
}

impl ModuleParameter {
    /// Parameter `id` holding `value`
    pub fn new(id: u8, value: f64, description: impl Into<String>) -> Self {
        Self {
            id,
            value,
            description: description.into(),
        }
    }
}

/// Device description returned by device search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device handle
    pub handle: u32,
    /// Protocol version
    pub version: u8,
    /// Device description
    pub description: String,
}

/// Module description returned by module search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleInfo {
    /// Module address
    pub id: u8,
    /// Module type code
    pub module_type: u8,
    /// Number of channels
    pub channel_count: u8,
    /// Gain factor, always zero on the emulator
    pub gain_factor: f32,
    /// Spline level, always zero on the emulator
    pub spline_level: u8,
    /// Firmware version
    pub version: u32,
    /// Serial number
    pub serial: u32,
    /// Module description
    pub description: String,
}

/// Scheduler state of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleState {
    /// No sampling thread
    Stopped,
    /// Sampling thread active
    Running,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_results_serialize_to_json() {
        let device = DeviceInfo {
            handle: 1234,
            version: 3,
            description: "CAPD emulator v1.0.0.0".to_string(),
        };
        let json = serde_json::to_string(&device).expect("Failed to serialize");
        let deserialized: DeviceInfo = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(deserialized, device);

        let module = ModuleInfo {
            id: 5,
            module_type: ModuleType::Ecg.code(),
            channel_count: 9,
            gain_factor: 0.0,
            spline_level: 0,
            version: 1,
            serial: 1_000_003,
            description: "ECG module".to_string(),
        };
        let json = serde_json::to_string(&module).expect("Failed to serialize");
        assert!(json.contains("\"serial\":1000003"));
        let deserialized: ModuleInfo = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(deserialized, module);
    }

    #[test]
    fn test_module_type_codes_round_trip() {
        for module_type in [
            ModuleType::Null,
            ModuleType::Combi,
            ModuleType::Pressure,
            ModuleType::Pulse,
            ModuleType::Ecg,
            ModuleType::Carcas,
            ModuleType::Interface,
        ] {
            assert_eq!(ModuleType::from_code(module_type.code()), Some(module_type));
        }
        assert_eq!(ModuleType::from_code(1), None);
    }

    #[test]
    fn test_state_event_targets_whole_module() {
        let quantum = Quantum::state(ModuleType::Pulse, Command::MsgDacOps, &[1]);
        assert_eq!(quantum.channel_id, WHOLE_MODULE_CHANNEL);
        assert_eq!(quantum.data, vec![0, 1]);
        assert_eq!(quantum.sample(), None);

        assert_eq!(Quantum::data(ModuleType::Ecg, 2, -7).sample(), Some(-7));
    }
}
