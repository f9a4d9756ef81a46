// src/legacy/records.rs
//! Fixed-layout binary records of the native interface
//!
//! Little-endian, explicitly padded, strings stored as a length byte followed
//! by a fixed-width buffer. Padding and unused string bytes are written as
//! zero. A length byte larger than its buffer is clamped on both sides.

use super::ansi;
use crate::config::constants::legacy::*;
use crate::error::RecordError;
use crate::hal::types::{DeviceInfo, ModuleInfo, ModuleParameter, Quantum};
use byteorder::{ByteOrder, LittleEndian};

fn check_len(record: &'static str, bytes: &[u8], expected: usize) -> Result<(), RecordError> {
    if bytes.len() < expected {
        return Err(RecordError::Truncated {
            record,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// Write `text` as a length-prefixed string into `field` (length byte first)
fn write_string(field: &mut [u8], text: &str) {
    let width = field.len() - 1;
    let encoded = ansi::encode(text);
    let len = encoded.len().min(width);
    field[0] = len as u8;
    field[1..1 + len].copy_from_slice(&encoded[..len]);
}

fn read_string(field: &[u8]) -> String {
    let width = field.len() - 1;
    let len = (field[0] as usize).min(width);
    ansi::decode(&field[1..1 + len])
}

/// Device record (40 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    /// Device handle
    pub handle: u32,
    /// Protocol version
    pub version: u8,
    /// Device description
    pub description: String,
}

impl DeviceRecord {
    /// Serialize to the fixed layout
    pub fn encode(&self) -> [u8; DEVICE_RECORD_SIZE] {
        let mut buf = [0u8; DEVICE_RECORD_SIZE];
        LittleEndian::write_u32(&mut buf[0..4], self.handle);
        buf[4] = self.version;
        write_string(&mut buf[5..6 + SHORT_STRING_WIDTH], &self.description);
        buf
    }

    /// Decode from the first bytes of `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        check_len("device", bytes, DEVICE_RECORD_SIZE)?;
        Ok(Self {
            handle: LittleEndian::read_u32(&bytes[0..4]),
            version: bytes[4],
            description: read_string(&bytes[5..6 + SHORT_STRING_WIDTH]),
        })
    }
}

impl From<&DeviceInfo> for DeviceRecord {
    fn from(info: &DeviceInfo) -> Self {
        Self {
            handle: info.handle,
            version: info.version,
            description: info.description.clone(),
        }
    }
}

/// Module record (56 bytes)
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleRecord {
    /// Module address
    pub id: u8,
    /// Module type code
    pub module_type: u8,
    /// Number of channels
    pub channel_count: u8,
    /// Gain factor
    pub gain_factor: f32,
    /// Spline level
    pub spline_level: u8,
    /// Firmware version
    pub version: u32,
    /// Serial number
    pub serial: u32,
    /// Module description
    pub description: String,
}

impl ModuleRecord {
    /// Serialize to the fixed layout
    pub fn encode(&self) -> [u8; MODULE_RECORD_SIZE] {
        let mut buf = [0u8; MODULE_RECORD_SIZE];
        buf[0] = self.id;
        buf[1] = self.module_type;
        buf[2] = self.channel_count;
        LittleEndian::write_f32(&mut buf[4..8], self.gain_factor);
        buf[8] = self.spline_level;
        LittleEndian::write_u32(&mut buf[12..16], self.version);
        LittleEndian::write_u32(&mut buf[16..20], self.serial);
        write_string(&mut buf[20..21 + SHORT_STRING_WIDTH], &self.description);
        buf
    }

    /// Decode from the first bytes of `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        check_len("module", bytes, MODULE_RECORD_SIZE)?;
        Ok(Self {
            id: bytes[0],
            module_type: bytes[1],
            channel_count: bytes[2],
            gain_factor: LittleEndian::read_f32(&bytes[4..8]),
            spline_level: bytes[8],
            version: LittleEndian::read_u32(&bytes[12..16]),
            serial: LittleEndian::read_u32(&bytes[16..20]),
            description: read_string(&bytes[20..21 + SHORT_STRING_WIDTH]),
        })
    }
}

impl From<&ModuleInfo> for ModuleRecord {
    fn from(info: &ModuleInfo) -> Self {
        Self {
            id: info.id,
            module_type: info.module_type,
            channel_count: info.channel_count,
            gain_factor: info.gain_factor,
            spline_level: info.spline_level,
            version: info.version,
            serial: info.serial,
            description: info.description.clone(),
        }
    }
}

/// Parameter record (265 bytes, packed)
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRecord {
    /// Parameter id
    pub id: u8,
    /// Parameter value
    pub value: f64,
    /// Parameter name
    pub description: String,
}

impl ParameterRecord {
    /// Serialize to the fixed layout
    pub fn encode(&self) -> [u8; PARAMETER_RECORD_SIZE] {
        let mut buf = [0u8; PARAMETER_RECORD_SIZE];
        buf[0] = self.id;
        LittleEndian::write_f64(&mut buf[1..9], self.value);
        write_string(&mut buf[9..10 + LONG_STRING_WIDTH], &self.description);
        buf
    }

    /// Decode from the first bytes of `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        check_len("parameter", bytes, PARAMETER_RECORD_SIZE)?;
        Ok(Self {
            id: bytes[0],
            value: LittleEndian::read_f64(&bytes[1..9]),
            description: read_string(&bytes[9..10 + LONG_STRING_WIDTH]),
        })
    }
}

impl From<&ModuleParameter> for ParameterRecord {
    fn from(parameter: &ModuleParameter) -> Self {
        Self {
            id: parameter.id,
            value: parameter.value,
            description: parameter.description.clone(),
        }
    }
}

/// Event record (259 bytes); the payload is left-justified and zero-filled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantumRecord {
    /// Module type code
    pub module_id: u8,
    /// Channel id
    pub channel_id: u8,
    /// Event kind code
    pub data_type: u8,
    /// Zero-filled payload
    pub data: [u8; QUANTUM_DATA_WIDTH],
}

impl QuantumRecord {
    /// Serialize to the fixed layout
    pub fn encode(&self) -> [u8; QUANTUM_RECORD_SIZE] {
        let mut buf = [0u8; QUANTUM_RECORD_SIZE];
        buf[0] = self.module_id;
        buf[1] = self.channel_id;
        buf[2] = self.data_type;
        buf[3..].copy_from_slice(&self.data);
        buf
    }

    /// Decode from the first bytes of `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        check_len("quantum", bytes, QUANTUM_RECORD_SIZE)?;
        let mut data = [0u8; QUANTUM_DATA_WIDTH];
        data.copy_from_slice(&bytes[3..QUANTUM_RECORD_SIZE]);
        Ok(Self {
            module_id: bytes[0],
            channel_id: bytes[1],
            data_type: bytes[2],
            data,
        })
    }
}

impl From<&Quantum> for QuantumRecord {
    fn from(quantum: &Quantum) -> Self {
        let mut data = [0u8; QUANTUM_DATA_WIDTH];
        let len = quantum.data.len().min(QUANTUM_DATA_WIDTH);
        data[..len].copy_from_slice(&quantum.data[..len]);
        Self {
            module_id: quantum.module_type.code(),
            channel_id: quantum.channel_id,
            data_type: quantum.data_type.code(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{Command, ModuleType};

    #[test]
    fn test_device_layout() {
        let record = DeviceRecord {
            handle: 0x0403_0201,
            version: 3,
            description: "CAPD".to_string(),
        };
        let bytes = record.encode();
        assert_eq!(&bytes[0..4], &[1, 2, 3, 4]);
        assert_eq!(bytes[4], 3);
        assert_eq!(bytes[5], 4);
        assert_eq!(&bytes[6..10], b"CAPD");
        assert!(bytes[10..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_module_layout() {
        let record = ModuleRecord {
            id: 3,
            module_type: 3,
            channel_count: 1,
            gain_factor: 1.5,
            spline_level: 2,
            version: 5,
            serial: 1_000_001,
            description: "P".to_string(),
        };
        let bytes = record.encode();
        assert_eq!(&bytes[0..4], &[3, 3, 1, 0]);
        assert_eq!(&bytes[4..8], &1.5f32.to_le_bytes());
        assert_eq!(&bytes[8..12], &[2, 0, 0, 0]);
        assert_eq!(&bytes[12..16], &5u32.to_le_bytes());
        assert_eq!(&bytes[16..20], &1_000_001u32.to_le_bytes());
        assert_eq!(&bytes[20..22], &[1, b'P']);
        assert_eq!(&bytes[53..56], &[0, 0, 0]);
    }

    #[test]
    fn test_parameter_layout() {
        let record = ParameterRecord {
            id: 51,
            value: 0.00079999997979,
            description: "x".repeat(300),
        };
        let bytes = record.encode();
        assert_eq!(bytes[0], 51);
        assert_eq!(&bytes[1..9], &0.00079999997979f64.to_le_bytes());
        assert_eq!(bytes[9], 255);

        let decoded = ParameterRecord::decode(&bytes).unwrap();
        assert_eq!(decoded.description.len(), LONG_STRING_WIDTH);
    }

    #[test]
    fn test_quantum_from_state_event() {
        let quantum = Quantum::state(ModuleType::Pulse, Command::MsgDacOps, &[1]);
        let record = QuantumRecord::from(&quantum);
        let bytes = record.encode();
        assert_eq!(&bytes[0..5], &[4, 255, 1, 0, 1]);
        assert!(bytes[5..].iter().all(|&b| b == 0));
        assert_eq!(QuantumRecord::decode(&bytes).unwrap(), record);
    }

    #[test]
    fn test_oversized_length_byte_is_clamped() {
        let mut bytes = DeviceRecord {
            handle: 1,
            version: 3,
            description: "a".repeat(SHORT_STRING_WIDTH),
        }
        .encode();
        bytes[5] = 200;
        let decoded = DeviceRecord::decode(&bytes).unwrap();
        assert_eq!(decoded.description.len(), SHORT_STRING_WIDTH);
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        let err = ModuleRecord::decode(&[0u8; 10]).unwrap_err();
        assert_eq!(
            err,
            RecordError::Truncated {
                record: "module",
                expected: MODULE_RECORD_SIZE,
                actual: 10
            }
        );
    }
}
