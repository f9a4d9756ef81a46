// tests/legacy_records.rs
//! Legacy record codec properties

use capd_emulator::config::constants::legacy::*;
use capd_emulator::hal::{Command, ModuleType, Quantum};
use capd_emulator::legacy::{ansi, DeviceRecord, ModuleRecord, ParameterRecord, QuantumRecord};
use capd_emulator::{CapdEmulator, RecordError};
use proptest::prelude::*;

/// Text made of characters the legacy code page can hold
fn legacy_text(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![0x20u32..0x7F, 0x0410u32..0x0450], 0..max_len)
        .prop_map(|codes| codes.into_iter().filter_map(char::from_u32).collect())
}

/// What survives a fixed-width string field
fn truncated(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

proptest! {
    #[test]
    fn prop_device_record_round_trip(handle: u32, version: u8, description in legacy_text(64)) {
        let record = DeviceRecord { handle, version, description: description.clone() };
        let bytes = record.encode();
        prop_assert_eq!(bytes.len(), DEVICE_RECORD_SIZE);

        let decoded = DeviceRecord::decode(&bytes).unwrap();
        prop_assert_eq!(decoded.handle, handle);
        prop_assert_eq!(decoded.version, version);
        prop_assert_eq!(decoded.description, truncated(&description, SHORT_STRING_WIDTH));
    }

    #[test]
    fn prop_module_record_round_trip(
        id: u8,
        module_type: u8,
        channel_count: u8,
        gain_factor in -1e6f32..1e6,
        spline_level: u8,
        version: u32,
        serial: u32,
        description in legacy_text(64),
    ) {
        let record = ModuleRecord {
            id, module_type, channel_count, gain_factor, spline_level, version, serial,
            description: description.clone(),
        };
        let decoded = ModuleRecord::decode(&record.encode()).unwrap();
        prop_assert_eq!(
            decoded,
            ModuleRecord { description: truncated(&description, SHORT_STRING_WIDTH), ..record }
        );
    }

    #[test]
    fn prop_parameter_record_round_trip(id: u8, value in -1e12f64..1e12, description in legacy_text(300)) {
        let record = ParameterRecord { id, value, description: description.clone() };
        let decoded = ParameterRecord::decode(&record.encode()).unwrap();
        prop_assert_eq!(decoded.id, id);
        prop_assert_eq!(decoded.value.to_bits(), value.to_bits());
        prop_assert_eq!(decoded.description, truncated(&description, LONG_STRING_WIDTH));
    }

    #[test]
    fn prop_quantum_record_keeps_payload(channel: u8, sample: i32) {
        let quantum = Quantum::data(ModuleType::Ecg, channel, sample);
        let decoded = QuantumRecord::decode(&QuantumRecord::from(&quantum).encode()).unwrap();
        prop_assert_eq!(decoded.module_id, 5);
        prop_assert_eq!(decoded.channel_id, channel);
        prop_assert_eq!(decoded.data_type, 2);
        prop_assert_eq!(&decoded.data[..4], &sample.to_le_bytes()[..]);
        prop_assert!(decoded.data[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn prop_short_buffers_are_rejected(len in 0usize..QUANTUM_RECORD_SIZE) {
        let bytes = vec![0u8; len];
        prop_assert_eq!(
            QuantumRecord::decode(&bytes).unwrap_err(),
            RecordError::Truncated { record: "quantum", expected: QUANTUM_RECORD_SIZE, actual: len }
        );
    }
}

#[test]
fn test_catalog_encodes_into_records() {
    let emulator = CapdEmulator::default();
    let handle = emulator.search_devices()[0].handle;
    emulator.open_device(handle);

    let device = DeviceRecord::from(&emulator.search_devices()[0]);
    assert_eq!(DeviceRecord::decode(&device.encode()).unwrap(), device);

    for module in emulator.search_modules(handle) {
        let record = ModuleRecord::from(&module);
        assert_eq!(ModuleRecord::decode(&record.encode()).unwrap(), record);

        for parameter in emulator.get_module_params(handle, module.id) {
            let record = ParameterRecord::from(&parameter);
            assert_eq!(ParameterRecord::decode(&record.encode()).unwrap(), record);
        }
    }
}

#[test]
fn test_cyrillic_description_uses_one_byte_per_char() {
    let record = DeviceRecord {
        handle: 1,
        version: 3,
        description: "Эмулятор CAPD v1.0.0.0".to_string(),
    };
    let bytes = record.encode();
    assert_eq!(bytes[5] as usize, record.description.chars().count());
    assert_eq!(&bytes[6..6 + bytes[5] as usize], ansi::encode(&record.description).as_slice());
}

#[test]
fn test_dac_acknowledgement_record() {
    let record = QuantumRecord::from(&Quantum::state(ModuleType::Pulse, Command::MsgDacOps, &[1]));
    assert_eq!(&record.encode()[..5], &[4, 255, 1, 0, 1]);
}
