// src/legacy/mod.rs
//! Binary compatibility layer for native callers

pub mod ansi;
pub mod records;

pub use records::{DeviceRecord, ModuleRecord, ParameterRecord, QuantumRecord};
