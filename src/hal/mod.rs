// src/hal/mod.rs
//! Emulated hardware: device, modules, sampling threads and signal models

pub mod command;
pub mod device;
pub mod module;
pub mod scheduler;
pub mod simulation;
pub mod types;

pub use command::Command;
pub use device::{Device, MODULE_CATALOG};
pub use module::{Module, ModuleEnvironment};
pub use scheduler::{ModuleThread, SamplingPlan};
pub use simulation::{PressureContext, PulseContext, SignalGenerator, VitalSigns};
pub use types::*;
