//! CAPD emulator: a software stand-in for the CAPD multi-module acquisition device
//!
//! The emulated device carries a pressure module (cuff pump and valve), a
//! pulse module and a nine-lead ECG module. Each running module samples its
//! signal model on a dedicated thread at its configured rate and pushes one
//! event per channel into a shared queue that the host drains by polling.
//!
//! - Device and module lifecycle with the hardware command protocol
//! - Real-time sampling threads paced against an injectable clock
//! - Pressure integrator, pulse sinusoid and harmonic ECG models
//! - Fixed-layout binary records for native callers
//! - Layered TOML and environment configuration
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use capd_emulator::{CapdEmulator, EmulatorConfig};
//! use capd_emulator::hal::Command;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let emulator = CapdEmulator::new(EmulatorConfig::default());
//!     let handle = emulator.search_devices()[0].handle;
//!
//!     emulator.open_device(handle);
//!     emulator.send_command(handle, 3, Command::OpPumpOn.code(), &[]);
//!     emulator.start_module(handle, 3)?;
//!
//!     for _ in 0..10 {
//!         let event = emulator.poll_event(handle);
//!         if event.is_actual {
//!             println!("module {} channel {}: {:?}", event.module_id, event.channel_id, event.data);
//!         }
//!     }
//!
//!     emulator.close_device(handle);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod acquisition;
pub mod api;
pub mod config;
pub mod error;
pub mod hal;
pub mod legacy;
pub mod processing;
pub mod utils;

// Re-export commonly used types for convenience
pub use api::{ActivityListener, CapdEmulator, PolledQuantum};
pub use config::{ConfigLoader, EmulatorConfig};
pub use error::{ConfigError, EmulatorError, EmulatorResult, RecordError};
pub use hal::{
    Command, DataType, Device, DeviceInfo, ModuleInfo, ModuleParameter, ModuleState, ModuleType, Quantum,
    VitalSigns,
};
pub use utils::time::{current_timestamp_nanos, TimeProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: "CAPD multi-module acquisition device emulator".to_string(),
        modules: hal::MODULE_CATALOG.to_vec(),
    }
}

/// Library version information
#[derive(Debug, Clone)]
pub struct VersionInfo {
    /// Library name
    pub name: String,
    /// Version string
    pub version: String,
    /// Description
    pub description: String,
    /// Module types an opened device carries
    pub modules: Vec<ModuleType>,
}
