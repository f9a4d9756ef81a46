// src/hal/simulation/mod.rs
//! Signal models of the emulated modules

pub mod context;
pub mod ecg;
pub mod ecg_spectrum;
pub mod pressure;
pub mod pulse;
pub mod signal_generator;

pub use context::{PressureContext, PulseContext, VitalSigns};
pub use ecg::EcgGenerator;
pub use pressure::PressureGenerator;
pub use pulse::PulseGenerator;
pub use signal_generator::SignalGenerator;
