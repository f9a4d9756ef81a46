// src/utils/mod.rs
//! Common utilities: clocks and sample conversions

pub mod conversion;
pub mod time;

pub use conversion::{bytes_to_sample, pressure_gain, saturate_sample, sample_to_bytes};
pub use time::{
    current_timestamp_nanos, sample_period_nanos, MockTimeProvider, MonotonicTimeProvider, SystemTimeProvider,
    TimeProvider,
};
