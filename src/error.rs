// src/error.rs
//! Unified error handling for the CAPD emulator
//!
//! Domain operations (routing, commands, start/stop, polling) never fail: unknown
//! addresses fall back to the null module and unknown opcodes are ignored. The
//! types below only cover infrastructure failures: configuration loading,
//! decoding malformed legacy records and spawning scheduler threads.

use crate::hal::ModuleType;
use thiserror::Error;

/// Result alias used across the crate
pub type EmulatorResult<T> = Result<T, EmulatorError>;

/// Top-level error type
#[derive(Debug, Error)]
pub enum EmulatorError {
    /// Configuration could not be loaded or failed validation
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A legacy binary record could not be decoded
    #[error("legacy record error: {0}")]
    Record(#[from] RecordError),

    /// The operating system refused to start a sampling thread
    #[error("failed to spawn sampling thread for {module:?} module: {source}")]
    SchedulerSpawn {
        /// Module whose scheduler failed to start
        module: ModuleType,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Layered sources could not be read or deserialized
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Configuration could not be written back as TOML
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Exported configuration could not be written
    #[error("failed to write configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parsed but is inconsistent
    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Legacy record decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Input buffer shorter than the fixed record size
    #[error("{record} record truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Record kind
        record: &'static str,
        /// Fixed record size
        expected: usize,
        /// Bytes available
        actual: usize,
    },
}
