// src/config/loader.rs
//! Layered configuration loader
//!
//! Sources, lowest priority first: built-in defaults, each TOML file in
//! order (missing files are skipped), then environment variables such as
//! `CAPD_EMULATOR__SCHEDULER__DEFAULT_FREQUENCY_HZ=2000`.

use super::EmulatorConfig;
use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default environment variable prefix
pub const ENV_PREFIX: &str = "CAPD_EMULATOR";

/// Separator between prefix and nested keys
const ENV_SEPARATOR: &str = "__";

/// File looked up in the working directory when no paths are given
pub const DEFAULT_CONFIG_FILE: &str = "capd_emulator.toml";

/// Layered configuration loader
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Loader reading the default file from the working directory
    pub fn new() -> Self {
        Self::with_paths(vec![PathBuf::from(DEFAULT_CONFIG_FILE)])
    }

    /// Loader reading `paths` in order, later files overriding earlier ones
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            config_paths: paths,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use another environment variable prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Files read, in override order
    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    /// Merge all sources and validate the result
    pub fn load(&self) -> Result<EmulatorConfig, ConfigError> {
        let mut builder = Config::builder();
        for path in &self.config_paths {
            debug!(path = %path.display(), exists = path.exists(), "adding configuration file");
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml).required(false));
        }
        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config: EmulatorConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        info!(
            files = self.config_paths.len(),
            frequency_hz = config.scheduler.default_frequency_hz,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Write `config` as TOML to `path`
    pub fn export<P: AsRef<Path>>(config: &EmulatorConfig, path: P) -> Result<(), ConfigError> {
        let content = config.to_toml_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
