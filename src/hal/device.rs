// src/hal/device.rs
//! The emulated device
//!
//! Owns the module set and the event queue every module writes into. All
//! address-based operations resolve their target through [`Device::module`],
//! which falls back to a null module when the address is unknown or the
//! device is closed, so routing never fails.

use crate::acquisition::{EventQueue, QueueStats};
use crate::config::EmulatorConfig;
use crate::error::EmulatorResult;
use crate::hal::command::Command;
use crate::hal::module::{Module, ModuleEnvironment};
use crate::hal::simulation::{PressureContext, PulseContext, VitalSigns};
use crate::hal::types::{DeviceInfo, ModuleInfo, ModuleParameter, ModuleState, ModuleType, Quantum};
use crate::utils::time::{MonotonicTimeProvider, TimeProvider};
use parking_lot::RwLock;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Module types instantiated by [`Device::open`], in address order
pub const MODULE_CATALOG: [ModuleType; 3] = [ModuleType::Pressure, ModuleType::Pulse, ModuleType::Ecg];

/// Emulated CAPD device
pub struct Device {
    handle: u32,
    version: u8,
    description: String,
    modules: RwLock<Option<Vec<Arc<Module>>>>,
    null_module: Arc<Module>,
    environment: ModuleEnvironment,
}

impl Device {
    /// Device with a monotonic clock and default vital signs
    pub fn new(config: EmulatorConfig) -> Self {
        let vitals = Arc::new(VitalSigns::default());
        Self::with_collaborators(config, Arc::new(MonotonicTimeProvider::new()), vitals.clone(), vitals)
    }

    /// Device wired to an explicit clock and visual-context collaborators
    pub fn with_collaborators(
        config: EmulatorConfig,
        clock: Arc<dyn TimeProvider>,
        pulse_context: Arc<dyn PulseContext>,
        pressure_context: Arc<dyn PressureContext>,
    ) -> Self {
        let handle = config
            .device
            .handle
            .unwrap_or_else(|| rand::thread_rng().gen_range(0..i32::MAX as u32));
        let queue = Arc::new(EventQueue::new(config.scheduler.backlog_warning_events));
        let environment = ModuleEnvironment {
            queue,
            clock,
            pulse_context,
            pressure_context,
            config: Arc::new(config),
        };

        Self {
            handle,
            version: environment.config.device.version,
            description: environment.config.device.description.clone(),
            modules: RwLock::new(None),
            null_module: Arc::new(Module::new(ModuleType::Null, &environment)),
            environment,
        }
    }

    /// Opaque handle, stable for the lifetime of the device
    pub fn handle(&self) -> u32 {
        self.handle
    }

    /// Search result describing the device
    pub fn info(&self) -> DeviceInfo {
        DeviceInfo {
            handle: self.handle,
            version: self.version,
            description: self.description.clone(),
        }
    }

    /// Whether the device is open
    pub fn is_active(&self) -> bool {
        self.modules.read().is_some()
    }

    /// Populate the module catalog; no-op when already open
    pub fn open(&self) {
        let mut modules = self.modules.write();
        if modules.is_some() {
            return;
        }

        *modules = Some(
            MODULE_CATALOG
                .iter()
                .map(|&module_type| Arc::new(Module::new(module_type, &self.environment)))
                .collect(),
        );
        info!(handle = self.handle, modules = MODULE_CATALOG.len(), "device opened");
    }

    /// Stop every module, wait for their threads, then discard them; no-op when closed
    pub fn close(&self) {
        let Some(modules) = self.modules.write().take() else {
            return;
        };

        for module in &modules {
            module.stop();
        }
        for module in &modules {
            module.join();
        }
        info!(handle = self.handle, "device closed");
    }

    /// Module at `address`, or the null module
    pub fn module(&self, address: u8) -> Arc<Module> {
        self.modules
            .read()
            .as_ref()
            .and_then(|modules| modules.iter().find(|m| m.id() == address).cloned())
            .unwrap_or_else(|| Arc::clone(&self.null_module))
    }

    /// Metadata of the open modules (empty while closed)
    pub fn modules_info(&self) -> Vec<ModuleInfo> {
        self.modules
            .read()
            .as_ref()
            .map(|modules| modules.iter().map(|m| m.info()).collect())
            .unwrap_or_default()
    }

    /// Calibration parameters of the module at `address`
    pub fn module_params(&self, address: u8) -> Vec<ModuleParameter> {
        self.module(address).parameters().to_vec()
    }

    /// Scheduler state of the module at `address`
    pub fn module_state(&self, address: u8) -> ModuleState {
        self.module(address).state()
    }

    /// Route a raw opcode; bytes outside the opcode table are logged and ignored
    pub fn send_command(&self, address: u8, code: u8, params: &[u8]) {
        match Command::from_code(code) {
            Some(command) => {
                debug!(address, ?command, "routing command");
                self.module(address).execute(command, params);
            }
            None => warn!(address, code, "ignoring unknown command"),
        }
    }

    /// Sampling rate of the module at `address`, applied at its next start
    pub fn set_frequency(&self, address: u8, frequency_hz: u32) {
        self.module(address).set_frequency(frequency_hz);
    }

    /// Start the module at `address`
    pub fn start_module(&self, address: u8) -> EmulatorResult<()> {
        self.module(address).start()
    }

    /// Stop the module at `address`
    pub fn stop_module(&self, address: u8) {
        self.module(address).stop();
    }

    /// Accepted for every address; only DAC-capable modules acknowledge
    pub fn set_dac_level(&self, address: u8, level: u8) -> bool {
        self.module(address).set_dac_level(level)
    }

    /// Zero the DAC of the module at `address`
    pub fn set_zero_dac(&self, address: u8) -> bool {
        self.module(address).set_zero_dac()
    }

    /// Dequeue one event without blocking
    pub fn poll_event(&self) -> Option<Quantum> {
        self.environment.queue.try_pop()
    }

    /// Events produced but not yet polled
    pub fn pending_events(&self) -> usize {
        self.environment.queue.len()
    }

    /// Traffic counters of the event queue
    pub fn queue_stats(&self) -> QueueStats {
        self.environment.queue.stats()
    }

    /// Configuration the device was built from
    pub fn config(&self) -> &EmulatorConfig {
        &self.environment.config
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        self.close();
    }
}
