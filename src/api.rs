// src/api.rs
//! Consumer-facing device API
//!
//! A thin, permissive facade over the single emulated [`Device`]. Handles are
//! accepted whatever their value, unknown addresses and opcodes are no-ops,
//! and polling an empty queue returns a null event flagged as not actual.
//! Every call except polling is announced to the subscribed
//! [`ActivityListener`]s as one human-readable line.

use crate::config::EmulatorConfig;
use crate::error::EmulatorResult;
use crate::hal::{
    Command, Device, DeviceInfo, ModuleInfo, ModuleParameter, Quantum, VitalSigns,
};
use crate::utils::time::{MonotonicTimeProvider, TimeProvider};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::warn;

/// Observer of facade activity
pub trait ActivityListener: Send + Sync {
    /// Called with one line describing the facade call
    fn on_command_received(&self, description: &str);
}

/// Event as handed to the consumer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolledQuantum {
    /// Module type code of the emitter
    pub module_id: u8,
    /// Channel, or 255 for module-level events
    pub channel_id: u8,
    /// Event kind code
    pub data_type: u8,
    /// Raw payload
    pub data: Vec<u8>,
    /// `false` when the queue was empty and this is the null event
    pub is_actual: bool,
}

impl PolledQuantum {
    fn new(quantum: Quantum, is_actual: bool) -> Self {
        Self {
            module_id: quantum.module_type.code(),
            channel_id: quantum.channel_id,
            data_type: quantum.data_type.code(),
            data: quantum.data,
            is_actual,
        }
    }
}

/// Host-facing entry point owning the emulated device
pub struct CapdEmulator {
    device: Device,
    vitals: Arc<VitalSigns>,
    listeners: RwLock<Vec<Arc<dyn ActivityListener>>>,
}

impl CapdEmulator {
    /// Emulator paced by the monotonic clock
    pub fn new(config: EmulatorConfig) -> Self {
        Self::with_clock(config, Arc::new(MonotonicTimeProvider::new()))
    }

    /// Emulator whose sampling threads pace against `clock`
    pub fn with_clock(config: EmulatorConfig, clock: Arc<dyn TimeProvider>) -> Self {
        let vitals = Arc::new(VitalSigns::default());
        Self {
            device: Device::with_collaborators(config, clock, vitals.clone(), vitals.clone()),
            vitals,
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// The emulated device
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Vital signs driving the pulse and pressure models
    pub fn vital_signs(&self) -> &Arc<VitalSigns> {
        &self.vitals
    }

    /// Register `listener`; subscribing the same listener twice has no effect
    pub fn subscribe(&self, listener: Arc<dyn ActivityListener>) {
        let mut listeners = self.listeners.write();
        if !listeners.iter().any(|l| same_listener(l, &listener)) {
            listeners.push(listener);
        }
    }

    /// Remove `listener`
    pub fn unsubscribe(&self, listener: &Arc<dyn ActivityListener>) {
        self.listeners.write().retain(|l| !same_listener(l, listener));
    }

    fn notify(&self, description: &str) {
        for listener in self.listeners.read().iter() {
            listener.on_command_received(description);
        }
    }

    fn check_handle(&self, handle: u32) {
        if handle != self.device.handle() {
            warn!(handle, device = self.device.handle(), "unknown device handle, using the emulated device");
        }
    }

    /// The single emulated device
    pub fn search_devices(&self) -> Vec<DeviceInfo> {
        self.notify("SearchDevices");
        vec![self.device.info()]
    }

    /// Modules of the device, empty while it is closed
    pub fn search_modules(&self, handle: u32) -> Vec<ModuleInfo> {
        self.notify("SearchModules");
        self.check_handle(handle);
        self.device.modules_info()
    }

    /// Calibration parameters of the module at `address`
    pub fn get_module_params(&self, handle: u32, address: u8) -> Vec<ModuleParameter> {
        self.notify("GetModuleParams");
        self.check_handle(handle);
        self.device.module_params(address)
    }

    /// Open the device
    pub fn open_device(&self, handle: u32) {
        self.notify("OpenDevice");
        self.check_handle(handle);
        self.device.open();
    }

    /// Close the device, stopping every module
    pub fn close_device(&self, handle: u32) {
        self.notify("CloseDevice");
        self.check_handle(handle);
        self.device.close();
    }

    /// Execute a raw opcode on the module at `address`
    pub fn send_command(&self, handle: u32, address: u8, command: u8, params: &[u8]) {
        self.check_handle(handle);
        match Command::from_code(command) {
            Some(known) => self.notify(&format!("SendCommand {:?}", known)),
            None => self.notify(&format!("Unknown command {}", command)),
        }
        self.device.send_command(address, command, params);
    }

    /// Same as [`CapdEmulator::send_command`]; the device executes commands synchronously
    pub fn send_command_async(&self, handle: u32, address: u8, command: u8, params: &[u8]) {
        self.send_command(handle, address, command, params);
    }

    /// Non-positive rates are ignored
    pub fn set_adc_frequency(&self, handle: u32, address: u8, frequency_hz: i32) {
        self.notify("SetAdcFrequency");
        self.check_handle(handle);
        match u32::try_from(frequency_hz) {
            Ok(hz) if hz > 0 => self.device.set_frequency(address, hz),
            _ => warn!(address, frequency_hz, "ignoring non-positive sampling frequency"),
        }
    }

    /// Start sampling; fails only when the thread cannot be spawned
    pub fn start_module(&self, handle: u32, address: u8) -> EmulatorResult<()> {
        self.notify("StartModule");
        self.check_handle(handle);
        self.device.start_module(address)
    }

    /// Stop sampling without waiting for the thread
    pub fn stop_module(&self, handle: u32, address: u8) {
        self.notify("StopModule");
        self.check_handle(handle);
        self.device.stop_module(address);
    }

    /// Next queued event, or the null event with `is_actual == false`
    pub fn poll_event(&self, handle: u32) -> PolledQuantum {
        self.check_handle(handle);
        match self.device.poll_event() {
            Some(quantum) => PolledQuantum::new(quantum, true),
            None => PolledQuantum::new(Quantum::null(), false),
        }
    }

    /// Set the DAC level; always accepted
    pub fn set_dac_level(&self, handle: u32, address: u8, level: u8) -> bool {
        self.notify("SetDacLevel");
        self.check_handle(handle);
        self.device.set_dac_level(address, level)
    }

    /// Zero the DAC; always accepted
    pub fn set_zero_dac(&self, handle: u32, address: u8) -> bool {
        self.notify("SetZeroDac");
        self.check_handle(handle);
        self.device.set_zero_dac(address)
    }
}

impl Default for CapdEmulator {
    fn default() -> Self {
        Self::new(EmulatorConfig::default())
    }
}

fn same_listener(a: &Arc<dyn ActivityListener>, b: &Arc<dyn ActivityListener>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}
