// src/hal/module.rs
//! Emulated acquisition modules
//!
//! A module couples catalog metadata with a signal generator and, while
//! running, a sampling thread. Commands go to the generator first and are
//! then acknowledged according to the module type. Stopping only signals the
//! thread; stopped threads are kept until they are joined by the next start,
//! by [`Module::join`] or when the module is dropped.

use crate::acquisition::EventQueue;
use crate::config::constants::{module, parameter};
use crate::config::EmulatorConfig;
use crate::error::EmulatorResult;
use crate::hal::command::Command;
use crate::hal::scheduler::{ModuleThread, SamplingPlan};
use crate::hal::simulation::{PressureContext, PulseContext, SignalGenerator};
use crate::hal::types::{ModuleInfo, ModuleParameter, ModuleState, ModuleType, Quantum};
use crate::utils::time::TimeProvider;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Shared collaborators every module is wired to
#[derive(Clone)]
pub struct ModuleEnvironment {
    /// Emulator configuration
    pub config: Arc<EmulatorConfig>,
    /// Device event queue
    pub queue: Arc<EventQueue>,
    /// Clock the sampling threads pace against
    pub clock: Arc<dyn TimeProvider>,
    /// Pulse rate source
    pub pulse_context: Arc<dyn PulseContext>,
    /// Pressure thresholds and display
    pub pressure_context: Arc<dyn PressureContext>,
}

/// Static catalog data of one module type
struct CatalogEntry {
    channel_count: u8,
    version: u32,
    serial: u32,
    description: &'static str,
    parameters: Vec<ModuleParameter>,
}

fn catalog_entry(module_type: ModuleType) -> CatalogEntry {
    use parameter::*;

    match module_type {
        ModuleType::Pressure => CatalogEntry {
            channel_count: 1,
            version: module::PRESSURE_VERSION,
            serial: module::PRESSURE_SERIAL,
            description: "Pressure module",
            parameters: vec![
                ModuleParameter::new(ADC_BIT_DEPTH, 24.0, "ADC bit depth"),
                ModuleParameter::new(ADC_REFERENCE_LEVEL, 10.0, "ADC reference level"),
                ModuleParameter::new(PULSE_CHANNEL_GAIN, 132.00047302, "Pulse channel gain"),
                ModuleParameter::new(PULSE_CHANNEL_GAIN_AUX, 132.00047302, "Pulse channel gain"),
                ModuleParameter::new(PRESSURE_SENSITIVITY, 0.00079999997979, "Pressure sensor sensitivity"),
                ModuleParameter::new(PRESSURE_BLOCK_TYPE, 1.0, "Pressure block type"),
                ModuleParameter::new(CURRENT_FREQUENCY, 2232.0, "Current sample rate"),
            ],
        },
        ModuleType::Pulse => CatalogEntry {
            channel_count: 1,
            version: module::PULSE_VERSION,
            serial: module::PULSE_SERIAL,
            description: "Pulse module",
            parameters: vec![
                ModuleParameter::new(ADC_BIT_DEPTH, 22.0, "ADC bit depth"),
                ModuleParameter::new(ADC_REFERENCE_LEVEL, 5.0, "ADC reference level"),
                ModuleParameter::new(PULSE_CHANNEL_GAIN, 149.0191803, "Pulse channel gain"),
                // zero here means the module has no hardware integrator
                ModuleParameter::new(DAC_BIT_DEPTH, 8.0, "DAC bit depth"),
                ModuleParameter::new(DAC_REFERENCE_LEVEL, 5.0, "DAC reference level"),
                ModuleParameter::new(DAC_TO_ADC_GAIN, 10.1, "DAC to ADC gain"),
                ModuleParameter::new(CURRENT_FREQUENCY, 2232.0, "Current sample rate"),
            ],
        },
        ModuleType::Ecg => CatalogEntry {
            channel_count: module::ECG_CHANNEL_COUNT,
            version: module::ECG_VERSION,
            serial: module::ECG_SERIAL,
            description: "ECG module",
            parameters: vec![
                ModuleParameter::new(ADC_BIT_DEPTH, 24.0, "ADC bit depth"),
                ModuleParameter::new(ADC_REFERENCE_LEVEL, 2.4, "ADC reference level"),
                ModuleParameter::new(CURRENT_FREQUENCY, 1000.0, "Current sample rate"),
            ],
        },
        _ => CatalogEntry {
            channel_count: 1,
            version: module::NULL_VERSION,
            serial: module::NULL_SERIAL,
            description: module::NULL_DESCRIPTION,
            parameters: Vec::new(),
        },
    }
}

/// One emulated module
pub struct Module {
    module_type: ModuleType,
    channel_count: u8,
    version: u32,
    serial: u32,
    description: String,
    parameters: Vec<ModuleParameter>,
    frequency_hz: AtomicU32,
    max_frequency_hz: u32,
    generator: Arc<SignalGenerator>,
    thread: Mutex<Option<ModuleThread>>,
    stopped_threads: Mutex<Vec<ModuleThread>>,
    queue: Arc<EventQueue>,
    clock: Arc<dyn TimeProvider>,
    pace_quantum: Duration,
}

impl Module {
    /// Build a module of `module_type` from the catalog
    ///
    /// Types without a model (`Combi`, `Carcas`, `Interface`) are built as
    /// null modules with their own type tag.
    pub fn new(module_type: ModuleType, environment: &ModuleEnvironment) -> Self {
        let entry = catalog_entry(module_type);
        let generator = SignalGenerator::for_module(
            module_type,
            &environment.config,
            &entry.parameters,
            Arc::clone(&environment.pulse_context),
            Arc::clone(&environment.pressure_context),
        );

        Self {
            module_type,
            channel_count: entry.channel_count,
            version: entry.version,
            serial: entry.serial,
            description: entry.description.to_string(),
            parameters: entry.parameters,
            frequency_hz: AtomicU32::new(environment.config.scheduler.default_frequency_hz),
            max_frequency_hz: environment.config.scheduler.max_frequency_hz,
            generator: Arc::new(generator),
            thread: Mutex::new(None),
            stopped_threads: Mutex::new(Vec::new()),
            queue: Arc::clone(&environment.queue),
            clock: Arc::clone(&environment.clock),
            pace_quantum: Duration::from_micros(environment.config.scheduler.pace_quantum_us),
        }
    }

    /// Module address, equal to the module type code
    pub fn id(&self) -> u8 {
        self.module_type.code()
    }

    /// Catalog type of the module
    pub fn module_type(&self) -> ModuleType {
        self.module_type
    }

    /// Channels emitted per tick
    pub fn channel_count(&self) -> u8 {
        self.channel_count
    }

    /// Calibration parameters
    pub fn parameters(&self) -> &[ModuleParameter] {
        &self.parameters
    }

    /// Signal model driving the module
    pub fn generator(&self) -> &SignalGenerator {
        &self.generator
    }

    /// Search result describing the module
    pub fn info(&self) -> ModuleInfo {
        ModuleInfo {
            id: self.id(),
            module_type: self.module_type.code(),
            channel_count: self.channel_count,
            gain_factor: 0.0,
            spline_level: 0,
            version: self.version,
            serial: self.serial,
            description: self.description.clone(),
        }
    }

    /// Sampling rate for the next start
    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz.load(Ordering::Relaxed)
    }

    /// Running while a sampling thread is active
    pub fn state(&self) -> ModuleState {
        if self.thread.lock().is_some() {
            ModuleState::Running
        } else {
            ModuleState::Stopped
        }
    }

    /// Forward `command` to the generator, then acknowledge it
    pub fn execute(&self, command: Command, params: &[u8]) {
        debug!(module = ?self.module_type, ?command, params = params.len(), "executing command");
        self.generator.execute(command);

        if let Some(message) = self.acknowledgement(command) {
            self.queue.push(Quantum::state(self.module_type, message, &[]));
        }
    }

    fn acknowledgement(&self, command: Command) -> Option<Command> {
        match (self.module_type, command) {
            (ModuleType::Pressure, Command::OpGateOff) => Some(Command::MsgGateOff),
            (ModuleType::Pressure, Command::OpPumpOn) => Some(Command::MsgPumpOn),
            (ModuleType::Pressure, Command::OpPumpOff) => Some(Command::MsgPumpOff),
            _ => None,
        }
    }

    /// Set the sampling rate used from the next start on
    ///
    /// Zero is ignored and rates above the configured maximum are clamped.
    pub fn set_frequency(&self, frequency_hz: u32) {
        if frequency_hz == 0 {
            warn!(module = ?self.module_type, "ignoring zero sampling frequency");
            return;
        }
        let frequency_hz = if frequency_hz > self.max_frequency_hz {
            warn!(
                module = ?self.module_type,
                requested = frequency_hz,
                max_frequency_hz = self.max_frequency_hz,
                "sampling frequency clamped"
            );
            self.max_frequency_hz
        } else {
            frequency_hz
        };
        self.frequency_hz.store(frequency_hz, Ordering::Relaxed);
        debug!(module = ?self.module_type, frequency_hz, "sampling frequency set");
    }

    /// Prepare the generator and launch sampling; no-op when running
    pub fn start(&self) -> EmulatorResult<()> {
        if self.module_type == ModuleType::Null {
            return Ok(());
        }

        let mut slot = self.thread.lock();
        if slot.is_some() {
            return Ok(());
        }

        // A previous session may still be finishing its last tick.
        self.join_stopped();

        let frequency_hz = self.frequency_hz();
        self.generator.prepare(frequency_hz);

        let plan = SamplingPlan {
            module_type: self.module_type,
            frequency_hz,
            pace_quantum: self.pace_quantum,
            clock: Arc::clone(&self.clock),
        };
        match ModuleThread::start(plan, Arc::clone(&self.generator), Arc::clone(&self.queue)) {
            Ok(thread) => {
                *slot = Some(thread);
                info!(module = ?self.module_type, frequency_hz, "module started");
                Ok(())
            }
            Err(err) => {
                self.generator.release();
                Err(err)
            }
        }
    }

    /// Signal the sampling thread; no-op when stopped
    ///
    /// The thread releases the generator session itself once its last tick
    /// is out.
    pub fn stop(&self) {
        let Some(thread) = self.thread.lock().take() else {
            return;
        };

        thread.stop();
        self.stopped_threads.lock().push(thread);
        info!(module = ?self.module_type, "module stopped");
    }

    /// Stop and wait until no sampling thread of this module is alive
    pub fn join(&self) {
        self.stop();
        self.join_stopped();
    }

    fn join_stopped(&self) {
        let threads: Vec<ModuleThread> = std::mem::take(&mut *self.stopped_threads.lock());
        for mut thread in threads {
            thread.join();
        }
    }

    /// Whether the module accepts DAC operations
    pub fn supports_dac(&self) -> bool {
        self.module_type == ModuleType::Pulse
    }

    /// Set the DAC output level; only acknowledged, never modelled
    pub fn set_dac_level(&self, level: u8) -> bool {
        debug!(module = ?self.module_type, level, "DAC level requested");
        self.acknowledge_dac();
        true
    }

    /// Zero the DAC output; only acknowledged, never modelled
    pub fn set_zero_dac(&self) -> bool {
        debug!(module = ?self.module_type, "DAC zero requested");
        self.acknowledge_dac();
        true
    }

    fn acknowledge_dac(&self) {
        if self.supports_dac() {
            self.queue.push(Quantum::state(self.module_type, Command::MsgDacOps, &[1]));
        }
    }
}

impl Drop for Module {
    fn drop(&mut self) {
        self.join();
    }
}
