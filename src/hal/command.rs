// src/hal/command.rs
//! One-byte command vocabulary of the device
//!
//! `Op*` codes travel host to device, `Msg*` codes travel device to host as
//! the payload of state events. The numbering is fixed by the hardware
//! protocol and must not be reordered.

use serde::{Deserialize, Serialize};

macro_rules! commands {
    (@operation op) => { true };
    (@operation msg) => { false };
    ($($kind:ident $name:ident = $code:literal => $description:literal,)+) => {
        /// Device command opcode
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[repr(u8)]
        pub enum Command {
            $(
                #[doc = $description]
                $name = $code,
            )+
        }

        impl Command {
            /// Every known opcode in wire order
            pub const ALL: &'static [Command] = &[$(Command::$name,)+];

            /// Opcode for a wire byte, `None` for bytes outside the table
            pub fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some(Command::$name),)+
                    _ => None,
                }
            }

            /// Human-readable meaning of the opcode
            pub fn description(self) -> &'static str {
                match self {
                    $(Command::$name => $description,)+
                }
            }

            /// Host-to-device operation (as opposed to a device notification)
            pub fn is_operation(self) -> bool {
                match self {
                    $(Command::$name => commands!(@operation $kind),)+
                }
            }
        }
    };
}

commands! {
    msg MsgDacOps = 0 => "DAC level changed",
    msg MsgAdcOverflow = 1 => "ADC channel overflow",
    msg MsgAdcFreqSet = 2 => "ADC frequency set",
    msg MsgCmdNotPass = 3 => "Command failed after three attempts",
    op OpPumpOn = 4 => "Switch pump on",
    op OpPumpOff = 5 => "Switch pump off",
    op OpCmpReset = 6 => "Reset comparator",
    op OpGateOn = 7 => "Open valve",
    op OpGateOff = 8 => "Close valve",
    op OpMux00 = 9 => "Switch multiplexer (DC+AC)",
    op OpMux01 = 10 => "Switch multiplexer (DC+AC from ground)",
    op OpMux10 = 11 => "Switch multiplexer (overload)",
    op OpMux11 = 12 => "Switch multiplexer (AC)",
    op OpCheckPBtn = 13 => "Poll push button",
    op OpPulsRedOn = 14 => "Switch red emitter on",
    op OpPulsIRedOn = 15 => "Switch infrared emitter on",
    op OpPulsOff0 = 16 => "Switch emitters off with zeros",
    op OpPulsOff1 = 17 => "Switch emitters off with ones",
    op OpAdcReset = 18 => "Reset ADC",
    op OpComReset = 19 => "Reset communication",
    op OpComInIicCheck = 20 => "Check I2C bus",
    msg MsgPBtnPress = 21 => "Button pressed (pump on)",
    msg MsgPBtnDepress = 22 => "Button released (pump off)",
    msg MsgGateOn = 23 => "Valve opened",
    msg MsgGateOff = 24 => "Valve closed",
    msg MsgPumpOn = 25 => "Pump on",
    msg MsgPumpOff = 26 => "Pump off",
    msg MsgCmpOver = 27 => "Comparator tripped",
    msg MsgCmpReset = 28 => "Comparator reset",
    msg MsgMuxOn00 = 29 => "Multiplexer on (DC+AC)",
    msg MsgMuxOn01 = 30 => "Multiplexer on (DC+AC from ground)",
    msg MsgMuxOn10 = 31 => "Multiplexer on (overload)",
    msg MsgMuxOn11 = 32 => "Multiplexer on (AC)",
    msg MsgRedBeamOn = 33 => "Red emitter on",
    msg MsgIrBeamOn = 34 => "Infrared emitter on",
    msg MsgBeamsOff0 = 35 => "Emitters off with zeros",
    msg MsgBeamsOff1 = 36 => "Emitters off with ones",
    msg MsgLossSamples = 37 => "Samples lost in channel",
    msg MsgAdcStart = 38 => "ADC started",
    msg MsgAdcStop = 39 => "ADC stopped",
    msg MsgBadStopUsb = 40 => "No data from block (5 s timeout)",
    msg MsgLostSynchro = 41 => "Data stream synchronisation lost",
    msg MsgBadStopAdc = 42 => "Sample stream stopped abnormally (1 s timeout)",
    op OpShimPump = 43 => "Set pump PWM",
    op OpShimValve = 44 => "Set valve PWM",
    msg MsgShimPump = 45 => "Pump PWM set",
    op OpSendPulseGain = 46 => "Set pulse gain",
    msg MsgSendPulseGain = 47 => "Pulse gain set",
    op OpPulseAutoGainMode = 48 => "Toggle pulse auto-gain",
}

impl Command {
    /// Wire byte of the opcode
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Command {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Command::from_code(code).ok_or(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_dense_and_ordered() {
        assert_eq!(Command::ALL.len(), 49);
        for (index, command) in Command::ALL.iter().enumerate() {
            assert_eq!(command.code() as usize, index);
            assert_eq!(Command::from_code(index as u8), Some(*command));
        }
    }

    #[test]
    fn test_unknown_codes_are_rejected() {
        assert_eq!(Command::from_code(49), None);
        assert_eq!(Command::try_from(200u8), Err(200));
    }

    #[test]
    fn test_pressure_opcodes() {
        assert_eq!(Command::OpPumpOn.code(), 4);
        assert_eq!(Command::OpGateOff.code(), 8);
        assert_eq!(Command::MsgGateOff.code(), 24);
        assert_eq!(Command::MsgPumpOn.code(), 25);
        assert_eq!(Command::MsgPumpOff.code(), 26);
    }

    #[test]
    fn test_direction() {
        assert!(Command::OpAdcReset.is_operation());
        assert!(!Command::MsgLostSynchro.is_operation());
        assert_eq!(Command::OpGateOn.description(), "Open valve");
    }
}
