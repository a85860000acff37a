// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! MIDI messages in and out of a grid controller.

use crate::{DeviceDescriptor, OutputResult, TimeStamp};

#[cfg(feature = "midir")]
mod midir;
#[cfg(feature = "midir")]
pub use self::midir::{MidiPortError, MidirDevice, MidirDeviceManager};

/// Identifies the ports of a device by their name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiDeviceDescriptor {
    pub device: DeviceDescriptor,

    /// Both the input and the output port names start with this prefix.
    pub port_name_prefix: &'static str,
}

impl MidiDeviceDescriptor {
    #[must_use]
    pub fn matches_port_name(&self, port_name: &str) -> bool {
        port_name.starts_with(self.port_name_prefix)
    }
}

/// Not a 3-byte channel message.
#[derive(Debug)]
pub struct MidiInputDecodeError;

/// Receives raw MIDI input messages.
///
/// Might be invoked from the driver thread of the MIDI backend.
pub trait MidiInputHandler: Send {
    /// Returns `true` if the message has been handled.
    #[must_use]
    fn handle_midi_input(&mut self, ts: TimeStamp, input: &[u8]) -> bool;
}

/// Sends raw MIDI output messages.
pub trait MidiOutputConnection {
    fn send_midi_output(&mut self, output: &[u8]) -> OutputResult<()>;
}
