// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Novation Launchpad Mini
//!
//! 8x8 square pads plus one row of 8 round buttons on top and one
//! column of 8 round buttons on the right side.

use std::borrow::Cow;

use crate::{DeviceDescriptor, MidiDeviceDescriptor};

mod input;
pub use self::input::{translate_coordinate, try_decode_midi_input, InputGateway};

mod output;
pub use self::output::{lighting_command, OutputGateway, RESET_MESSAGE};

pub const MIDI_DEVICE_DESCRIPTOR: &MidiDeviceDescriptor = &MidiDeviceDescriptor {
    device: DeviceDescriptor {
        vendor_name: Cow::Borrowed("Novation"),
        product_name: Cow::Borrowed("Launchpad Mini"),
    },
    port_name_prefix: "Launchpad Mini",
};

pub const DEVICE_DESCRIPTOR: &DeviceDescriptor = &MIDI_DEVICE_DESCRIPTOR.device;

const MIDI_STATUS_NOTE_ON: u8 = 0x90;
const MIDI_STATUS_CC: u8 = 0xb0;

/// Decimal 176, i.e. a control change on the first channel.
const MIDI_STATUS_CC_CHANNEL_1: u8 = MIDI_STATUS_CC;

/// Number of note indexes per row of pads.
const MIDI_ROW_STRIDE: u8 = 16;

/// Control change index of the first round button on top.
const MIDI_META_ROW_CC_BASE: u8 = 0x68;

/// The row of round buttons on top.
pub const META_ROW: u8 = 8;

/// Round buttons on top that are received as notes within this
/// row index, shifted by 8 columns.
const MIDI_META_ROW_SENTINEL: u8 = 6;
