// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

pub mod novation_launchpad_mini;

// Descriptors of supported MIDI grid controllers for auto-detection.
pub const MIDI_GRID_CONTROLLER_DESCRIPTORS: &[&crate::MidiDeviceDescriptor] =
    &[crate::devices::novation_launchpad_mini::MIDI_DEVICE_DESCRIPTOR];
