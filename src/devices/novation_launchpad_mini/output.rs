// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use super::{
    META_ROW, MIDI_META_ROW_CC_BASE, MIDI_ROW_STRIDE, MIDI_STATUS_CC, MIDI_STATUS_NOTE_ON,
};
use crate::{
    Color, LightingCommand, LightingOutput, MessageKind, MidiOutputConnection, OutputError,
    OutputResult,
};

/// Turns off all LEDs.
pub const RESET_MESSAGE: [u8; 3] = [MIDI_STATUS_CC, 0x00, 0x00];

/// Address the LED of a pad or button.
///
/// Both `column` and `row` must be less than 16.
#[must_use]
pub const fn lighting_command(column: u8, row: u8, color: Color) -> LightingCommand {
    debug_assert!(column < MIDI_ROW_STRIDE && row < MIDI_ROW_STRIDE);
    if row == META_ROW {
        LightingCommand::new(MessageKind::ControlChange, MIDI_META_ROW_CC_BASE + column, color)
    } else {
        LightingCommand::new(MessageKind::NoteOn, column + row * MIDI_ROW_STRIDE, color)
    }
}

const fn midi_status(kind: MessageKind) -> u8 {
    match kind {
        MessageKind::NoteOn => MIDI_STATUS_NOTE_ON,
        MessageKind::ControlChange => MIDI_STATUS_CC,
    }
}

/// Sends lighting commands through an attached MIDI connection.
#[allow(missing_debug_implementations)]
pub struct OutputGateway<C> {
    midi_output_connection: Option<C>,
}

impl<C> OutputGateway<C> {
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.midi_output_connection.is_some()
    }

    /// Returns the previously attached connection, if any.
    pub fn attach(&mut self, midi_output_connection: C) -> Option<C> {
        let detached = self.midi_output_connection.replace(midi_output_connection);
        if detached.is_some() {
            log::debug!("Replaced MIDI output connection");
        }
        detached
    }

    pub fn detach(&mut self) -> Option<C> {
        self.midi_output_connection.take()
    }
}

impl<C> Default for OutputGateway<C> {
    fn default() -> Self {
        Self {
            midi_output_connection: None,
        }
    }
}

impl<C: MidiOutputConnection> OutputGateway<C> {
    fn send_midi_output(&mut self, output: &[u8]) -> OutputResult<()> {
        let Some(midi_output_connection) = &mut self.midi_output_connection else {
            return Err(OutputError::Disconnected);
        };
        midi_output_connection.send_midi_output(output)
    }
}

impl<C: MidiOutputConnection> LightingOutput for OutputGateway<C> {
    fn send_lighting_command(&mut self, command: LightingCommand) -> OutputResult<()> {
        let LightingCommand { kind, index, code } = command;
        self.send_midi_output(&[midi_status(kind), index, code])
    }

    fn reset(&mut self) -> OutputResult<()> {
        self.send_midi_output(&RESET_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct SentMessages(Vec<Vec<u8>>);

    impl MidiOutputConnection for SentMessages {
        fn send_midi_output(&mut self, output: &[u8]) -> OutputResult<()> {
            self.0.push(output.to_vec());
            Ok(())
        }
    }

    #[test]
    fn pads_are_addressed_by_note() {
        assert_eq!(
            LightingCommand {
                kind: MessageKind::NoteOn,
                index: 0x16,
                code: 52,
            },
            lighting_command(6, 1, Color::HiGreen)
        );
        assert_eq!(0x78, lighting_command(8, 7, Color::Black).index);
    }

    #[test]
    fn meta_row_is_addressed_by_control_change() {
        assert_eq!(
            LightingCommand {
                kind: MessageKind::ControlChange,
                index: 0x6f,
                code: 54,
            },
            lighting_command(7, META_ROW, Color::HiYellow)
        );
    }

    #[test]
    fn detached_gateway_is_disconnected() {
        let mut gateway = OutputGateway::<SentMessages>::default();
        assert!(matches!(gateway.reset(), Err(OutputError::Disconnected)));
    }

    #[test]
    fn attached_gateway_sends_messages() {
        let mut gateway = OutputGateway::default();
        assert!(gateway.attach(SentMessages::default()).is_none());
        assert!(gateway.is_attached());
        gateway.reset().unwrap();
        gateway
            .send_lighting_command(lighting_command(0, 0, Color::LoRed))
            .unwrap();
        gateway
            .send_lighting_command(lighting_command(2, META_ROW, Color::LoYellow))
            .unwrap();
        let SentMessages(sent) = gateway.detach().unwrap();
        assert_eq!(
            vec![vec![0xb0, 0x00, 0x00], vec![0x90, 0x00, 5], vec![0xb0, 0x6a, 37]],
            sent
        );
        assert!(!gateway.is_attached());
    }
}
