// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use super::{MIDI_META_ROW_SENTINEL, MIDI_ROW_STRIDE, MIDI_STATUS_CC_CHANNEL_1, META_ROW};
use crate::{MidiInputDecodeError, MidiInputHandler, RawEvent, RawEventSink, TimeStamp};

/// Decode the grid coordinate `(column, row)` of a pad or button.
///
/// The round buttons on top arrive within row 6 of the note space,
/// either beyond the 8th column or, for the first one, as a control
/// change on column 8. The result is not guaranteed to be within
/// the grid.
#[must_use]
pub const fn translate_coordinate(control: u8, status: u8) -> (u8, u8) {
    let row = control / MIDI_ROW_STRIDE;
    let column = control - row * MIDI_ROW_STRIDE;
    if row == MIDI_META_ROW_SENTINEL && column > 8 {
        return (column - 8, META_ROW);
    }
    if row == MIDI_META_ROW_SENTINEL && column == 8 && status == MIDI_STATUS_CC_CHANNEL_1 {
        return (0, META_ROW);
    }
    (column, row)
}

pub fn try_decode_midi_input(input: &[u8]) -> Result<RawEvent, MidiInputDecodeError> {
    let [status, control, value] = *input else {
        return Err(MidiInputDecodeError);
    };
    Ok(RawEvent::from_midi(status, control, value))
}

/// Decodes incoming messages and forwards them to a [`RawEventSink`].
#[derive(Debug)]
pub struct InputGateway<S> {
    event_sink: S,
}

impl<S> InputGateway<S> {
    #[must_use]
    pub const fn new(event_sink: S) -> Self {
        Self { event_sink }
    }

    #[must_use]
    pub fn into_event_sink(self) -> S {
        self.event_sink
    }
}

impl<S> MidiInputHandler for InputGateway<S>
where
    S: RawEventSink,
{
    fn handle_midi_input(&mut self, ts: TimeStamp, input: &[u8]) -> bool {
        let Ok(event) = try_decode_midi_input(input) else {
            log::warn!("Failed to decode MIDI input: {ts} {input:x?}");
            return false;
        };
        self.event_sink.sink_raw_events(&[(ts, event)]);
        true
    }
}
