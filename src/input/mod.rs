// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::{fmt, sync::mpsc, time::Duration};

/// Time stamp with microsecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct TimeStamp(u64);

impl TimeStamp {
    #[must_use]
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    #[must_use]
    pub const fn to_micros(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn to_duration(self) -> Duration {
        Duration::from_micros(self.0)
    }
}

impl fmt::Display for TimeStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0 / 1_000_000;
        let micros = self.0 % 1_000_000;
        write!(f, "{secs}.{micros:06}")
    }
}

/// A simple two-state button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonInput {
    Pressed,
    Released,
}

impl ButtonInput {
    /// Only the maximum value counts as pressed.
    ///
    /// Any other value is tolerated and treated as released.
    #[must_use]
    pub const fn from_u7(input: u8) -> Self {
        match input {
            0x7f => Self::Pressed,
            _ => Self::Released,
        }
    }

    #[must_use]
    pub const fn is_pressed(self) -> bool {
        matches!(self, Self::Pressed)
    }
}

/// An undecoded 3-byte message as received from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub channel: u8,
    pub control: u8,
    pub value: u8,
    pub status: u8,
}

impl RawEvent {
    #[must_use]
    pub const fn from_midi(status: u8, control: u8, value: u8) -> Self {
        Self {
            channel: status & 0x0f,
            control,
            value,
            status,
        }
    }

    #[must_use]
    pub const fn button_input(&self) -> ButtonInput {
        ButtonInput::from_u7(self.value)
    }
}

/// Receives decoded events, e.g. for forwarding them from the
/// driver thread to the thread that owns the controller.
pub trait RawEventSink: Send {
    fn sink_raw_events(&mut self, events: &[(TimeStamp, RawEvent)]);
}

impl RawEventSink for mpsc::Sender<(TimeStamp, RawEvent)> {
    fn sink_raw_events(&mut self, events: &[(TimeStamp, RawEvent)]) {
        for event in events {
            if self.send(*event).is_err() {
                log::debug!("Dropping {event:?}: Receiver disconnected");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests;
