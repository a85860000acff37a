// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::borrow::Cow;

use thiserror::Error;

use crate::Color;

#[derive(Debug, Error)]
pub enum Error {
    #[error("disconnected")]
    Disconnected,
    #[error("Send: {msg}")]
    Send { msg: Cow<'static, str> },
}

pub type Result<T> = std::result::Result<T, Error>;

/// The kind of message that addresses an LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    NoteOn,
    ControlChange,
}

/// Sets a single LED to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightingCommand {
    pub kind: MessageKind,
    pub index: u8,
    pub code: u8,
}

impl LightingCommand {
    #[must_use]
    pub const fn new(kind: MessageKind, index: u8, color: Color) -> Self {
        Self {
            kind,
            index,
            code: color.code(),
        }
    }
}

/// Fire-and-forget LED output of the hardware.
pub trait LightingOutput {
    fn send_lighting_command(&mut self, command: LightingCommand) -> Result<()>;

    /// Turn off all LEDs.
    fn reset(&mut self) -> Result<()>;
}

impl<T> LightingOutput for &mut T
where
    T: LightingOutput + ?Sized,
{
    fn send_lighting_command(&mut self, command: LightingCommand) -> Result<()> {
        (**self).send_lighting_command(command)
    }

    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }
}

/// Records all commands instead of sending them to a device.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LightingRecorder {
    commands: Vec<LightingCommand>,
    resets: usize,
}

impl LightingRecorder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
            resets: 0,
        }
    }

    #[must_use]
    pub fn commands(&self) -> &[LightingCommand] {
        &self.commands
    }

    #[must_use]
    pub const fn resets(&self) -> usize {
        self.resets
    }

    pub fn take_commands(&mut self) -> Vec<LightingCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl LightingOutput for LightingRecorder {
    fn send_lighting_command(&mut self, command: LightingCommand) -> Result<()> {
        self.commands.push(command);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.resets += 1;
        Ok(())
    }
}
