// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Port detection and connections through [`midir`].

use midir::{
    ConnectError, Ignore, InitError, MidiInput, MidiInputConnection, MidiInputPort, MidiOutput,
    MidiOutputConnection, MidiOutputPort, SendError,
};
use thiserror::Error;

use super::{MidiDeviceDescriptor, MidiInputHandler};
use crate::{OutputError, OutputResult, TimeStamp};

#[derive(Debug, Error)]
pub enum MidiPortError {
    #[error(transparent)]
    Init(#[from] InitError),
    #[error(transparent)]
    ConnectInput(#[from] ConnectError<MidiInput>),
    #[error(transparent)]
    ConnectOutput(#[from] ConnectError<MidiOutput>),
}

impl From<SendError> for OutputError {
    fn from(err: SendError) -> Self {
        OutputError::Send {
            msg: err.to_string().into(),
        }
    }
}

impl super::MidiOutputConnection for MidiOutputConnection {
    fn send_midi_output(&mut self, output: &[u8]) -> OutputResult<()> {
        self.send(output).map_err(Into::into)
    }
}

// Invoked on the driver thread of midir
fn handle_input<H>(micros: u64, input: &[u8], input_handler: &mut H)
where
    H: MidiInputHandler,
{
    let ts = TimeStamp::from_micros(micros);
    if !input_handler.handle_midi_input(ts, input) {
        log::debug!("Unhandled MIDI input {ts} {input:x?}");
    }
}

/// A detected grid controller with its pair of ports.
///
/// While connected the input handler is owned by the
/// input connection.
#[allow(missing_debug_implementations)]
pub struct MidirDevice<H: 'static> {
    descriptor: &'static MidiDeviceDescriptor,
    input_port_name: String,
    input_port: MidiInputPort,
    output_port_name: String,
    output_port: MidiOutputPort,
    input_connection: Option<MidiInputConnection<H>>,
}

impl<H> MidirDevice<H>
where
    H: MidiInputHandler + 'static,
{
    #[must_use]
    pub const fn descriptor(&self) -> &'static MidiDeviceDescriptor {
        self.descriptor
    }

    #[must_use]
    pub fn input_port_name(&self) -> &str {
        &self.input_port_name
    }

    #[must_use]
    pub fn output_port_name(&self) -> &str {
        &self.output_port_name
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.input_connection.is_some()
    }

    /// Open both ports, closing any previous input connection.
    ///
    /// Returns the output connection for sending lighting commands.
    pub fn connect(&mut self, input_handler: H) -> Result<MidiOutputConnection, MidiPortError> {
        self.disconnect();
        let client_name = self.descriptor.device.name();
        let mut input = MidiInput::new(&client_name)?;
        // Only channel messages are relevant
        input.ignore(Ignore::All);
        let output = MidiOutput::new(&client_name)?;
        let output_connection = output.connect(&self.output_port, &self.output_port_name)?;
        let input_connection = input.connect(
            &self.input_port,
            &self.input_port_name,
            handle_input::<H>,
            input_handler,
        )?;
        self.input_connection = Some(input_connection);
        log::info!(
            "Connected \"{client_name}\" (input port: \"{input_port_name}\", output port: \
             \"{output_port_name}\")",
            input_port_name = self.input_port_name,
            output_port_name = self.output_port_name,
        );
        Ok(output_connection)
    }

    /// Close the input connection and return the input handler.
    pub fn disconnect(&mut self) -> Option<H> {
        let (_input, input_handler) = self.input_connection.take()?.close();
        log::info!(
            "Disconnected \"{device_name}\"",
            device_name = self.descriptor.device.name()
        );
        Some(input_handler)
    }
}

/// Watches the available ports.
#[allow(missing_debug_implementations)]
pub struct MidirDeviceManager {
    input: MidiInput,
    output: MidiOutput,
}

impl MidirDeviceManager {
    pub fn new() -> Result<Self, InitError> {
        let input = MidiInput::new("djio-grid input port watcher")?;
        let output = MidiOutput::new("djio-grid output port watcher")?;
        Ok(Self { input, output })
    }

    fn input_ports(&self) -> Vec<(String, MidiInputPort)> {
        self.input
            .ports()
            .into_iter()
            .filter_map(|port| Some((self.input.port_name(&port).ok()?, port)))
            .collect()
    }

    fn output_ports(&self) -> Vec<(String, MidiOutputPort)> {
        self.output
            .ports()
            .into_iter()
            .filter_map(|port| Some((self.output.port_name(&port).ok()?, port)))
            .collect()
    }

    /// Pair up the input and output ports of all supported devices.
    ///
    /// Multiple devices of the same kind are paired in port order.
    #[must_use]
    pub fn detect_devices<H>(
        &self,
        descriptors: &[&'static MidiDeviceDescriptor],
    ) -> Vec<MidirDevice<H>>
    where
        H: MidiInputHandler + 'static,
    {
        let input_ports = self.input_ports();
        let output_ports = self.output_ports();
        let mut devices = Vec::new();
        for descriptor in descriptors.iter().copied() {
            let inputs = input_ports
                .iter()
                .filter(|(name, _)| descriptor.matches_port_name(name));
            let outputs = output_ports
                .iter()
                .filter(|(name, _)| descriptor.matches_port_name(name));
            for ((input_port_name, input_port), (output_port_name, output_port)) in
                inputs.zip(outputs)
            {
                log::info!(
                    "Detected \"{device_name}\" (input port: \"{input_port_name}\", output \
                     port: \"{output_port_name}\")",
                    device_name = descriptor.device.name()
                );
                devices.push(MidirDevice {
                    descriptor,
                    input_port_name: input_port_name.clone(),
                    input_port: input_port.clone(),
                    output_port_name: output_port_name.clone(),
                    output_port: output_port.clone(),
                    input_connection: None,
                });
            }
        }
        if devices.is_empty() {
            log::debug!(
                "No grid controller among {num_input_ports} input and {num_output_ports} output \
                 port(s)",
                num_input_ports = input_ports.len(),
                num_output_ports = output_ports.len(),
            );
        }
        devices
    }

    /// Check if both ports of the device are still present.
    #[must_use]
    pub fn is_available<H>(&self, device: &MidirDevice<H>) -> bool
    where
        H: MidiInputHandler + 'static,
    {
        self.input_ports()
            .iter()
            .any(|(name, _)| *name == device.input_port_name)
            && self
                .output_ports()
                .iter()
                .any(|(name, _)| *name == device.output_port_name)
    }
}
