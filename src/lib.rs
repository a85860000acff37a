// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

#![allow(rustdoc::invalid_rust_codeblocks)]
#![doc = include_str!("../README.md")]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
//#![warn(missing_docs)] // FIXME
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(rustdoc::broken_intra_doc_links)]
// Repetitions of module/type names occur frequently when using many
// modules for keeping the size of the source files handy. Often
// types have the same name as their parent module.
#![allow(clippy::module_name_repetitions)]
// Repeating the type name in `..Default::default()` expressions
// is not needed since the context is obvious.
#![allow(clippy::default_trait_access)]

use std::borrow::Cow;

use thiserror::Error;

pub mod behavior;
pub use self::behavior::{
    BeatLoopSize, Behavior, Hotcue, LoopMode, LoopModeGroup, LoopModeSelector, LoopSize,
    PageSelect, Shift, Toggle, Transport,
};

mod button;
pub use self::button::{Button, Position};

mod controller;
#[cfg(feature = "observables")]
pub use self::controller::Observables;
pub use self::controller::{GridController, Session, SessionState};

pub mod devices;

pub mod engine;
pub use self::engine::{ControlKey, Engine, EngineError, EngineResult, MemoryEngine};

mod grid;
pub use self::grid::{Grid, GridLayout};

mod input;
pub use self::input::{ButtonInput, RawEvent, RawEventSink, TimeStamp};

pub mod midi;
pub use self::midi::{
    MidiDeviceDescriptor, MidiInputDecodeError, MidiInputHandler, MidiOutputConnection,
};
#[cfg(feature = "midir")]
pub use self::midi::{MidiPortError, MidirDevice, MidirDeviceManager};

mod output;
pub use self::output::{
    Error as OutputError, LightingCommand, LightingOutput, LightingRecorder, MessageKind,
    Result as OutputResult,
};

pub mod palette;
pub use self::palette::{Color, UnknownColorError};

/// Common, information properties about a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub vendor_name: Cow<'static, str>,
    pub product_name: Cow<'static, str>,
}

impl DeviceDescriptor {
    /// The qualified device name including both vendor and model name.
    #[must_use]
    pub fn name(&self) -> Cow<'static, str> {
        let Self {
            vendor_name,
            product_name,
        } = self;
        debug_assert!(!product_name.is_empty());
        if vendor_name.is_empty() {
            product_name.clone()
        } else {
            format!("{vendor_name} {product_name}").into()
        }
    }
}

/// Failures while handling a single input event or engine notification.
///
/// None of these errors is fatal. The controller stays responsive
/// and continues to accept subsequent events.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    UnknownColor(#[from] UnknownColorError),

    #[error("no button at column {column}, row {row}")]
    UnaddressedButton { column: u8, row: u8 },

    #[error("engine binding unavailable: {0}")]
    EngineBindingUnavailable(#[from] EngineError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("invalid grid layout: {reason}")]
    InvalidLayout { reason: &'static str },

    #[error("controller is detached")]
    Detached,
}

pub type Result<T> = std::result::Result<T, Error>;
