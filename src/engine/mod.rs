// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Binding to the controls of the mixing engine.
//!
//! Controls are addressed by a group, e.g. `[Channel1]`, and an item
//! within this group, e.g. `play`. All values are numbers.

use std::borrow::Cow;

use derive_more::Display;
use float_cmp::approx_eq;
use thiserror::Error;

mod memory;
pub use self::memory::MemoryEngine;

pub const MASTER_GROUP: &str = "[Master]";

pub const NUM_DECKS_ITEM: &str = "num_decks";

#[derive(Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("{group},{item}")]
pub struct ControlKey {
    pub group: Cow<'static, str>,
    pub item: Cow<'static, str>,
}

impl ControlKey {
    #[must_use]
    pub fn new(group: impl Into<Cow<'static, str>>, item: impl Into<Cow<'static, str>>) -> Self {
        Self {
            group: group.into(),
            item: item.into(),
        }
    }

    #[must_use]
    pub const fn master(item: &'static str) -> Self {
        Self {
            group: Cow::Borrowed(MASTER_GROUP),
            item: Cow::Borrowed(item),
        }
    }

    /// Control of a deck, numbered from 1.
    #[must_use]
    pub fn deck(deck: u8, item: impl Into<Cow<'static, str>>) -> Self {
        Self::new(deck_group(deck), item)
    }
}

#[must_use]
pub fn deck_group(deck: u8) -> String {
    debug_assert!(deck > 0);
    format!("[Channel{deck}]")
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown control {key}")]
    UnknownControl { key: ControlKey },
    #[error("{msg}")]
    Unavailable { msg: Cow<'static, str> },
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Access to the controls of the engine.
///
/// Change notifications for connected controls are delivered by the
/// host through [`crate::GridController::on_engine_control_changed()`].
/// They carry no payload, i.e. the current value needs to be read
/// through [`Engine::get_value()`].
pub trait Engine {
    fn get_value(&self, key: &ControlKey) -> EngineResult<f64>;

    fn set_value(&mut self, key: &ControlKey, value: f64) -> EngineResult<()>;

    /// Subscribe to change notifications.
    fn connect_control(&mut self, key: &ControlKey) -> EngineResult<()>;

    /// Unsubscribe from change notifications.
    fn disconnect_control(&mut self, key: &ControlKey) -> EngineResult<()>;
}

impl<T> Engine for &mut T
where
    T: Engine + ?Sized,
{
    fn get_value(&self, key: &ControlKey) -> EngineResult<f64> {
        (**self).get_value(key)
    }

    fn set_value(&mut self, key: &ControlKey, value: f64) -> EngineResult<()> {
        (**self).set_value(key, value)
    }

    fn connect_control(&mut self, key: &ControlKey) -> EngineResult<()> {
        (**self).connect_control(key)
    }

    fn disconnect_control(&mut self, key: &ControlKey) -> EngineResult<()> {
        (**self).disconnect_control(key)
    }
}

/// Boolean controls are represented by 0.0 and 1.0.
#[must_use]
pub fn is_on(value: f64) -> bool {
    approx_eq!(f64, value, 1.0)
}

#[must_use]
pub const fn bool_value(on: bool) -> f64 {
    if on {
        1.0
    } else {
        0.0
    }
}

/// Read a boolean control.
pub fn get_bool<E>(engine: &E, key: &ControlKey) -> EngineResult<bool>
where
    E: Engine + ?Sized,
{
    engine.get_value(key).map(is_on)
}
