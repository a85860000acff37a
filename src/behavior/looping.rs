// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use strum::{EnumCount, EnumIter, IntoStaticStr};

use super::{Context, Followup, Reaction};
use crate::{
    engine::{get_bool, ControlKey, Engine, EngineResult},
    Color, Position, Session,
};

/// Beat loop lengths in beats, as named by the engine controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, IntoStaticStr)]
pub enum BeatLoopSize {
    #[strum(serialize = "0.0625")]
    Sixteenth,
    #[strum(serialize = "0.125")]
    Eighth,
    #[strum(serialize = "0.25")]
    Quarter,
    #[strum(serialize = "0.5")]
    Half,
    #[strum(serialize = "1")]
    One,
    #[strum(serialize = "2")]
    Two,
}

impl BeatLoopSize {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// What all loop size buttons do.
///
/// Shared by all decks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoopMode {
    /// Toggle a beat loop.
    #[default]
    BeatloopToggle,
    /// Roll a loop while pressed.
    LoopRoll,
}

impl LoopMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::BeatloopToggle => Self::LoopRoll,
            Self::LoopRoll => Self::BeatloopToggle,
        }
    }
}

/// The global loop mode and the positions of all loop size buttons
/// that need to be recolored when it changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopModeGroup {
    mode: LoopMode,
    members: Vec<Position>,
}

impl LoopModeGroup {
    #[must_use]
    pub const fn mode(&self) -> LoopMode {
        self.mode
    }

    #[must_use]
    pub fn members(&self) -> &[Position] {
        &self.members
    }

    pub(crate) fn toggle(&mut self) -> LoopMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    pub(crate) fn register(&mut self, position: Position) {
        if self.members.contains(&position) {
            return;
        }
        self.members.push(position);
    }

    pub(crate) fn unregister(&mut self, position: Position) {
        self.members.retain(|member| *member != position);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopSize {
    deck: u8,
    size: BeatLoopSize,
    toggle_key: ControlKey,
    roll_key: ControlKey,
    enabled_key: ControlKey,
}

impl LoopSize {
    pub const PRESSED_COLOR: Color = Color::HiGreen;

    #[must_use]
    pub fn new(deck: u8, size: BeatLoopSize) -> Self {
        let size_str = size.as_str();
        Self {
            deck,
            size,
            toggle_key: ControlKey::deck(deck, format!("beatloop_{size_str}_toggle")),
            roll_key: ControlKey::deck(deck, format!("beatlooproll_{size_str}_activate")),
            enabled_key: ControlKey::deck(deck, format!("beatloop_{size_str}_enabled")),
        }
    }

    #[must_use]
    pub const fn rest_color(mode: LoopMode) -> Color {
        match mode {
            LoopMode::BeatloopToggle => Color::HiYellow,
            LoopMode::LoopRoll => Color::HiOrange,
        }
    }

    #[must_use]
    pub const fn deck(&self) -> u8 {
        self.deck
    }

    #[must_use]
    pub const fn size(&self) -> BeatLoopSize {
        self.size
    }

    #[must_use]
    pub const fn toggle_key(&self) -> &ControlKey {
        &self.toggle_key
    }

    #[must_use]
    pub const fn roll_key(&self) -> &ControlKey {
        &self.roll_key
    }

    #[must_use]
    pub const fn enabled_key(&self) -> &ControlKey {
        &self.enabled_key
    }

    pub(crate) fn on_press<E>(&self, ctx: &mut Context<'_, E>) -> EngineResult<Reaction>
    where
        E: Engine + ?Sized,
    {
        let key = match ctx.session.loop_mode().mode() {
            LoopMode::BeatloopToggle => &self.toggle_key,
            LoopMode::LoopRoll => &self.roll_key,
        };
        ctx.engine.set_value(key, 1.0)?;
        Ok(Reaction::color(Self::PRESSED_COLOR))
    }

    pub(crate) fn on_release<E>(&self, ctx: &mut Context<'_, E>) -> EngineResult<Reaction>
    where
        E: Engine + ?Sized,
    {
        let mode = ctx.session.loop_mode().mode();
        match mode {
            LoopMode::BeatloopToggle => {
                // Toggle once more only if the loop is still running
                if get_bool(&*ctx.engine, &self.enabled_key)? {
                    ctx.engine.set_value(&self.toggle_key, 1.0)?;
                }
            }
            LoopMode::LoopRoll => {
                ctx.engine.set_value(&self.roll_key, 0.0)?;
            }
        }
        Ok(Reaction::color(Self::rest_color(mode)))
    }
}

/// Switches the [`LoopMode`] of all loop size buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopModeSelector;

impl LoopModeSelector {
    #[must_use]
    pub const fn color(mode: LoopMode) -> Color {
        match mode {
            LoopMode::BeatloopToggle => Color::LoYellow,
            LoopMode::LoopRoll => Color::LoOrange,
        }
    }

    pub(crate) fn on_press(self, session: &mut Session) -> Reaction {
        let mode = session.loop_mode_mut().toggle();
        Reaction::color(Self::color(mode)).with_followup(Followup::RecolorLoopSizes)
    }
}
