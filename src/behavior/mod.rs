// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Press and release semantics of grid buttons.
//!
//! Behaviors only decide what happens in the engine and which color the
//! button should show next. Drawing and the consequences that affect
//! other buttons are handled by the controller.

use derive_more::From;

use crate::{
    engine::{ControlKey, Engine, EngineResult},
    Color, Session,
};

mod deck;
pub use self::deck::{Hotcue, Transport};

mod looping;
pub use self::looping::{BeatLoopSize, LoopMode, LoopModeGroup, LoopModeSelector, LoopSize};

mod page;
pub use self::page::PageSelect;

mod toggle;
pub use self::toggle::{Shift, Toggle};

/// Everything a behavior may read or modify while handling an input.
pub(crate) struct Context<'a, E: ?Sized> {
    pub(crate) engine: &'a mut E,
    pub(crate) session: &'a mut Session,
    pub(crate) pressed: bool,
}

/// Consequences that reach beyond the button itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Followup {
    SelectPage(u8),
    RecolorLoopSizes,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Reaction {
    pub(crate) color: Option<Color>,
    pub(crate) followup: Option<Followup>,
}

impl Reaction {
    pub(crate) const NONE: Self = Self {
        color: None,
        followup: None,
    };

    pub(crate) const fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            followup: None,
        }
    }

    pub(crate) const fn followup(followup: Followup) -> Self {
        Self {
            color: None,
            followup: Some(followup),
        }
    }

    #[must_use]
    pub(crate) const fn with_followup(mut self, followup: Followup) -> Self {
        self.followup = Some(followup);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, From)]
pub enum Behavior {
    /// Does nothing.
    #[default]
    #[from(skip)]
    Plain,
    Toggle(Toggle),
    PageSelect(PageSelect),
    Shift(Shift),
    Hotcue(Hotcue),
    Transport(Transport),
    LoopSize(LoopSize),
    LoopMode(LoopModeSelector),
}

impl Behavior {
    /// The color before the first input has been received.
    ///
    /// Buttons that reflect engine state are refreshed
    /// from the engine afterwards.
    #[must_use]
    pub const fn initial_color(&self, loop_mode: LoopMode) -> Color {
        match self {
            Self::Plain => Color::Black,
            Self::Toggle(toggle) => toggle.rest_color(),
            Self::PageSelect(_) => PageSelect::UNSELECTED_COLOR,
            Self::Shift(shift) => shift.rest_color(),
            Self::Hotcue(_) => Hotcue::UNSET_COLOR,
            Self::Transport(_) => Transport::STOPPED_COLOR,
            Self::LoopSize(_) => LoopSize::rest_color(loop_mode),
            Self::LoopMode(_) => LoopModeSelector::color(loop_mode),
        }
    }

    /// Engine controls that affect the color of the button.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<ControlKey> {
        match self {
            Self::Hotcue(hotcue) => vec![hotcue.enabled_key().clone()],
            Self::Transport(transport) => vec![transport.indicator_key().clone()],
            Self::Plain
            | Self::Toggle(_)
            | Self::PageSelect(_)
            | Self::Shift(_)
            | Self::LoopSize(_)
            | Self::LoopMode(_) => Vec::new(),
        }
    }

    /// Derive the color from the engine state.
    ///
    /// Returns `None` if the color does not depend on the engine.
    pub fn led_color<E>(&self, pressed: bool, engine: &E) -> EngineResult<Option<Color>>
    where
        E: Engine + ?Sized,
    {
        match self {
            Self::Hotcue(hotcue) => hotcue.led_color(pressed, engine).map(Some),
            Self::Transport(transport) => transport.led_color(pressed, engine).map(Some),
            Self::Plain
            | Self::Toggle(_)
            | Self::PageSelect(_)
            | Self::Shift(_)
            | Self::LoopSize(_)
            | Self::LoopMode(_) => Ok(None),
        }
    }

    pub(crate) fn on_press<E>(&mut self, ctx: &mut Context<'_, E>) -> EngineResult<Reaction>
    where
        E: Engine + ?Sized,
    {
        match self {
            Self::Plain => Ok(Reaction::NONE),
            Self::Toggle(toggle) => Ok(toggle.on_press()),
            Self::PageSelect(page_select) => Ok(page_select.on_press()),
            Self::Shift(shift) => Ok(shift.on_press(ctx.session)),
            Self::Hotcue(hotcue) => hotcue.on_input(ctx),
            Self::Transport(transport) => transport.on_press(ctx),
            Self::LoopSize(loop_size) => loop_size.on_press(ctx),
            Self::LoopMode(selector) => Ok(selector.on_press(ctx.session)),
        }
    }

    pub(crate) fn on_release<E>(&mut self, ctx: &mut Context<'_, E>) -> EngineResult<Reaction>
    where
        E: Engine + ?Sized,
    {
        match self {
            Self::Plain | Self::PageSelect(_) | Self::LoopMode(_) => Ok(Reaction::NONE),
            Self::Toggle(toggle) => Ok(toggle.on_release()),
            Self::Shift(shift) => Ok(shift.on_release(ctx.session)),
            Self::Hotcue(hotcue) => hotcue.on_input(ctx),
            Self::Transport(transport) => transport.on_release(ctx),
            Self::LoopSize(loop_size) => loop_size.on_release(ctx),
        }
    }
}

#[cfg(test)]
mod tests;
