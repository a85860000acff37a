// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use super::{Context, Reaction};
use crate::{
    engine::{bool_value, get_bool, ControlKey, Engine, EngineResult},
    Color,
};

/// Activates or, while shifted, clears a hot cue of a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotcue {
    deck: u8,
    slot: u8,
    activate_key: ControlKey,
    clear_key: ControlKey,
    enabled_key: ControlKey,
}

impl Hotcue {
    pub const PRESSED_COLOR: Color = Color::HiAmber;
    pub const SET_COLOR: Color = Color::LoGreen;
    pub const UNSET_COLOR: Color = Color::LoRed;

    /// Both deck and slot are numbered from 1.
    #[must_use]
    pub fn new(deck: u8, slot: u8) -> Self {
        debug_assert!(slot > 0);
        Self {
            deck,
            slot,
            activate_key: ControlKey::deck(deck, format!("hotcue_{slot}_activate")),
            clear_key: ControlKey::deck(deck, format!("hotcue_{slot}_clear")),
            enabled_key: ControlKey::deck(deck, format!("hotcue_{slot}_enabled")),
        }
    }

    #[must_use]
    pub const fn deck(&self) -> u8 {
        self.deck
    }

    #[must_use]
    pub const fn slot(&self) -> u8 {
        self.slot
    }

    #[must_use]
    pub const fn activate_key(&self) -> &ControlKey {
        &self.activate_key
    }

    #[must_use]
    pub const fn clear_key(&self) -> &ControlKey {
        &self.clear_key
    }

    #[must_use]
    pub const fn enabled_key(&self) -> &ControlKey {
        &self.enabled_key
    }

    pub fn led_color<E>(&self, pressed: bool, engine: &E) -> EngineResult<Color>
    where
        E: Engine + ?Sized,
    {
        if pressed {
            return Ok(Self::PRESSED_COLOR);
        }
        let color = if get_bool(engine, &self.enabled_key)? {
            Self::SET_COLOR
        } else {
            Self::UNSET_COLOR
        };
        Ok(color)
    }

    /// Press and release are symmetric.
    pub(crate) fn on_input<E>(&self, ctx: &mut Context<'_, E>) -> EngineResult<Reaction>
    where
        E: Engine + ?Sized,
    {
        let key = if ctx.session.is_shift_active() {
            &self.clear_key
        } else {
            &self.activate_key
        };
        ctx.engine.set_value(key, bool_value(ctx.pressed))?;
        self.led_color(ctx.pressed, &*ctx.engine).map(Reaction::color)
    }
}

/// Play/pause of a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transport {
    deck: u8,
    play_key: ControlKey,
    indicator_key: ControlKey,
}

impl Transport {
    pub const PRESSED_COLOR: Color = Color::HiAmber;
    pub const PLAYING_COLOR: Color = Color::HiGreen;
    pub const STOPPED_COLOR: Color = Color::HiYellow;

    #[must_use]
    pub fn new(deck: u8) -> Self {
        Self {
            deck,
            play_key: ControlKey::deck(deck, "play"),
            indicator_key: ControlKey::deck(deck, "play_indicator"),
        }
    }

    #[must_use]
    pub const fn deck(&self) -> u8 {
        self.deck
    }

    #[must_use]
    pub const fn play_key(&self) -> &ControlKey {
        &self.play_key
    }

    #[must_use]
    pub const fn indicator_key(&self) -> &ControlKey {
        &self.indicator_key
    }

    pub fn led_color<E>(&self, pressed: bool, engine: &E) -> EngineResult<Color>
    where
        E: Engine + ?Sized,
    {
        if pressed {
            return Ok(Self::PRESSED_COLOR);
        }
        let color = if get_bool(engine, &self.indicator_key)? {
            Self::PLAYING_COLOR
        } else {
            Self::STOPPED_COLOR
        };
        Ok(color)
    }

    pub(crate) fn on_press<E>(&self, ctx: &mut Context<'_, E>) -> EngineResult<Reaction>
    where
        E: Engine + ?Sized,
    {
        let playing = get_bool(&*ctx.engine, &self.play_key)?;
        ctx.engine.set_value(&self.play_key, bool_value(!playing))?;
        self.led_color(true, &*ctx.engine).map(Reaction::color)
    }

    /// Only restores the color.
    pub(crate) fn on_release<E>(&self, ctx: &mut Context<'_, E>) -> EngineResult<Reaction>
    where
        E: Engine + ?Sized,
    {
        self.led_color(false, &*ctx.engine).map(Reaction::color)
    }
}
