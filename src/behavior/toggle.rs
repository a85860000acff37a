// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use super::Reaction;
use crate::{Color, Session};

/// Two-state light without any engine interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    rest_color: Color,
    pressed_color: Color,
}

impl Toggle {
    #[must_use]
    pub const fn new(rest_color: Color, pressed_color: Color) -> Self {
        Self {
            rest_color,
            pressed_color,
        }
    }

    #[must_use]
    pub const fn rest_color(&self) -> Color {
        self.rest_color
    }

    #[must_use]
    pub const fn pressed_color(&self) -> Color {
        self.pressed_color
    }

    pub(crate) const fn on_press(&self) -> Reaction {
        Reaction::color(self.pressed_color)
    }

    pub(crate) const fn on_release(&self) -> Reaction {
        Reaction::color(self.rest_color)
    }
}

/// Momentary modifier.
///
/// The session flag is updated before the light, i.e. before any
/// subsequent input could observe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    light: Toggle,
}

impl Shift {
    pub const REST_COLOR: Color = Color::LoGreen;
    pub const PRESSED_COLOR: Color = Color::HiYellow;

    #[must_use]
    pub const fn new(light: Toggle) -> Self {
        Self { light }
    }

    #[must_use]
    pub const fn rest_color(&self) -> Color {
        self.light.rest_color()
    }

    /// The color that reflects the modifier state.
    #[must_use]
    pub const fn color(&self, active: bool) -> Color {
        if active {
            self.light.pressed_color()
        } else {
            self.light.rest_color()
        }
    }

    fn apply_modifier(session: &mut Session, pressed: bool) {
        session.set_shift_active(pressed);
    }

    pub(crate) fn on_press(&self, session: &mut Session) -> Reaction {
        Self::apply_modifier(session, true);
        self.light.on_press()
    }

    pub(crate) fn on_release(&self, session: &mut Session) -> Reaction {
        Self::apply_modifier(session, false);
        self.light.on_release()
    }
}

impl Default for Shift {
    fn default() -> Self {
        Self::new(Toggle::new(Self::REST_COLOR, Self::PRESSED_COLOR))
    }
}
