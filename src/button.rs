// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use derive_more::Display;

use crate::{
    behavior::{Context, Followup},
    devices::novation_launchpad_mini::lighting_command,
    engine::Engine,
    Behavior, ButtonInput, Color, LightingOutput, OutputResult, Session,
};

/// Address of a button within the grid.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("{page}:{column}:{row}")]
pub struct Position {
    pub page: u8,
    pub column: u8,
    pub row: u8,
}

impl Position {
    #[must_use]
    pub const fn new(page: u8, column: u8, row: u8) -> Self {
        Self { page, column, row }
    }
}

/// A single, addressable button of the grid.
///
/// The color is the logical color of the button. It is only sent to
/// the device while the page of the button is visible.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    position: Position,
    color: Color,
    pressed: bool,
    behavior: Behavior,
}

impl Button {
    #[must_use]
    pub fn new(position: Position, behavior: impl Into<Behavior>) -> Self {
        let behavior = behavior.into();
        let color = behavior.initial_color(Default::default());
        Self {
            position,
            color,
            pressed: false,
            behavior,
        }
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    #[must_use]
    pub const fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    #[must_use]
    pub const fn is_visible(&self, current_page: u8) -> bool {
        self.position.page == current_page
    }

    /// Record the color without drawing it.
    pub(crate) fn recolor(&mut self, color: Color) {
        self.color = color;
    }

    /// Record the color and draw it if visible.
    pub fn set_color<O>(&mut self, color: Color, current_page: u8, output: &mut O) -> OutputResult<()>
    where
        O: LightingOutput + ?Sized,
    {
        self.color = color;
        self.draw(current_page, output)?;
        Ok(())
    }

    /// Like [`Button::set_color()`] for a palette name.
    ///
    /// Unknown names leave the button untouched.
    pub fn set_color_name<O>(
        &mut self,
        name: &str,
        current_page: u8,
        output: &mut O,
    ) -> crate::Result<()>
    where
        O: LightingOutput + ?Sized,
    {
        let color = Color::from_name(name)?;
        self.set_color(color, current_page, output)?;
        Ok(())
    }

    /// Send the current color to the device.
    ///
    /// Returns `false` if the button is not visible and nothing
    /// has been sent.
    pub fn draw<O>(&self, current_page: u8, output: &mut O) -> OutputResult<bool>
    where
        O: LightingOutput + ?Sized,
    {
        if !self.is_visible(current_page) {
            return Ok(false);
        }
        let Position { column, row, .. } = self.position;
        output.send_lighting_command(lighting_command(column, row, self.color))?;
        Ok(true)
    }

    pub(crate) fn handle_input<E, O>(
        &mut self,
        input: ButtonInput,
        engine: &mut E,
        session: &mut Session,
        output: &mut O,
    ) -> crate::Result<Option<Followup>>
    where
        E: Engine + ?Sized,
        O: LightingOutput + ?Sized,
    {
        self.pressed = input.is_pressed();
        match input {
            ButtonInput::Pressed => self.press(engine, session, output),
            ButtonInput::Released => self.release(engine, session, output),
        }
    }

    pub(crate) fn press<E, O>(
        &mut self,
        engine: &mut E,
        session: &mut Session,
        output: &mut O,
    ) -> crate::Result<Option<Followup>>
    where
        E: Engine + ?Sized,
        O: LightingOutput + ?Sized,
    {
        let mut context = Context {
            engine,
            session,
            pressed: true,
        };
        let reaction = self.behavior.on_press(&mut context)?;
        if let Some(color) = reaction.color {
            self.set_color(color, context.session.current_page(), output)?;
        }
        Ok(reaction.followup)
    }

    pub(crate) fn release<E, O>(
        &mut self,
        engine: &mut E,
        session: &mut Session,
        output: &mut O,
    ) -> crate::Result<Option<Followup>>
    where
        E: Engine + ?Sized,
        O: LightingOutput + ?Sized,
    {
        let mut context = Context {
            engine,
            session,
            pressed: false,
        };
        let reaction = self.behavior.on_release(&mut context)?;
        if let Some(color) = reaction.color {
            self.set_color(color, context.session.current_page(), output)?;
        }
        Ok(reaction.followup)
    }

    /// Recompute a color that depends on the engine state.
    pub(crate) fn refresh<E, O>(
        &mut self,
        engine: &E,
        current_page: u8,
        output: &mut O,
    ) -> crate::Result<()>
    where
        E: Engine + ?Sized,
        O: LightingOutput + ?Sized,
    {
        let Some(color) = self.behavior.led_color(self.pressed, engine)? else {
            return Ok(());
        };
        self.set_color(color, current_page, output)?;
        Ok(())
    }
}
