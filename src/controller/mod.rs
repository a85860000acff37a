// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::collections::{btree_map::Entry, BTreeMap};

use strum::IntoEnumIterator as _;

use crate::{
    behavior::{BeatLoopSize, Followup, LoopMode, LoopModeGroup},
    devices::novation_launchpad_mini::{translate_coordinate, try_decode_midi_input},
    engine::{ControlKey, Engine, EngineResult, NUM_DECKS_ITEM},
    Behavior, Button, Error, Grid, GridLayout, Hotcue, LightingOutput, LoopModeSelector, LoopSize,
    MidiInputHandler, PageSelect, Position, RawEvent, Result, Shift, TimeStamp, Transport,
};

/// Hot cue pads per deck, one lane.
const NUM_HOTCUES_PER_DECK: u8 = 8;

/// Mutable state shared by all buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current_page: u8,
    shift_active: bool,
    number_of_decks: u8,
    loop_mode: LoopModeGroup,
}

impl Session {
    #[must_use]
    pub fn new(number_of_decks: u8) -> Self {
        Self {
            number_of_decks,
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn current_page(&self) -> u8 {
        self.current_page
    }

    #[must_use]
    pub const fn is_shift_active(&self) -> bool {
        self.shift_active
    }

    #[must_use]
    pub const fn number_of_decks(&self) -> u8 {
        self.number_of_decks
    }

    #[must_use]
    pub const fn loop_mode(&self) -> &LoopModeGroup {
        &self.loop_mode
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        SessionState {
            current_page: self.current_page,
            shift_active: self.shift_active,
            loop_mode: self.loop_mode.mode(),
        }
    }

    pub(crate) fn set_shift_active(&mut self, shift_active: bool) {
        self.shift_active = shift_active;
    }

    pub(crate) fn set_current_page(&mut self, current_page: u8) {
        self.current_page = current_page;
    }

    pub(crate) fn loop_mode_mut(&mut self) -> &mut LoopModeGroup {
        &mut self.loop_mode
    }
}

/// Snapshot of the [`Session`] for observers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    pub current_page: u8,
    pub shift_active: bool,
    pub loop_mode: LoopMode,
}

#[cfg(feature = "observables")]
#[derive(Default)]
#[allow(missing_debug_implementations)]
pub struct Observables {
    pub session: discro::Publisher<SessionState>,
}

#[cfg(feature = "observables")]
impl Observables {
    pub fn on_session_changed(&mut self, state: SessionState) {
        self.session.modify(|published| {
            if *published == state {
                // Unchanged
                return false;
            }
            *published = state;
            true
        });
    }
}

/// Maps a grid controller onto the engine.
///
/// All inputs and engine notifications are processed one at a time
/// through `&mut self`.
#[allow(missing_debug_implementations)]
pub struct GridController<E, O> {
    layout: GridLayout,
    grid: Grid,
    session: Session,
    engine: E,
    output: O,
    subscriptions: BTreeMap<ControlKey, Vec<Position>>,
    attached: bool,
    #[cfg(feature = "observables")]
    observables: Observables,
}

fn read_number_of_decks<E>(engine: &E) -> EngineResult<u8>
where
    E: Engine + ?Sized,
{
    let value = engine.get_value(&ControlKey::master(NUM_DECKS_ITEM))?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let number_of_decks = value.round().clamp(0.0, f64::from(u8::MAX)) as u8;
    Ok(number_of_decks)
}

impl<E, O> GridController<E, O>
where
    E: Engine,
    O: LightingOutput,
{
    #[must_use]
    pub fn new(layout: GridLayout, engine: E, output: O) -> Self {
        let grid = Grid::new(layout.clone());
        Self {
            layout,
            grid,
            session: Session::default(),
            engine,
            output,
            subscriptions: BTreeMap::new(),
            attached: false,
            #[cfg(feature = "observables")]
            observables: Observables::default(),
        }
    }

    #[must_use]
    pub const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Direct access to the engine, e.g. for draining notifications.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    #[must_use]
    pub const fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    #[cfg(feature = "observables")]
    #[must_use]
    pub const fn observables(&self) -> &Observables {
        &self.observables
    }

    /// Controls with at least one subscribed button.
    pub fn subscribed_controls(&self) -> impl Iterator<Item = &ControlKey> + '_ {
        self.subscriptions.keys()
    }

    #[must_use]
    pub fn into_parts(self) -> (E, O) {
        let Self { engine, output, .. } = self;
        (engine, output)
    }

    /// Build the default mapping and light the first page.
    pub fn initialize(&mut self) -> Result<()> {
        self.layout.validate()?;
        if self.attached {
            log::warn!("Reinitializing grid controller");
            self.shutdown()?;
        }
        log::info!(
            "Initializing grid controller with {num_pages} pages",
            num_pages = self.layout.num_pages
        );
        self.output.reset()?;
        let number_of_decks = read_number_of_decks(&self.engine)?;
        log::info!("Mapping {number_of_decks} deck(s)");
        self.session = Session::new(number_of_decks);
        self.grid = Grid::new(self.layout.clone());
        self.disconnect_all();
        self.install_default_buttons()?;
        let current_page = self.session.current_page();
        self.recolor_page_indicator(current_page, PageSelect::SELECTED_COLOR);
        self.attached = true;
        self.redraw_page(current_page)?;
        self.publish_session();
        Ok(())
    }

    fn install_default_buttons(&mut self) -> Result<()> {
        let layout = self.layout.clone();
        for page in 0..layout.num_pages {
            for selected_page in 0..layout.num_pages {
                if selected_page >= layout.meta_row {
                    log::warn!("No room for selecting page {selected_page}");
                    break;
                }
                self.install_button(Button::new(
                    Position::new(page, layout.page_select_column, selected_page),
                    PageSelect::new(selected_page),
                ))?;
            }
            self.install_button(Button::new(
                Position::new(page, layout.shift_column, layout.meta_row),
                Shift::default(),
            ))?;
        }
        self.install_button(Button::new(
            Position::new(0, layout.loop_mode_column, layout.meta_row),
            LoopModeSelector,
        ))?;
        for deck in 1..=self.session.number_of_decks() {
            let Some((transport_row, hotcue_row)) = layout.deck_rows(deck) else {
                log::warn!(
                    "Skipping deck {deck}: Only {max_decks} decks fit onto the grid",
                    max_decks = layout.max_decks
                );
                continue;
            };
            self.install_button(Button::new(
                Position::new(0, 0, transport_row),
                Transport::new(deck),
            ))?;
            for size in BeatLoopSize::iter() {
                let Some(column) = layout.loop_size_column(size) else {
                    log::debug!("No room for loop size {size}", size = size.as_str());
                    continue;
                };
                self.install_button(Button::new(
                    Position::new(0, column, transport_row),
                    LoopSize::new(deck, size),
                ))?;
            }
            for slot in 1..=NUM_HOTCUES_PER_DECK {
                let column = slot - 1;
                if column >= layout.page_select_column {
                    break;
                }
                self.install_button(Button::new(
                    Position::new(0, column, hotcue_row),
                    Hotcue::new(deck, slot),
                ))?;
            }
        }
        Ok(())
    }

    /// Install a button at its position, replacing the previous one.
    ///
    /// The button is drawn immediately if the controller is attached
    /// and its page is visible.
    pub fn install_button(&mut self, mut button: Button) -> Result<()> {
        let position = button.position();
        let mut color = button
            .behavior()
            .initial_color(self.session.loop_mode().mode());
        if let Some(engine_color) = button.behavior().led_color(false, &self.engine)? {
            color = engine_color;
        }
        button.recolor(color);
        let subscriptions = button.behavior().subscriptions();
        let is_loop_size = matches!(button.behavior(), Behavior::LoopSize(_));
        let replaced = self.grid.replace(button)?;
        self.uninstall(&replaced);
        for key in subscriptions {
            self.subscribe(key, position)?;
        }
        if is_loop_size {
            self.session.loop_mode_mut().register(position);
        }
        if !self.attached {
            return Ok(());
        }
        let current_page = self.session.current_page();
        if let Some(button) = self.grid.get(position) {
            button.draw(current_page, &mut self.output)?;
        }
        Ok(())
    }

    fn uninstall(&mut self, button: &Button) {
        let position = button.position();
        if matches!(button.behavior(), Behavior::LoopSize(_)) {
            self.session.loop_mode_mut().unregister(position);
        }
        for key in button.behavior().subscriptions() {
            self.unsubscribe(&key, position);
        }
    }

    fn subscribe(&mut self, key: ControlKey, position: Position) -> EngineResult<()> {
        match self.subscriptions.entry(key) {
            Entry::Occupied(mut entry) => {
                let positions = entry.get_mut();
                if !positions.contains(&position) {
                    positions.push(position);
                }
            }
            Entry::Vacant(entry) => {
                self.engine.connect_control(entry.key())?;
                log::debug!("Connected {key}", key = entry.key());
                entry.insert(vec![position]);
            }
        }
        Ok(())
    }

    fn unsubscribe(&mut self, key: &ControlKey, position: Position) {
        let Some(positions) = self.subscriptions.get_mut(key) else {
            return;
        };
        positions.retain(|subscribed| *subscribed != position);
        if !positions.is_empty() {
            return;
        }
        self.subscriptions.remove(key);
        if let Err(err) = self.engine.disconnect_control(key) {
            log::warn!("Failed to disconnect {key}: {err}");
        }
    }

    fn disconnect_all(&mut self) {
        for key in std::mem::take(&mut self.subscriptions).into_keys() {
            if let Err(err) = self.engine.disconnect_control(&key) {
                log::warn!("Failed to disconnect {key}: {err}");
            }
        }
    }

    /// Disconnect from the engine and turn off all LEDs.
    ///
    /// Subsequent events are rejected until initialized again.
    pub fn shutdown(&mut self) -> Result<()> {
        // Buttons might have been installed while detached
        self.disconnect_all();
        if !self.attached {
            log::debug!("Grid controller is not attached");
            return Ok(());
        }
        log::info!("Shutting down grid controller");
        self.attached = false;
        self.output.reset()?;
        Ok(())
    }

    /// Handle a single input event.
    ///
    /// Errors only affect this event.
    pub fn dispatch(&mut self, event: &RawEvent) -> Result<()> {
        let result = self.dispatch_input(event);
        self.publish_session();
        result
    }

    fn dispatch_input(&mut self, event: &RawEvent) -> Result<()> {
        if !self.attached {
            return Err(Error::Detached);
        }
        let (column, row) = translate_coordinate(event.control, event.status);
        let position = Position::new(self.session.current_page(), column, row);
        let Some(button) = self.grid.get_mut(position) else {
            return Err(Error::UnaddressedButton { column, row });
        };
        let input = event.button_input();
        log::trace!("{input:?} button {position}");
        let followup =
            button.handle_input(input, &mut self.engine, &mut self.session, &mut self.output)?;
        match followup {
            Some(Followup::SelectPage(page)) => self.select_page(page),
            Some(Followup::RecolorLoopSizes) => self.recolor_loop_sizes(),
            None => Ok(()),
        }
    }

    /// Like [`GridController::dispatch()`], but only logs errors.
    ///
    /// Returns `true` if the event has been handled.
    pub fn on_incoming_event(&mut self, event: &RawEvent) -> bool {
        match self.dispatch(event) {
            Ok(()) => true,
            Err(Error::Detached) => {
                log::debug!("Ignoring {event:?}: Grid controller is not attached");
                false
            }
            Err(err) => {
                log::warn!("Failed to handle {event:?}: {err}");
                false
            }
        }
    }

    /// Refresh all buttons that are subscribed to the control.
    pub fn on_engine_control_changed(&mut self, key: &ControlKey) -> Result<()> {
        let Some(positions) = self.subscriptions.get(key) else {
            log::debug!("No buttons subscribed to {key}");
            return Ok(());
        };
        let current_page = self.session.current_page();
        for position in positions {
            let Some(button) = self.grid.get_mut(*position) else {
                continue;
            };
            button.refresh(&self.engine, current_page, &mut self.output)?;
        }
        Ok(())
    }

    /// Switch the visible page.
    ///
    /// Nonexistent pages are ignored.
    pub fn select_page(&mut self, page: u8) -> Result<()> {
        if !self.attached {
            return Err(Error::Detached);
        }
        if page >= self.layout.num_pages {
            log::warn!(
                "Cannot select page {page}: Only {num_pages} pages available",
                num_pages = self.layout.num_pages
            );
            return Ok(());
        }
        let current_page = self.session.current_page();
        self.set_page_indicator_color(current_page, PageSelect::UNSELECTED_COLOR)?;
        self.session.set_current_page(page);
        log::info!("Selected page {page}");
        self.set_page_indicator_color(page, PageSelect::SELECTED_COLOR)?;
        self.recolor_shift_lights();
        self.redraw_page(page)?;
        self.publish_session();
        Ok(())
    }

    /// Shift might have been released on another page.
    fn recolor_shift_lights(&mut self) {
        let shift_active = self.session.is_shift_active();
        for button in self.grid.iter_mut() {
            let Behavior::Shift(shift) = button.behavior() else {
                continue;
            };
            let color = shift.color(shift_active);
            button.recolor(color);
        }
    }

    const fn page_indicator_position(&self, page: u8) -> Position {
        Position::new(page, self.layout.page_select_column, page)
    }

    fn recolor_page_indicator(&mut self, page: u8, color: crate::Color) {
        let position = self.page_indicator_position(page);
        if let Some(button) = self.grid.get_mut(position) {
            button.recolor(color);
        }
    }

    fn set_page_indicator_color(&mut self, page: u8, color: crate::Color) -> Result<()> {
        let position = self.page_indicator_position(page);
        let current_page = self.session.current_page();
        let Some(button) = self.grid.get_mut(position) else {
            log::debug!("No page indicator at {position}");
            return Ok(());
        };
        button.set_color(color, current_page, &mut self.output)?;
        Ok(())
    }

    /// Draw all buttons of a page.
    ///
    /// Nothing is drawn unless the page is visible.
    pub fn redraw_page(&mut self, page: u8) -> Result<()> {
        let current_page = self.session.current_page();
        if page != current_page {
            log::debug!("Not redrawing invisible page {page}");
            return Ok(());
        }
        for button in self.grid.page(page) {
            button.draw(current_page, &mut self.output)?;
        }
        Ok(())
    }

    fn recolor_loop_sizes(&mut self) -> Result<()> {
        let mode = self.session.loop_mode().mode();
        log::info!("Switched loop mode to {mode:?}");
        let color = LoopSize::rest_color(mode);
        let current_page = self.session.current_page();
        for position in self.session.loop_mode().members() {
            let Some(button) = self.grid.get_mut(*position) else {
                continue;
            };
            button.set_color(color, current_page, &mut self.output)?;
        }
        Ok(())
    }

    /// Set the color of any button by its palette name.
    pub fn set_button_color(&mut self, position: Position, color_name: &str) -> Result<()> {
        let current_page = self.session.current_page();
        let Some(button) = self.grid.get_mut(position) else {
            return Err(Error::UnaddressedButton {
                column: position.column,
                row: position.row,
            });
        };
        button.set_color_name(color_name, current_page, &mut self.output)
    }

    #[cfg_attr(
        not(feature = "observables"),
        allow(clippy::unused_self, clippy::missing_const_for_fn)
    )]
    fn publish_session(&mut self) {
        #[cfg(feature = "observables")]
        self.observables.on_session_changed(self.session.state());
    }
}

impl<E, O> MidiInputHandler for GridController<E, O>
where
    E: Engine + Send,
    O: LightingOutput + Send,
{
    fn handle_midi_input(&mut self, ts: TimeStamp, input: &[u8]) -> bool {
        let Ok(event) = try_decode_midi_input(input) else {
            log::warn!("Failed to decode MIDI input: {ts} {input:x?}");
            return false;
        };
        log::trace!("Received {event:?} at {ts}");
        self.on_incoming_event(&event)
    }
}
