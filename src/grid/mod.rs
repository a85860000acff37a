// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use crate::{behavior::BeatLoopSize, Behavior, Button, Error, Position, Result};

/// Dimensions and reserved coordinates of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub num_pages: u8,
    pub num_columns: u8,
    pub num_rows: u8,

    /// The row of round buttons on top.
    pub meta_row: u8,

    /// The column of round buttons on the right side, holding
    /// one page selector per page.
    pub page_select_column: u8,

    /// Column of the shift button in the meta row.
    pub shift_column: u8,

    /// Column of the loop mode selector in the meta row of the first page.
    pub loop_mode_column: u8,

    /// Decks beyond this limit do not fit onto the first page.
    pub max_decks: u8,
}

impl GridLayout {
    pub const LAUNCHPAD_MINI: Self = Self {
        num_pages: 8,
        num_columns: 9,
        num_rows: 9,
        meta_row: 8,
        page_select_column: 8,
        shift_column: 7,
        loop_mode_column: 2,
        max_decks: 4,
    };

    /// Columns and rows are both addressed by 4 bits.
    pub const MAX_EXTENT: u8 = 16;

    /// Check that all coordinates are addressable.
    pub fn validate(&self) -> Result<()> {
        let reason = if self.num_pages == 0 {
            "no pages"
        } else if !(1..=Self::MAX_EXTENT).contains(&self.num_columns) {
            "number of columns out of range"
        } else if !(1..=Self::MAX_EXTENT).contains(&self.num_rows) {
            "number of rows out of range"
        } else if self.meta_row >= self.num_rows {
            "meta row out of range"
        } else if self.page_select_column >= self.num_columns {
            "page select column out of range"
        } else if self.shift_column >= self.num_columns
            || self.loop_mode_column >= self.num_columns
        {
            "meta row button out of range"
        } else {
            return Ok(());
        };
        Err(Error::InvalidLayout { reason })
    }

    #[must_use]
    pub const fn num_buttons_per_page(&self) -> usize {
        self.num_columns as usize * self.num_rows as usize
    }

    #[must_use]
    pub const fn num_buttons(&self) -> usize {
        self.num_pages as usize * self.num_buttons_per_page()
    }

    #[must_use]
    pub const fn contains(&self, column: u8, row: u8) -> bool {
        column < self.num_columns && row < self.num_rows
    }

    #[must_use]
    pub const fn contains_position(&self, position: Position) -> bool {
        position.page < self.num_pages && self.contains(position.column, position.row)
    }

    /// Rows of the transport/loop lane and the hot cue lane of a deck.
    ///
    /// Decks are numbered from 1. Returns `None` if the deck does not fit.
    #[must_use]
    pub const fn deck_rows(&self, deck: u8) -> Option<(u8, u8)> {
        if deck == 0 || deck > self.max_decks {
            return None;
        }
        let Some(transport_row) = (deck - 1).checked_mul(2) else {
            return None;
        };
        let hotcue_row = transport_row + 1;
        if hotcue_row >= self.meta_row {
            return None;
        }
        Some((transport_row, hotcue_row))
    }

    /// Column of a loop size button in the transport lane.
    ///
    /// Loop sizes follow the transport button, leaving one column
    /// of space in between.
    #[must_use]
    pub const fn loop_size_column(&self, size: BeatLoopSize) -> Option<u8> {
        let column = 2 + size as u8;
        if column >= self.page_select_column {
            return None;
        }
        Some(column)
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::LAUNCHPAD_MINI
    }
}

/// Exactly one button per position of all pages.
#[derive(Debug, Clone)]
pub struct Grid {
    layout: GridLayout,
    buttons: Vec<Button>,
}

impl Grid {
    /// Fill all positions with [`Behavior::Plain`] buttons.
    #[must_use]
    pub fn new(layout: GridLayout) -> Self {
        let mut buttons = Vec::with_capacity(layout.num_buttons());
        for page in 0..layout.num_pages {
            for column in 0..layout.num_columns {
                for row in 0..layout.num_rows {
                    buttons.push(Button::new(
                        Position::new(page, column, row),
                        Behavior::Plain,
                    ));
                }
            }
        }
        Self { layout, buttons }
    }

    #[must_use]
    pub const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    fn index_of(&self, position: Position) -> Option<usize> {
        if !self.layout.contains_position(position) {
            return None;
        }
        let Position { page, column, row } = position;
        let index = (usize::from(page) * usize::from(self.layout.num_columns)
            + usize::from(column))
            * usize::from(self.layout.num_rows)
            + usize::from(row);
        Some(index)
    }

    #[must_use]
    pub fn get(&self, position: Position) -> Option<&Button> {
        self.index_of(position).map(|index| &self.buttons[index])
    }

    #[must_use]
    pub fn get_mut(&mut self, position: Position) -> Option<&mut Button> {
        self.index_of(position).map(|index| &mut self.buttons[index])
    }

    /// Install a button at its position.
    ///
    /// Returns the replaced button.
    pub fn replace(&mut self, button: Button) -> Result<Button> {
        let position = button.position();
        let Some(index) = self.index_of(position) else {
            return Err(Error::UnaddressedButton {
                column: position.column,
                row: position.row,
            });
        };
        Ok(std::mem::replace(&mut self.buttons[index], button))
    }

    /// All buttons of a page, ordered by column and row.
    ///
    /// Empty if the page does not exist.
    #[must_use]
    pub fn page(&self, page: u8) -> &[Button] {
        if page >= self.layout.num_pages {
            return &[];
        }
        let len = self.layout.num_buttons_per_page();
        let start = usize::from(page) * len;
        &self.buttons[start..start + len]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Button> + '_ {
        self.buttons.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Button> + '_ {
        self.buttons.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}
