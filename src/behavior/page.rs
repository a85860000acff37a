// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use super::{Followup, Reaction};
use crate::Color;

/// Switches the current page.
///
/// Each page has one selector that is present on every page at the
/// same position. The selector of the current page is lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSelect {
    page: u8,
}

impl PageSelect {
    pub const SELECTED_COLOR: Color = Color::HiAmber;
    pub const UNSELECTED_COLOR: Color = Color::Black;

    #[must_use]
    pub const fn new(page: u8) -> Self {
        Self { page }
    }

    #[must_use]
    pub const fn page(&self) -> u8 {
        self.page
    }

    pub(crate) const fn on_press(&self) -> Reaction {
        Reaction::followup(Followup::SelectPage(self.page))
    }
}
