// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Symbolic LED colors of the bi-color (red/green) grid buttons.
//!
//! The device codes include the "copy" flag (bit 2) that updates both
//! display buffers at once.

use std::str::FromStr;

use strum::{EnumCount, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

/// Updates both buffers.
const COPY_FLAG: u8 = 0x04;

const fn red_green(red: u8, green: u8) -> u8 {
    debug_assert!(red <= 3);
    debug_assert!(green <= 3);
    (green << 4) | red | COPY_FLAG
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color \"{name}\"")]
pub struct UnknownColorError {
    pub name: String,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    EnumCount,
    EnumString,
    IntoStaticStr,
    strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum Color {
    #[default]
    Black,
    LoRed,
    MiRed,
    HiRed,
    LoGreen,
    MiGreen,
    HiGreen,
    LoAmber,
    MiAmber,
    HiAmber,
    LoOrange,
    HiOrange,
    LoYellow,
    HiYellow,
}

impl Color {
    /// Look up a color by its symbolic name, e.g. `hi_amber`.
    pub fn from_name(name: &str) -> Result<Self, UnknownColorError> {
        Self::from_str(name).map_err(|_| UnknownColorError {
            name: name.to_owned(),
        })
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The velocity byte understood by the device.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Black => red_green(0, 0),
            Self::LoRed => red_green(1, 0),
            Self::MiRed => red_green(2, 0),
            Self::HiRed => red_green(3, 0),
            Self::LoGreen => red_green(0, 1),
            Self::MiGreen => red_green(0, 2),
            Self::HiGreen => red_green(0, 3),
            Self::LoAmber => red_green(1, 1),
            Self::MiAmber => red_green(2, 2),
            Self::HiAmber => red_green(3, 3),
            Self::LoOrange => red_green(2, 1),
            Self::HiOrange => red_green(3, 2),
            Self::LoYellow => red_green(1, 2),
            Self::HiYellow => red_green(2, 3),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator as _;

    use super::*;

    #[test]
    fn codes() {
        assert_eq!(4, Color::Black.code());
        assert_eq!(5, Color::LoRed.code());
        assert_eq!(7, Color::HiRed.code());
        assert_eq!(20, Color::LoGreen.code());
        assert_eq!(52, Color::HiGreen.code());
        assert_eq!(55, Color::HiAmber.code());
        assert_eq!(22, Color::LoOrange.code());
        assert_eq!(39, Color::HiOrange.code());
        assert_eq!(37, Color::LoYellow.code());
        assert_eq!(54, Color::HiYellow.code());
    }

    #[test]
    fn names() {
        for color in Color::iter() {
            assert_eq!(Ok(color), Color::from_name(color.name()));
        }
        assert_eq!("hi_amber", Color::HiAmber.name());
        assert_eq!("lo_green", Color::LoGreen.to_string());
    }

    #[test]
    fn unknown_name() {
        let err = Color::from_name("purple").unwrap_err();
        assert_eq!("purple", err.name);
        assert!(Color::from_name("HiAmber").is_err());
    }
}
