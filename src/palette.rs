//! The fixed legacy palette.
//!
//! Sixteen colors, five style flags and a reset code, each selected in text by
//! the [`LEGACY_MARKER`] followed by a single code character. The palette is a
//! static table of [`PaletteEntry`] records keyed by [`LegacyCode`].
//!
//! # Examples
//!
//! ```
//! use rgb_text::color::ColorTriplet;
//! use rgb_text::palette::{self, LegacyCode};
//!
//! assert_eq!(LegacyCode::from_char('c'), Some(LegacyCode::Red));
//! assert_eq!(LegacyCode::Red.to_string(), "\u{a7}c");
//! assert_eq!(palette::nearest(ColorTriplet::new(250, 250, 250)), LegacyCode::White);
//! ```

use std::fmt;

use crate::color::ColorTriplet;

/// Marker character that introduces a legacy format code.
pub const LEGACY_MARKER: char = '\u{a7}';

/// One of the 22 legacy format codes.
///
/// The discriminant is the network id and the index into [`PALETTE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum LegacyCode {
    Black = 0,
    DarkBlue = 1,
    DarkGreen = 2,
    DarkAqua = 3,
    DarkRed = 4,
    DarkPurple = 5,
    Gold = 6,
    Gray = 7,
    DarkGray = 8,
    Blue = 9,
    Green = 10,
    Aqua = 11,
    Red = 12,
    LightPurple = 13,
    Yellow = 14,
    White = 15,
    Obfuscated = 16,
    Bold = 17,
    Strikethrough = 18,
    Underline = 19,
    Italic = 20,
    Reset = 21,
}

/// A row of the palette table.
#[derive(Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    /// The code this row describes.
    pub code: LegacyCode,
    /// Character written after the marker.
    pub character: char,
    /// Lowercase name used by the JSON `color` field.
    pub name: &'static str,
    /// Id used by the host protocol.
    pub network_id: u8,
    /// Display color. `None` for style flags and reset.
    pub rgb: Option<ColorTriplet>,
    /// Canonical `#RRGGBB` form of `rgb`.
    pub hex: Option<&'static str>,
}

const fn color(
    code: LegacyCode,
    character: char,
    name: &'static str,
    hex: &'static str,
    rgb: (u8, u8, u8),
) -> PaletteEntry {
    PaletteEntry {
        code,
        character,
        name,
        network_id: code as u8,
        rgb: Some(ColorTriplet::new(rgb.0, rgb.1, rgb.2)),
        hex: Some(hex),
    }
}

const fn format(code: LegacyCode, character: char, name: &'static str) -> PaletteEntry {
    PaletteEntry {
        code,
        character,
        name,
        network_id: code as u8,
        rgb: None,
        hex: None,
    }
}

/// The palette, in declaration order.
///
/// Order matters: nearest-color search breaks ties in favor of earlier rows.
pub static PALETTE: [PaletteEntry; 22] = [
    color(LegacyCode::Black, '0', "black", "#000000", (0, 0, 0)),
    color(LegacyCode::DarkBlue, '1', "dark_blue", "#0000AA", (0, 0, 170)),
    color(LegacyCode::DarkGreen, '2', "dark_green", "#00AA00", (0, 170, 0)),
    color(LegacyCode::DarkAqua, '3', "dark_aqua", "#00AAAA", (0, 170, 170)),
    color(LegacyCode::DarkRed, '4', "dark_red", "#AA0000", (170, 0, 0)),
    color(LegacyCode::DarkPurple, '5', "dark_purple", "#AA00AA", (170, 0, 170)),
    color(LegacyCode::Gold, '6', "gold", "#FFAA00", (255, 170, 0)),
    color(LegacyCode::Gray, '7', "gray", "#AAAAAA", (170, 170, 170)),
    color(LegacyCode::DarkGray, '8', "dark_gray", "#555555", (85, 85, 85)),
    color(LegacyCode::Blue, '9', "blue", "#5555FF", (85, 85, 255)),
    color(LegacyCode::Green, 'a', "green", "#55FF55", (85, 255, 85)),
    color(LegacyCode::Aqua, 'b', "aqua", "#55FFFF", (85, 255, 255)),
    color(LegacyCode::Red, 'c', "red", "#FF5555", (255, 85, 85)),
    color(LegacyCode::LightPurple, 'd', "light_purple", "#FF55FF", (255, 85, 255)),
    color(LegacyCode::Yellow, 'e', "yellow", "#FFFF55", (255, 255, 85)),
    color(LegacyCode::White, 'f', "white", "#FFFFFF", (255, 255, 255)),
    format(LegacyCode::Obfuscated, 'k', "obfuscated"),
    format(LegacyCode::Bold, 'l', "bold"),
    format(LegacyCode::Strikethrough, 'm', "strikethrough"),
    format(LegacyCode::Underline, 'n', "underline"),
    format(LegacyCode::Italic, 'o', "italic"),
    format(LegacyCode::Reset, 'r', "reset"),
];

impl LegacyCode {
    /// The 16 colors in declaration order.
    pub const COLORS: [Self; 16] = [
        Self::Black,
        Self::DarkBlue,
        Self::DarkGreen,
        Self::DarkAqua,
        Self::DarkRed,
        Self::DarkPurple,
        Self::Gold,
        Self::Gray,
        Self::DarkGray,
        Self::Blue,
        Self::Green,
        Self::Aqua,
        Self::Red,
        Self::LightPurple,
        Self::Yellow,
        Self::White,
    ];

    /// The style flags in the order they are rendered.
    pub const STYLES: [Self; 5] = [
        Self::Bold,
        Self::Italic,
        Self::Underline,
        Self::Strikethrough,
        Self::Obfuscated,
    ];

    /// The palette row for this code.
    #[must_use]
    pub fn entry(self) -> &'static PaletteEntry {
        &PALETTE[self as usize]
    }

    /// Character written after the marker.
    #[must_use]
    pub fn character(self) -> char {
        self.entry().character
    }

    /// Lowercase name, e.g. `"dark_aqua"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Display color, for the 16 colors only.
    #[must_use]
    pub fn rgb(self) -> Option<ColorTriplet> {
        self.entry().rgb
    }

    /// Returns true for the 16 colors.
    #[must_use]
    pub const fn is_color(self) -> bool {
        (self as u8) < 16
    }

    /// Returns true for bold, italic, underline, strikethrough and obfuscated.
    #[must_use]
    pub const fn is_style(self) -> bool {
        matches!(
            self,
            Self::Obfuscated | Self::Bold | Self::Strikethrough | Self::Underline | Self::Italic
        )
    }

    /// Returns true for the reset code.
    #[must_use]
    pub const fn is_reset(self) -> bool {
        matches!(self, Self::Reset)
    }

    /// Look up a code by its character. Only lowercase characters match.
    #[must_use]
    pub fn from_char(character: char) -> Option<Self> {
        PALETTE
            .iter()
            .find(|entry| entry.character == character)
            .map(|entry| entry.code)
    }

    /// Look up a code by its lowercase name (ASCII case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        PALETTE
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
            .map(|entry| entry.code)
    }
}

impl fmt::Display for LegacyCode {
    /// Writes the two-character marker form, e.g. `§c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LEGACY_MARKER}{}", self.character())
    }
}

/// Nearest palette color by Chebyshev distance.
///
/// Distance is `max(|dr|, |dg|, |db|)`. The first color with the smallest
/// distance wins, so ties resolve in declaration order.
#[must_use]
pub fn nearest(triplet: ColorTriplet) -> LegacyCode {
    let mut best = LegacyCode::White;
    let mut best_distance = u16::MAX;

    for code in LegacyCode::COLORS {
        let Some(rgb) = code.rgb() else {
            continue;
        };
        let distance = u16::from(chebyshev(triplet, rgb));
        if distance < best_distance {
            best_distance = distance;
            best = code;
        }
    }

    best
}

/// Palette color with exactly this RGB value, if any.
#[must_use]
pub fn exact(triplet: ColorTriplet) -> Option<LegacyCode> {
    LegacyCode::COLORS
        .into_iter()
        .find(|code| code.rgb() == Some(triplet))
}

fn chebyshev(a: ColorTriplet, b: ColorTriplet) -> u8 {
    a.red
        .abs_diff(b.red)
        .max(a.green.abs_diff(b.green))
        .max(a.blue.abs_diff(b.blue))
}
