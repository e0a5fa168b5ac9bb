//! Color values for rich text.
//!
//! A [`Color`] is an immutable RGB value paired with the legacy palette color
//! it falls back to. The fallback is either computed by nearest-color search
//! or forced by an explicit `#RRGGBB|c` override.
//!
//! Whether a color is written as RGB or as its legacy fallback is decided per
//! render call through [`RenderMode`]; the color itself never changes.
//!
//! # Examples
//!
//! ```
//! use rgb_text::color::{Color, RenderMode};
//! use rgb_text::palette::LegacyCode;
//!
//! let orange = Color::from_hex("#FF8800").unwrap();
//! assert_eq!(orange.legacy(), LegacyCode::Gold);
//! assert_eq!(orange.name(RenderMode::Rgb), "#FF8800");
//! assert_eq!(orange.name(RenderMode::Legacy), "gold");
//!
//! let forced = Color::from_hex_forced("#FF8800", LegacyCode::Red).unwrap();
//! assert!(forced.is_forced());
//! assert_eq!(forced.legacy(), LegacyCode::Red);
//! ```

use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::LazyLock;
use std::sync::Mutex;

use crate::palette::{self, LegacyCode};
use crate::sync::lock_recover;

/// RGB color triplet with values 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorTriplet {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColorTriplet {
    /// Create a new color triplet from RGB components.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns the uppercase hex format `#RRGGBB`.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Parse `#` followed by exactly six hex digits.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Convert hue, saturation and brightness (each 0.0-1.0) to RGB.
    ///
    /// Only the fractional part of `hue` is used.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "channels are scaled into 0.0-255.5 and saturate on cast"
    )]
    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        let scale = |v: f32| (v * 255.0 + 0.5) as u8;

        if saturation.abs() < f32::EPSILON {
            let v = scale(brightness);
            return Self::new(v, v, v);
        }

        let sector = (hue - hue.floor()) * 6.0;
        let fraction = sector - sector.floor();
        let p = brightness * (1.0 - saturation);
        let q = brightness * (1.0 - saturation * fraction);
        let t = brightness * (1.0 - saturation * (1.0 - fraction));

        let (r, g, b) = match sector as u8 {
            0 => (brightness, t, p),
            1 => (q, brightness, p),
            2 => (p, brightness, t),
            3 => (p, q, brightness),
            4 => (t, p, brightness),
            _ => (brightness, p, q),
        };

        Self::new(scale(r), scale(g), scale(b))
    }
}

impl From<(u8, u8, u8)> for ColorTriplet {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<[u8; 3]> for ColorTriplet {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl fmt::Display for ColorTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

/// How colors are written when a component is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderMode {
    /// Full RGB: palette names for exact palette colors, `#RRGGBB` otherwise.
    #[default]
    Rgb,
    /// Every color is written as its legacy palette fallback.
    Legacy,
}

/// An RGB color with its legacy palette fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    triplet: ColorTriplet,
    legacy: LegacyCode,
    forced: bool,
}

impl Color {
    /// Create a color from RGB components.
    #[must_use]
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::from_triplet(ColorTriplet::new(red, green, blue))
    }

    /// Create a color from a triplet; the fallback is the nearest palette color.
    #[must_use]
    pub fn from_triplet(triplet: ColorTriplet) -> Self {
        Self {
            triplet,
            legacy: palette::nearest(triplet),
            forced: false,
        }
    }

    /// Create a color from a palette code.
    ///
    /// Style flags and reset carry no RGB and resolve to white, which is what
    /// a reset renders as.
    #[must_use]
    pub fn from_palette(code: LegacyCode) -> Self {
        let code = if code.is_color() { code } else { LegacyCode::White };
        Self {
            triplet: code.rgb().unwrap_or_default(),
            legacy: code,
            forced: false,
        }
    }

    /// Parse `#RRGGBB`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError::InvalidColorFormat`] unless the input is `#`
    /// followed by exactly six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        ColorTriplet::from_hex(hex)
            .map(Self::from_triplet)
            .ok_or_else(|| ColorParseError::InvalidColorFormat(hex.to_string()))
    }

    /// Parse `#RRGGBB` with an explicit legacy fallback.
    ///
    /// The override must be one of the 16 colors; any other code falls back to
    /// nearest-color search and the color is not marked as forced.
    ///
    /// # Errors
    ///
    /// Same as [`Color::from_hex`].
    pub fn from_hex_forced(hex: &str, legacy: LegacyCode) -> Result<Self, ColorParseError> {
        let color = Self::from_hex(hex)?;
        if !legacy.is_color() {
            return Ok(color);
        }
        Ok(Self {
            legacy,
            forced: true,
            ..color
        })
    }

    /// Create a color from hue, saturation and brightness.
    #[must_use]
    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        Self::from_triplet(ColorTriplet::from_hsb(hue, saturation, brightness))
    }

    /// Parse a color string (cached).
    ///
    /// Supported formats:
    /// - Hex format: `#FF0000`
    /// - Palette color names: `red`, `dark_aqua`, `light_purple`
    ///
    /// # Errors
    ///
    /// Returns `ColorParseError` if the color string is invalid:
    /// - `Empty` if the string is empty
    /// - `InvalidColorFormat` if hex format is malformed
    /// - `UnknownColor` if the name is not one of the 16 palette colors
    pub fn parse(color: &str) -> Result<Self, ColorParseError> {
        static CACHE: LazyLock<Mutex<LruCache<String, Color>>> =
            LazyLock::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(256).expect("non-zero"))));

        let normalized = color.trim().to_lowercase();

        let cached = lock_recover(&CACHE).get(&normalized).copied();
        if let Some(cached) = cached {
            return Ok(cached);
        }

        let result = Self::parse_uncached(&normalized)?;
        lock_recover(&CACHE).put(normalized, result);

        Ok(result)
    }

    fn parse_uncached(color: &str) -> Result<Self, ColorParseError> {
        if color.is_empty() {
            return Err(ColorParseError::Empty);
        }

        if color.starts_with('#') {
            return Self::from_hex(color);
        }

        match LegacyCode::from_name(color) {
            Some(code) if code.is_color() => Ok(Self::from_palette(code)),
            _ => Err(ColorParseError::UnknownColor(color.to_string())),
        }
    }

    /// The RGB value.
    #[must_use]
    pub const fn triplet(&self) -> ColorTriplet {
        self.triplet
    }

    /// Red channel.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.triplet.red
    }

    /// Green channel.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.triplet.green
    }

    /// Blue channel.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.triplet.blue
    }

    /// Uppercase `#RRGGBB`.
    #[must_use]
    pub fn hex(&self) -> String {
        self.triplet.hex()
    }

    /// The legacy palette color this falls back to.
    #[must_use]
    pub const fn legacy(&self) -> LegacyCode {
        self.legacy
    }

    /// True when the fallback came from an explicit override.
    #[must_use]
    pub const fn is_forced(&self) -> bool {
        self.forced
    }

    /// The value written to a JSON `color` field.
    #[must_use]
    pub fn name(&self, mode: RenderMode) -> String {
        match mode {
            RenderMode::Legacy => self.legacy.name().to_string(),
            RenderMode::Rgb => palette::exact(self.triplet)
                .map_or_else(|| self.hex(), |code| code.name().to_string()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ColorTriplet> for Color {
    fn from(triplet: ColorTriplet) -> Self {
        Self::from_triplet(triplet)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::from_rgb(red, green, blue)
    }
}

impl From<LegacyCode> for Color {
    fn from(code: LegacyCode) -> Self {
        Self::from_palette(code)
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidColorFormat(String),
    UnknownColor(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::InvalidColorFormat(s) => write!(f, "Invalid color format: {s}"),
            Self::UnknownColor(s) => write!(f, "Unknown color: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}
