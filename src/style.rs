//! Formatting shared by every run of rich text.
//!
//! A [`Style`] holds an optional [`Color`] and five attribute flags. Each flag
//! is tri-state: enabled, explicitly disabled, or unset (inherited from the
//! parent run). Unset flags are never serialized.

use std::fmt;

use bitflags::bitflags;

use crate::color::Color;
use crate::palette::{LEGACY_MARKER, LegacyCode};

bitflags! {
    /// Text attribute flags.
    ///
    /// Each flag corresponds to a legacy style code.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        /// Bold text (`§l`).
        const BOLD          = 1 << 0;
        /// Italic text (`§o`).
        const ITALIC        = 1 << 1;
        /// Underlined text (`§n`).
        const UNDERLINE     = 1 << 2;
        /// Struck-through text (`§m`).
        const STRIKETHROUGH = 1 << 3;
        /// Scrambled text (`§k`).
        const OBFUSCATED    = 1 << 4;
    }
}

impl Attributes {
    /// Flags with their legacy codes, in the order they are rendered.
    const LEGACY_CODES: [(Self, LegacyCode); 5] = [
        (Self::BOLD, LegacyCode::Bold),
        (Self::ITALIC, LegacyCode::Italic),
        (Self::UNDERLINE, LegacyCode::Underline),
        (Self::STRIKETHROUGH, LegacyCode::Strikethrough),
        (Self::OBFUSCATED, LegacyCode::Obfuscated),
    ];

    /// Flags with their JSON keys, in schema order.
    pub const JSON_KEYS: [(Self, &'static str); 5] = [
        (Self::BOLD, "bold"),
        (Self::ITALIC, "italic"),
        (Self::UNDERLINE, "underlined"),
        (Self::STRIKETHROUGH, "strikethrough"),
        (Self::OBFUSCATED, "obfuscated"),
    ];

    /// The flag selected by a legacy style code.
    #[must_use]
    pub fn from_code(code: LegacyCode) -> Option<Self> {
        Self::LEGACY_CODES
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(attr, _)| *attr)
    }

    /// Legacy codes for the enabled flags, e.g. `§l§n`.
    #[must_use]
    pub fn to_legacy_codes(&self) -> String {
        let mut codes = String::new();
        for (attr, code) in Self::LEGACY_CODES {
            if self.contains(attr) {
                codes.push(LEGACY_MARKER);
                codes.push(code.character());
            }
        }
        codes
    }
}

/// Color and attributes of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Text color; `None` inherits.
    pub color: Option<Color>,
    /// Enabled attributes.
    pub attributes: Attributes,
    /// Which attributes are explicitly set (vs inherited).
    pub set_attributes: Attributes,
}

impl Style {
    /// Create a style with nothing set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if neither a color nor any attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.set_attributes.is_empty()
    }

    /// Set the color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Enable bold text.
    #[must_use]
    pub fn bold(self) -> Self {
        self.with(Attributes::BOLD, true)
    }

    /// Enable italic text.
    #[must_use]
    pub fn italic(self) -> Self {
        self.with(Attributes::ITALIC, true)
    }

    /// Enable underlined text.
    #[must_use]
    pub fn underline(self) -> Self {
        self.with(Attributes::UNDERLINE, true)
    }

    /// Enable strikethrough text.
    #[must_use]
    pub fn strikethrough(self) -> Self {
        self.with(Attributes::STRIKETHROUGH, true)
    }

    /// Enable obfuscated text.
    #[must_use]
    pub fn obfuscated(self) -> Self {
        self.with(Attributes::OBFUSCATED, true)
    }

    /// Explicitly enable or disable an attribute.
    #[must_use]
    pub fn with(mut self, attr: Attributes, enabled: bool) -> Self {
        self.set(attr, Some(enabled));
        self
    }

    /// Set an attribute to enabled, disabled, or unset (`None`).
    pub fn set(&mut self, attr: Attributes, value: Option<bool>) {
        match value {
            Some(enabled) => {
                self.attributes.set(attr, enabled);
                self.set_attributes.insert(attr);
            }
            None => {
                self.attributes.remove(attr);
                self.set_attributes.remove(attr);
            }
        }
    }

    /// The tri-state value of an attribute.
    #[must_use]
    pub fn get(&self, attr: Attributes) -> Option<bool> {
        self.set_attributes
            .contains(attr)
            .then(|| self.attributes.contains(attr))
    }

    /// True only when the attribute is explicitly enabled.
    #[must_use]
    pub fn is_enabled(&self, attr: Attributes) -> bool {
        self.get(attr) == Some(true)
    }

    /// Flags that are explicitly enabled.
    #[must_use]
    pub fn enabled(&self) -> Attributes {
        self.attributes & self.set_attributes
    }

    /// Legacy form: the color's legacy code (white renders as reset) followed
    /// by the enabled style codes.
    #[must_use]
    pub fn to_legacy_formatting(&self) -> String {
        let mut formatting = String::new();
        if let Some(color) = &self.color {
            let code = match color.legacy() {
                LegacyCode::White => LegacyCode::Reset,
                code => code,
            };
            formatting.push(LEGACY_MARKER);
            formatting.push(code.character());
        }
        formatting.push_str(&self.enabled().to_legacy_codes());
        formatting
    }

    /// Flat form: the color as `#RRGGBB` followed by the enabled style codes.
    #[must_use]
    pub fn to_flat_formatting(&self) -> String {
        let mut formatting = self.color.map(|c| c.hex()).unwrap_or_default();
        formatting.push_str(&self.enabled().to_legacy_codes());
        formatting
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }

        let mut parts = Vec::new();
        for (attr, name) in Attributes::JSON_KEYS {
            match self.get(attr) {
                Some(true) => parts.push(name.to_string()),
                Some(false) => parts.push(format!("not {name}")),
                None => {}
            }
        }
        if let Some(color) = &self.color {
            parts.push(color.to_string());
        }

        write!(f, "{}", parts.join(" "))
    }
}
