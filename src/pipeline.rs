//! The color pipeline.
//!
//! A [`Pipeline`] owns an ordered list of markup normalizers, an ordered list
//! of gradient dialects and an RGB-support switch. Text flows through it as
//!
//! ```text
//! raw -> colorize -> normalizers -> gradients -> canonical (#RRGGBB + §codes)
//! ```
//!
//! after which it can be parsed into a [`StyledRun`] tree or downgraded to
//! plain legacy codes.
//!
//! # Examples
//!
//! ```
//! use rgb_text::pipeline::Pipeline;
//!
//! let pipeline = Pipeline::global();
//! assert_eq!(pipeline.apply_formats("{#FF00FF}hi", false), "#FF00FFhi");
//! assert_eq!(pipeline.convert_rgb_to_legacy("#FF5555hi &lthere"), "§chi §lthere");
//! ```

use regex::{Captures, Regex};
use smallvec::SmallVec;
use std::sync::LazyLock;

use crate::color::{Color, ColorTriplet};
use crate::component::StyledRun;
use crate::legacy::{colorize, trailing_active_codes};
use crate::markup::Normalizer;
use crate::markup::default_normalizers;
use crate::markup::gradient::{GradientDialect, default_gradients};
use crate::palette::{LEGACY_MARKER, LegacyCode};

static HEX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#([0-9a-fA-F]{6})(?:\|[0-9a-fA-F])?").expect("invalid regex")
});

/// Ordered dialects plus the RGB-support switch.
#[derive(Debug, Clone)]
pub struct Pipeline {
    normalizers: Vec<Normalizer>,
    gradients: Vec<GradientDialect>,
    rgb_supported: bool,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Create a pipeline with every built-in dialect and RGB support.
    #[must_use]
    pub fn new() -> Self {
        Self {
            normalizers: default_normalizers(),
            gradients: default_gradients(),
            rgb_supported: true,
        }
    }

    /// Create a pipeline with no dialects registered.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            normalizers: Vec::new(),
            gradients: Vec::new(),
            rgb_supported: true,
        }
    }

    /// The process-wide default pipeline.
    pub fn global() -> &'static Pipeline {
        static GLOBAL: LazyLock<Pipeline> = LazyLock::new(Pipeline::new);
        &GLOBAL
    }

    /// Append a normalizer.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizers.push(normalizer);
        self
    }

    /// Remove every normalizer with the given name.
    #[must_use]
    pub fn without_normalizer(mut self, name: &str) -> Self {
        self.normalizers.retain(|n| n.name != name);
        self
    }

    /// Append a gradient dialect.
    #[must_use]
    pub fn with_gradient(mut self, gradient: GradientDialect) -> Self {
        self.gradients.push(gradient);
        self
    }

    /// Remove every gradient dialect with the given name.
    #[must_use]
    pub fn without_gradient(mut self, name: &str) -> Self {
        self.gradients.retain(|g| g.name != name);
        self
    }

    /// Set whether the output target can display arbitrary RGB.
    #[must_use]
    pub fn with_rgb_support(mut self, rgb_supported: bool) -> Self {
        self.rgb_supported = rgb_supported;
        self
    }

    /// Whether the output target can display arbitrary RGB.
    #[must_use]
    pub const fn rgb_supported(&self) -> bool {
        self.rgb_supported
    }

    /// Names of the registered normalizers, in order.
    pub fn normalizer_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.normalizers.iter().map(|n| n.name)
    }

    /// Names of the registered gradient dialects, in order.
    pub fn gradient_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.gradients.iter().map(|g| g.name)
    }

    /// Run every normalizer in order.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let mut result = text.to_string();
        for normalizer in &self.normalizers {
            result = (normalizer.apply)(self, &result);
        }
        result
    }

    /// Run every gradient dialect in order.
    ///
    /// With `ignore_placeholders`, gradients whose match contains `%` are
    /// left untouched.
    #[must_use]
    pub fn expand_gradients(&self, text: &str, ignore_placeholders: bool) -> String {
        let mut result = text.to_string();
        for gradient in &self.gradients {
            result = (gradient.apply)(&result, ignore_placeholders);
        }
        result
    }

    /// Normalize, then expand gradients.
    #[must_use]
    pub fn apply_formats(&self, text: &str, ignore_placeholders: bool) -> String {
        let normalized = self.normalize(text);
        let expanded = self.expand_gradients(&normalized, ignore_placeholders);
        log::trace!("apply_formats: {text:?} -> {expanded:?}");
        expanded
    }

    /// Replace every color in `text` with its legacy code.
    ///
    /// `#RRGGBB|c` uses the forced code `c`; a bare `#RRGGBB` uses the
    /// nearest palette color. A `#` not followed by six hex digits is kept.
    #[must_use]
    pub fn convert_rgb_to_legacy(&self, text: &str) -> String {
        let applied = self.apply_formats(&colorize(text), false);
        if !applied.contains('#') {
            return applied;
        }

        HEX_PATTERN
            .replace_all(&applied, |caps: &Captures<'_>| {
                hex_at(&caps[0]).map_or_else(|| caps[0].to_string(), |c| c.legacy().to_string())
            })
            .into_owned()
    }

    /// Rewrite colors in the `§x§R§R§G§G§B§B` form.
    ///
    /// Without RGB support the text is parsed and rendered as plain legacy
    /// codes instead.
    #[must_use]
    pub fn to_legacy_hex(&self, text: &str) -> String {
        if !self.rgb_supported {
            return self.parse(text).to_legacy_text();
        }

        let applied = self.apply_formats(&colorize(text), false);
        HEX_PATTERN
            .replace_all(&applied, |caps: &Captures<'_>| {
                let mut result = String::with_capacity(14 * 2);
                result.push(LEGACY_MARKER);
                result.push('x');
                for digit in caps[1].chars() {
                    result.push(LEGACY_MARKER);
                    result.push(digit.to_ascii_lowercase());
                }
                result
            })
            .into_owned()
    }

    /// Color every character of `text` along the hue wheel.
    ///
    /// Style codes (`l o n m k`, either prefix) anywhere in the text are
    /// removed and repeated after every color. Hue advances by `1 / len` per
    /// character; `saturation` is used for both saturation and brightness.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "character counts are far below f32 precision limits"
    )]
    pub fn rainbow(&self, text: &str, saturation: f32) -> String {
        let mut found: SmallVec<[LegacyCode; 5]> = SmallVec::new();
        let mut chars: Vec<char> = Vec::with_capacity(text.len());

        let mut iter = text.chars().peekable();
        while let Some(c) = iter.next() {
            if (c == '&' || c == LEGACY_MARKER)
                && let Some(&next) = iter.peek()
                && let Some(code) = LegacyCode::from_char(next.to_ascii_lowercase())
                && code.is_style()
            {
                if !found.contains(&code) {
                    found.push(code);
                }
                iter.next();
            } else {
                chars.push(c);
            }
        }

        let styles: String = LegacyCode::STYLES
            .iter()
            .filter(|code| found.contains(code))
            .map(ToString::to_string)
            .collect();

        let len = chars.len();
        let mut result = String::with_capacity(len * (8 + styles.len() + 1));
        for (index, ch) in chars.into_iter().enumerate() {
            let hue = index as f32 / len as f32;
            let color = Color::from_hsb(hue, saturation, saturation);
            result.push_str(&self.format_color(color));
            result.push_str(&styles);
            result.push(ch);
        }
        result
    }

    /// `#RRGGBB` with RGB support, otherwise the nearest legacy code.
    #[must_use]
    pub fn format_color(&self, color: Color) -> String {
        if self.rgb_supported {
            color.hex()
        } else {
            color.legacy().to_string()
        }
    }

    /// The legacy color active at the end of `text` once RGB colors are
    /// downgraded. White when no color is set or the last one is a reset.
    ///
    /// Only colors are reported: trailing styles such as `§l` are skipped
    /// and never returned, even when no color precedes them.
    #[must_use]
    pub fn last_color(&self, text: &str) -> LegacyCode {
        let legacy = self.convert_rgb_to_legacy(text);
        trailing_active_codes(&legacy)
            .chars()
            .filter_map(|c| LegacyCode::from_char(c.to_ascii_lowercase()))
            .find(|code| code.is_color())
            .unwrap_or(LegacyCode::White)
    }

    /// Parse markup into a run tree.
    ///
    /// The text is colorized and run through [`apply_formats`](Self::apply_formats)
    /// first. The result is a root run with empty text whose children are the
    /// parsed runs.
    #[must_use]
    pub fn parse(&self, text: &str) -> StyledRun {
        crate::component::parse::parse(self, text)
    }
}

/// Parse `#RRGGBB` with an optional `|c` forced code.
fn hex_at(token: &str) -> Option<Color> {
    let (hex, forced) = match token.split_once('|') {
        Some((hex, code)) => (hex, code.chars().next()),
        None => (token, None),
    };
    let triplet = ColorTriplet::from_hex(hex)?;
    match forced.and_then(|c| LegacyCode::from_char(c.to_ascii_lowercase())) {
        Some(code) => Color::from_hex_forced(&triplet.hex(), code).ok(),
        None => Some(Color::from_triplet(triplet)),
    }
}
