//! Markup dialects that rewrite third-party color syntax into `#RRGGBB`.
//!
//! Each dialect is a named plain function. A [`Pipeline`] runs its
//! [`Normalizer`]s in registration order and then its gradient dialects (see
//! [`gradient`]). Every dialect checks for a cheap trigger substring before
//! touching its regex, and running a dialect twice gives the same result as
//! running it once.
//!
//! | Dialect | Input | Output |
//! |---------|-------|--------|
//! | `legacy-hex` | `&x&F&F&0&0&0&0` | `#FF0000` |
//! | `bracket` | `{#FF0000}` | `#FF0000` |
//! | `ampersand-hex` | `&#FF0000` | `#FF0000` |
//! | `rainbow` | `<rainbow80>text</rainbow>` | one color per character |

pub mod gradient;

use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

use crate::pipeline::Pipeline;

/// Signature of a normalizer function.
///
/// The pipeline is passed so dialects can depend on its settings (rainbow
/// output depends on RGB support).
pub type NormalizeFn = fn(&Pipeline, &str) -> String;

/// A named text rewriter run before gradient expansion.
#[derive(Clone, Copy)]
pub struct Normalizer {
    /// Name used to remove the dialect from a pipeline.
    pub name: &'static str,
    /// The rewrite.
    pub apply: NormalizeFn,
}

impl Normalizer {
    /// Create a normalizer.
    #[must_use]
    pub const fn new(name: &'static str, apply: NormalizeFn) -> Self {
        Self { name, apply }
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Normalizer").field(&self.name).finish()
    }
}

/// `&x&R&R&G&G&B&B` (either marker) to `#RRGGBB`.
pub const LEGACY_HEX: Normalizer = Normalizer::new("legacy-hex", legacy_hex);
/// `{#RRGGBB}` to `#RRGGBB`.
pub const BRACKET: Normalizer = Normalizer::new("bracket", bracket);
/// `&#RRGGBB` to `#RRGGBB`.
pub const AMPERSAND_HEX: Normalizer = Normalizer::new("ampersand-hex", ampersand_hex);
/// `<rainbowNNN>text</rainbow>` to per-character colors.
pub const RAINBOW: Normalizer = Normalizer::new("rainbow", rainbow);

/// The default normalizers in the order they run.
#[must_use]
pub fn default_normalizers() -> Vec<Normalizer> {
    vec![LEGACY_HEX, BRACKET, AMPERSAND_HEX, RAINBOW]
}

static LEGACY_HEX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[§&]x[§&]([0-9a-fA-F])[§&]([0-9a-fA-F])[§&]([0-9a-fA-F])[§&]([0-9a-fA-F])[§&]([0-9a-fA-F])[§&]([0-9a-fA-F])",
    )
    .expect("invalid regex")
});

static BRACKET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{#([0-9a-fA-F]{6})\}").expect("invalid regex"));

static RAINBOW_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<rainbow([0-9]{1,3})>(.*?)</rainbow>").expect("invalid regex"));

fn legacy_hex(_pipeline: &Pipeline, text: &str) -> String {
    if !text.contains('&') && !text.contains("§x") {
        return text.to_string();
    }
    LEGACY_HEX_PATTERN
        .replace_all(text, "#${1}${2}${3}${4}${5}${6}")
        .into_owned()
}

fn bracket(_pipeline: &Pipeline, text: &str) -> String {
    if !text.contains("{#") {
        return text.to_string();
    }
    BRACKET_PATTERN.replace_all(text, "#${1}").into_owned()
}

fn ampersand_hex(_pipeline: &Pipeline, text: &str) -> String {
    if !text.contains("&#") {
        return text.to_string();
    }
    text.replace("&#", "#")
}

fn rainbow(pipeline: &Pipeline, text: &str) -> String {
    if !text.contains("<rainbow") {
        return text.to_string();
    }
    RAINBOW_PATTERN
        .replace_all(text, |caps: &Captures<'_>| {
            let percent: u16 = caps[1].parse().unwrap_or(100);
            pipeline.rainbow(&caps[2], saturation_from_percent(percent))
        })
        .into_owned()
}

/// `NNN` in `<rainbowNNN>` is a percentage, clamped to 100.
fn saturation_from_percent(percent: u16) -> f32 {
    f32::from(percent.min(100)) / 100.0
}
