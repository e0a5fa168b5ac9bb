//! Gradient dialects.
//!
//! A gradient tag names a start and an end color around a piece of text and
//! expands into one `#RRGGBB` per character, interpolated linearly.
//!
//! | Dialect | Syntax |
//! |---------|--------|
//! | `cmi` | `{#FF0000>}text{#0000FF<}` |
//! | `html` | `<#FF0000>text</#0000FF>` |
//! | `iridescent` | `<$#FF0000>text<$#0000FF>` |
//! | `kyori` | `<gradient:#FF0000:#0000FF>text</gradient>` |
//!
//! The start color may carry a forced legacy fallback, `#FF0000|c`, which is
//! then repeated after every generated color.
//!
//! ```
//! use rgb_text::color::Color;
//! use rgb_text::markup::gradient::as_gradient;
//!
//! let start = Color::from_hex("#FF0000").unwrap();
//! let end = Color::from_hex("#0000FF").unwrap();
//! assert_eq!(as_gradient(start, "abc", end), "#FF0000a#7F007Fb#0000FFc");
//! ```

use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

use crate::color::{Color, ColorTriplet};
use crate::legacy::{strip_codes, trailing_active_codes};
use crate::palette::LegacyCode;

/// Signature of a gradient expander: `(text, ignore_placeholders)`.
pub type GradientFn = fn(&str, bool) -> String;

/// A named gradient dialect.
#[derive(Clone, Copy)]
pub struct GradientDialect {
    /// Name used to remove the dialect from a pipeline.
    pub name: &'static str,
    /// The expansion.
    pub apply: GradientFn,
}

impl GradientDialect {
    /// Create a gradient dialect.
    #[must_use]
    pub const fn new(name: &'static str, apply: GradientFn) -> Self {
        Self { name, apply }
    }
}

impl fmt::Debug for GradientDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GradientDialect").field(&self.name).finish()
    }
}

/// `{#S>}text{#E<}`
pub const CMI: GradientDialect = GradientDialect::new("cmi", cmi);
/// `<#S>text</#E>`
pub const HTML: GradientDialect = GradientDialect::new("html", html);
/// `<$#S>text<$#E>`
pub const IRIDESCENT: GradientDialect = GradientDialect::new("iridescent", iridescent);
/// `<gradient:#S:#E>text</gradient>`
pub const KYORI: GradientDialect = GradientDialect::new("kyori", kyori);

/// The default gradient dialects in the order they run.
#[must_use]
pub fn default_gradients() -> Vec<GradientDialect> {
    vec![CMI, HTML, IRIDESCENT, KYORI]
}

static CMI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\{#(?P<start>[0-9a-fA-F]{6})(?:\|(?P<forced>[0-9a-fA-F]))?>\}(?P<text>[^{]*)\{#(?P<end>[0-9a-fA-F]{6})<\}",
    )
    .expect("invalid regex")
});

static HTML_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"<#(?P<start>[0-9a-fA-F]{6})(?:\|(?P<forced>[0-9a-fA-F]))?>(?P<text>[^<]*)</#(?P<end>[0-9a-fA-F]{6})>",
    )
    .expect("invalid regex")
});

static IRIDESCENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"<\$#(?P<start>[0-9a-fA-F]{6})(?:\|(?P<forced>[0-9a-fA-F]))?>(?P<text>[^<]*)<\$#(?P<end>[0-9a-fA-F]{6})>",
    )
    .expect("invalid regex")
});

static KYORI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"<gradient:#(?P<start>[0-9a-fA-F]{6})(?:\|(?P<forced>[0-9a-fA-F]))?:#(?P<end>[0-9a-fA-F]{6})>(?P<text>[^<]*)</gradient>",
    )
    .expect("invalid regex")
});

fn cmi(text: &str, ignore_placeholders: bool) -> String {
    if !text.contains("{#") {
        return text.to_string();
    }
    expand(&CMI_PATTERN, "cmi", text, ignore_placeholders)
}

fn html(text: &str, ignore_placeholders: bool) -> String {
    if !text.contains("<#") {
        return text.to_string();
    }
    expand(&HTML_PATTERN, "html", text, ignore_placeholders)
}

fn iridescent(text: &str, ignore_placeholders: bool) -> String {
    if !text.contains("<$") {
        return text.to_string();
    }
    expand(&IRIDESCENT_PATTERN, "iridescent", text, ignore_placeholders)
}

fn kyori(text: &str, ignore_placeholders: bool) -> String {
    if !text.contains("<grad") {
        return text.to_string();
    }
    expand(&KYORI_PATTERN, "kyori", text, ignore_placeholders)
}

/// Replace every match of a dialect pattern with its expansion.
///
/// Patterns must define the `start`, `end` and `text` groups and may define
/// `forced`.
fn expand(pattern: &Regex, dialect: &str, text: &str, ignore_placeholders: bool) -> String {
    pattern
        .replace_all(text, |caps: &Captures<'_>| {
            let whole = &caps[0];
            if ignore_placeholders && whole.contains('%') {
                log::debug!("skipping {dialect} gradient containing a placeholder: {whole}");
                return whole.to_string();
            }

            let forced = caps
                .name("forced")
                .and_then(|m| m.as_str().chars().next())
                .and_then(|c| LegacyCode::from_char(c.to_ascii_lowercase()));
            let start = gradient_color(&caps["start"], forced);
            let end = gradient_color(&caps["end"], None);

            match (start, end) {
                (Some(start), Some(end)) => as_gradient(start, &caps["text"], end),
                _ => whole.to_string(),
            }
        })
        .into_owned()
}

fn gradient_color(digits: &str, forced: Option<LegacyCode>) -> Option<Color> {
    let triplet = ColorTriplet::from_hex(&format!("#{digits}"))?;
    let color = Color::from_triplet(triplet);
    match forced {
        Some(code) => Color::from_hex_forced(&color.hex(), code).ok(),
        None => Some(color),
    }
}

/// Expand `text` into one color per character, from `start` to `end`.
///
/// Legacy codes are removed from the text; the codes still active at its end
/// (see [`trailing_active_codes`]) are repeated after every color. A single
/// character takes the start color; empty text expands to nothing.
#[must_use]
pub fn as_gradient(start: Color, text: &str, end: Color) -> String {
    let codes = trailing_active_codes(text);
    let chars: Vec<char> = strip_codes(text).chars().collect();
    let len = chars.len();

    let mut result = String::with_capacity(len * (10 + codes.len()));
    for (index, ch) in chars.into_iter().enumerate() {
        let triplet = if len == 1 {
            start.triplet()
        } else {
            interpolate(start.triplet(), end.triplet(), index, len)
        };
        result.push_str(&triplet.hex());
        if start.is_forced() {
            result.push('|');
            result.push(start.legacy().character());
        }
        result.push_str(&codes);
        result.push(ch);
    }
    result
}

/// Per channel `start + (end - start) / (len - 1) * index`, truncated.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "interpolated channels stay within the two endpoint values"
)]
fn interpolate(start: ColorTriplet, end: ColorTriplet, index: usize, len: usize) -> ColorTriplet {
    let steps = (len - 1) as f32;
    let position = index as f32;
    let channel = |from: u8, to: u8| {
        let from_f = f32::from(from);
        (from_f + (f32::from(to) - from_f) / steps * position) as u8
    };
    ColorTriplet::new(
        channel(start.red, end.red),
        channel(start.green, end.green),
        channel(start.blue, end.blue),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Color {
        Color::from_hex(s).unwrap()
    }

    #[test]
    fn test_as_gradient_three_chars() {
        assert_eq!(
            as_gradient(hex("#FF0000"), "abc", hex("#0000FF")),
            "#FF0000a#7F007Fb#0000FFc"
        );
    }

    #[test]
    fn test_as_gradient_single_char_is_start() {
        assert_eq!(as_gradient(hex("#123456"), "A", hex("#FFFFFF")), "#123456A");
    }

    #[test]
    fn test_as_gradient_empty() {
        assert_eq!(as_gradient(hex("#123456"), "", hex("#FFFFFF")), "");
        assert_eq!(as_gradient(hex("#123456"), "§l", hex("#FFFFFF")), "");
    }

    #[test]
    fn test_as_gradient_carries_trailing_codes() {
        assert_eq!(
            as_gradient(hex("#000000"), "§lab", hex("#0000FF")),
            "#000000§la#0000FF§lb"
        );
    }

    #[test]
    fn test_as_gradient_forced_start() {
        let start = Color::from_hex_forced("#FF0000", LegacyCode::Red).unwrap();
        assert_eq!(
            as_gradient(start, "ab", hex("#0000FF")),
            "#FF0000|ca#0000FF|cb"
        );
    }

    #[test]
    fn test_cmi() {
        assert_eq!(cmi("{#FF0000>}ab{#0000FF<}!", false), "#FF0000a#0000FFb!");
    }

    #[test]
    fn test_html() {
        assert_eq!(html("<#FF0000>ab</#0000FF>", false), "#FF0000a#0000FFb");
    }

    #[test]
    fn test_html_forced_start() {
        assert_eq!(
            html("<#FF0000|4>ab</#0000FF>", false),
            "#FF0000|4a#0000FF|4b"
        );
    }

    #[test]
    fn test_iridescent() {
        assert_eq!(
            iridescent("x<$#FF0000>ab<$#0000FF>y", false),
            "x#FF0000a#0000FFby"
        );
    }

    #[test]
    fn test_kyori() {
        assert_eq!(
            kyori("<gradient:#FF0000:#0000FF>ab</gradient>", false),
            "#FF0000a#0000FFb"
        );
    }

    #[test]
    fn test_placeholders_skipped_only_when_asked() {
        let input = "<#FF0000>%player%</#0000FF>";
        assert_eq!(html(input, true), input);
        assert_ne!(html(input, false), input);
    }

    #[test]
    fn test_unmatched_tags_untouched() {
        assert_eq!(html("<#FF0000>never closed", false), "<#FF0000>never closed");
        assert_eq!(kyori("<gradient:#FF0000>ab</gradient>", false), "<gradient:#FF0000>ab</gradient>");
    }

    #[test]
    fn test_default_order() {
        let names: Vec<_> = default_gradients().iter().map(|g| g.name).collect();
        assert_eq!(names, ["cmi", "html", "iridescent", "kyori"]);
    }
}
