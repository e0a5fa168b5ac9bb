//! Markup to [`StyledRun`] parsing.
//!
//! One left-to-right pass over the canonical text (legacy codes already in
//! `§` form, every dialect already rewritten to `#RRGGBB`). A new run starts
//! whenever formatting changes after some text has been collected:
//!
//! - a color code or `#RRGGBB` starts a fresh run with only that color;
//! - a reset starts a fresh white run;
//! - a style code adds to the current run, carrying the color over.

use std::mem;

use crate::color::{Color, ColorTriplet};
use crate::legacy::colorize;
use crate::palette::{LEGACY_MARKER, LegacyCode};
use crate::pipeline::Pipeline;
use crate::style::Attributes;

use super::StyledRun;

pub(crate) fn parse(pipeline: &Pipeline, markup: &str) -> StyledRun {
    let text = pipeline.apply_formats(&colorize(markup), false);
    let chars: Vec<char> = text.chars().collect();

    let mut runs = Vec::new();
    let mut buffer = String::new();
    let mut current = StyledRun::new();

    let mut index = 0;
    while index < chars.len() {
        let c = chars[index];

        if c == LEGACY_MARKER {
            let Some(&code_char) = chars.get(index + 1) else {
                break;
            };
            index += 2;

            // Unknown codes vanish along with their marker.
            let Some(code) = LegacyCode::from_char(code_char.to_ascii_lowercase()) else {
                continue;
            };

            if !buffer.is_empty() {
                let next = current.copy_formatting();
                current.text = Some(mem::take(&mut buffer));
                runs.push(mem::replace(&mut current, next));
            }

            if let Some(attr) = Attributes::from_code(code) {
                current.style.set(attr, Some(true));
            } else if code.is_reset() {
                current = StyledRun::new().color(Color::from_palette(LegacyCode::White));
            } else {
                current = StyledRun::new().color(Color::from_palette(code));
            }
            continue;
        }

        if c == '#'
            && let Some((color, consumed)) = hex_color_at(&chars, index)
        {
            if !buffer.is_empty() {
                current.text = Some(mem::take(&mut buffer));
                runs.push(current);
            }
            current = StyledRun::new().color(color);
            index += consumed;
            continue;
        }

        buffer.push(c);
        index += 1;
    }

    current.text = Some(buffer);
    runs.push(current);

    StyledRun {
        text: Some(String::new()),
        extra: runs,
        ..StyledRun::default()
    }
}

/// Decode `#RRGGBB` or `#RRGGBB|c` starting at `start`.
///
/// Returns the color and the number of chars it spans. The `|c` suffix only
/// counts when `c` is one of the 16 color codes.
fn hex_color_at(chars: &[char], start: usize) -> Option<(Color, usize)> {
    let digits = chars.get(start + 1..start + 7)?;
    if !digits.iter().all(char::is_ascii_hexdigit) {
        return None;
    }
    let hex: String = std::iter::once('#').chain(digits.iter().copied()).collect();
    let triplet = ColorTriplet::from_hex(&hex)?;

    let forced = match chars.get(start + 7..start + 9) {
        Some(['|', code]) => {
            LegacyCode::from_char(code.to_ascii_lowercase()).filter(|code| code.is_color())
        }
        _ => None,
    };

    match forced {
        Some(code) => Color::from_hex_forced(&hex, code).ok().map(|color| (color, 9)),
        None => Some((Color::from_triplet(triplet), 7)),
    }
}
