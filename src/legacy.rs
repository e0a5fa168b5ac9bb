//! Scanning of legacy `&`/`§` format codes in raw strings.
//!
//! These functions work on plain `&str` and know nothing about hex colors or
//! components; they are the first and last stage of every pipeline.

use smallvec::SmallVec;

use crate::palette::{LEGACY_MARKER, LegacyCode};

/// Codes `&` may stand for: the palette codes plus `x`, the hex prefix.
fn is_colorizable(c: char) -> bool {
    c.eq_ignore_ascii_case(&'x') || is_format_code(c)
}

/// Any palette code, colors and styles and reset, in either case.
fn is_format_code(c: char) -> bool {
    LegacyCode::from_char(c.to_ascii_lowercase()).is_some()
}

/// Colors and reset, the codes that clear everything before them.
fn is_terminal_code(c: char) -> bool {
    LegacyCode::from_char(c.to_ascii_lowercase()).is_some_and(|code| !code.is_style())
}

fn is_prefix(c: char) -> bool {
    c == '&' || c == LEGACY_MARKER
}

/// Replace `&` + code with the marker and the lowercase code.
///
/// Codes are `0-9`, `a-f`, `k-o`, `r` and `x` in either case; any other `&`
/// is left as is.
///
/// ```
/// use rgb_text::legacy::colorize;
///
/// assert_eq!(colorize("&cHello &lWorld"), "§cHello §lWorld");
/// assert_eq!(colorize("Tom & Jerry"), "Tom & Jerry");
/// ```
#[must_use]
pub fn colorize(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '&'
            && let Some(&next) = chars.peek()
            && is_colorizable(next)
        {
            result.push(LEGACY_MARKER);
            result.push(next.to_ascii_lowercase());
            chars.next();
        } else {
            result.push(c);
        }
    }
    result
}

/// The format codes still in effect at the end of `text`.
///
/// Scans backwards collecting `&`/`§` code pairs as `§` + code, and stops at
/// the first color or reset since it clears everything before it. Style codes
/// after the color are kept in their original order. Code case is preserved.
///
/// ```
/// use rgb_text::legacy::trailing_active_codes;
///
/// assert_eq!(trailing_active_codes("hello &cworld"), "§c");
/// assert_eq!(trailing_active_codes("&a&lbold &ostill"), "§a§l§o");
/// assert_eq!(trailing_active_codes("plain"), "");
/// ```
#[must_use]
pub fn trailing_active_codes(text: &str) -> String {
    let chars: SmallVec<[char; 64]> = text.chars().collect();
    let mut codes: SmallVec<[char; 8]> = SmallVec::new();

    for index in (0..chars.len().saturating_sub(1)).rev() {
        if !is_prefix(chars[index]) {
            continue;
        }
        let code = chars[index + 1];
        if !is_format_code(code) {
            continue;
        }
        codes.push(code);
        if is_terminal_code(code) {
            break;
        }
    }

    let mut result = String::with_capacity(codes.len() * 3);
    for code in codes.iter().rev() {
        result.push(LEGACY_MARKER);
        result.push(*code);
    }
    result
}

/// Remove every `&`/`§` + format-code pair.
///
/// ```
/// use rgb_text::legacy::strip_codes;
///
/// assert_eq!(strip_codes("§cred &lbold"), "red bold");
/// assert_eq!(strip_codes("rock & roll"), "rock & roll");
/// ```
#[must_use]
pub fn strip_codes(text: &str) -> String {
    if !text.contains(['&', LEGACY_MARKER]) {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if is_prefix(c)
            && let Some(&next) = chars.peek()
            && is_format_code(next)
        {
            chars.next();
        } else {
            result.push(c);
        }
    }
    result
}
