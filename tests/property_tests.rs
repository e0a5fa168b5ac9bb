//! Property-based tests for rgb_text.
//!
//! Checks invariants that must hold for any input rather than for a handful
//! of hand-picked examples.
//!
//! Run with: cargo test --test property_tests

use proptest::prelude::*;
use rgb_text::color::{Color, ColorTriplet, RenderMode};
use rgb_text::component::StyledRun;
use rgb_text::legacy::{colorize, strip_codes, trailing_active_codes};
use rgb_text::markup::gradient::as_gradient;
use rgb_text::palette::{self, LegacyCode};
use rgb_text::pipeline::Pipeline;
use rgb_text::style::Attributes;

// ============================================================================
// Strategies
// ============================================================================

fn rgb_triplet() -> impl Strategy<Value = (u8, u8, u8)> {
    (any::<u8>(), any::<u8>(), any::<u8>())
}

fn palette_color() -> impl Strategy<Value = LegacyCode> {
    prop::sample::select(LegacyCode::COLORS.to_vec())
}

fn any_code() -> impl Strategy<Value = LegacyCode> {
    prop::sample::select(
        LegacyCode::COLORS
            .iter()
            .chain(LegacyCode::STYLES.iter())
            .copied()
            .chain(std::iter::once(LegacyCode::Reset))
            .collect::<Vec<_>>(),
    )
}

/// Text that cannot be mistaken for markup.
fn plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?]{0,16}"
}

/// `&`-code followed by plain text, repeated.
fn legacy_markup() -> impl Strategy<Value = Vec<(LegacyCode, String)>> {
    prop::collection::vec((any_code(), plain_text()), 0..8)
}

fn tri_state() -> impl Strategy<Value = Option<bool>> {
    prop_oneof![Just(None), Just(Some(true)), Just(Some(false))]
}

fn styled_run() -> impl Strategy<Value = StyledRun> {
    (
        prop::option::of(plain_text()),
        prop::option::of(rgb_triplet()),
        prop::collection::vec(tri_state(), 5),
    )
        .prop_map(|(text, color, flags)| {
            let mut run = StyledRun::new();
            run.text = text;
            run.style.color = color.map(|(r, g, b)| Color::from_rgb(r, g, b));
            let attrs = [
                Attributes::BOLD,
                Attributes::ITALIC,
                Attributes::UNDERLINE,
                Attributes::STRIKETHROUGH,
                Attributes::OBFUSCATED,
            ];
            for (attr, value) in attrs.into_iter().zip(flags) {
                run.style.set(attr, value);
            }
            run
        })
}

fn run_tree() -> impl Strategy<Value = StyledRun> {
    (styled_run(), prop::collection::vec(styled_run(), 0..4)).prop_map(|(root, children)| {
        children.into_iter().fold(root, StyledRun::append)
    })
}

// ============================================================================
// Palette and Color Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Every palette color is its own nearest color.
    #[test]
    fn prop_palette_colors_are_fixed_points(code in palette_color()) {
        let rgb = code.rgb().expect("colors have rgb");
        prop_assert_eq!(palette::nearest(rgb), code);
        prop_assert_eq!(palette::exact(rgb), Some(code));
    }

    /// The fallback of any RGB value is one of the 16 colors.
    #[test]
    fn prop_nearest_is_a_color((r, g, b) in rgb_triplet()) {
        let color = Color::from_rgb(r, g, b);
        prop_assert!(color.legacy().is_color());
        prop_assert!(!color.is_forced());
    }

    /// No other palette color is strictly closer than the chosen one.
    #[test]
    fn prop_nearest_is_minimal((r, g, b) in rgb_triplet()) {
        let triplet = ColorTriplet::new(r, g, b);
        let distance = |code: LegacyCode| {
            let p = code.rgb().expect("colors have rgb");
            r.abs_diff(p.red).max(g.abs_diff(p.green)).max(b.abs_diff(p.blue))
        };
        let chosen = distance(palette::nearest(triplet));
        for code in LegacyCode::COLORS {
            prop_assert!(chosen <= distance(code));
        }
    }

    /// Hex text round-trips through parsing, in either case.
    #[test]
    fn prop_hex_roundtrip((r, g, b) in rgb_triplet()) {
        let triplet = ColorTriplet::new(r, g, b);
        prop_assert_eq!(ColorTriplet::from_hex(&triplet.hex()), Some(triplet));
        prop_assert_eq!(
            ColorTriplet::from_hex(&triplet.hex().to_lowercase()),
            Some(triplet)
        );
        let parsed = Color::parse(&triplet.hex()).expect("valid hex should parse");
        prop_assert_eq!(parsed.triplet(), triplet);
    }

    /// Forcing a color fallback keeps the RGB value and pins the code.
    #[test]
    fn prop_forced_fallback((r, g, b) in rgb_triplet(), code in palette_color()) {
        let hex = ColorTriplet::new(r, g, b).hex();
        let color = Color::from_hex_forced(&hex, code).expect("valid hex");
        prop_assert_eq!(color.legacy(), code);
        prop_assert!(color.is_forced());
        prop_assert_eq!(color.hex(), hex);
    }

    /// Zero saturation is always a shade of gray.
    #[test]
    fn prop_hsb_without_saturation_is_gray(hue in 0.0f32..1.0, brightness in 0.0f32..=1.0) {
        let triplet = ColorTriplet::from_hsb(hue, 0.0, brightness);
        prop_assert_eq!(triplet.red, triplet.green);
        prop_assert_eq!(triplet.green, triplet.blue);
    }
}

// ============================================================================
// Legacy Code Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn prop_colorize_is_idempotent(text in "[a-z&§#0-9 ]{0,40}") {
        let once = colorize(&text);
        prop_assert_eq!(colorize(&once), once.clone());
    }

    /// Stripping codes from colorized markup leaves exactly the text parts.
    #[test]
    fn prop_strip_leaves_text(parts in legacy_markup()) {
        let markup: String = parts
            .iter()
            .map(|(code, text)| format!("&{}{text}", code.character()))
            .collect();
        let expected: String = parts.iter().map(|(_, text)| text.as_str()).collect();
        prop_assert_eq!(strip_codes(&colorize(&markup)), expected);
    }

    /// Trailing codes never contain more than one color or reset, and it
    /// always comes first.
    #[test]
    fn prop_trailing_codes_shape(parts in legacy_markup()) {
        let markup: String = parts
            .iter()
            .map(|(code, text)| format!("&{}{text}", code.character()))
            .collect();
        let codes: Vec<LegacyCode> = trailing_active_codes(&markup)
            .chars()
            .filter(|c| *c != '§')
            .filter_map(LegacyCode::from_char)
            .collect();
        let terminal = codes.iter().filter(|code| !code.is_style()).count();
        prop_assert!(terminal <= 1);
        if terminal == 1 {
            prop_assert!(!codes[0].is_style());
        }
    }
}

// ============================================================================
// Pipeline Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Canonical text is a fixed point of the whole pipeline.
    #[test]
    fn prop_apply_formats_is_idempotent(text in "[a-zA-Z0-9 #{}<>/$|:]{0,40}") {
        let pipeline = Pipeline::global();
        let once = pipeline.apply_formats(&text, false);
        prop_assert_eq!(pipeline.apply_formats(&once, false), once.clone());
    }

    /// A bare hex color always downgrades to its nearest palette code.
    #[test]
    fn prop_convert_uses_nearest((r, g, b) in rgb_triplet(), text in plain_text()) {
        let triplet = ColorTriplet::new(r, g, b);
        let converted = Pipeline::global().convert_rgb_to_legacy(&format!("{}{text}", triplet.hex()));
        prop_assert_eq!(converted, format!("{}{text}", palette::nearest(triplet)));
    }

    /// A gradient emits one color per character of the code-free text.
    #[test]
    fn prop_gradient_one_color_per_char(
        (r1, g1, b1) in rgb_triplet(),
        (r2, g2, b2) in rgb_triplet(),
        text in "[a-z]{0,24}",
    ) {
        let start = Color::from_rgb(r1, g1, b1);
        let end = Color::from_rgb(r2, g2, b2);
        let out = as_gradient(start, &text, end);
        prop_assert_eq!(out.len(), text.len() * 8);
        prop_assert_eq!(out.matches('#').count(), text.chars().count());
        if !text.is_empty() {
            prop_assert!(out.starts_with(&start.hex()));
        }
    }

    /// Rainbow output has one color per visible character.
    #[test]
    fn prop_rainbow_one_color_per_char(text in "[a-z]{1,24}", saturation in 0.0f32..=1.0) {
        let out = Pipeline::global().rainbow(&text, saturation);
        prop_assert_eq!(out.matches('#').count(), text.len());
        prop_assert_eq!(out.len(), text.len() * 8);
    }
}

// ============================================================================
// Component Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Parsing keeps every visible character, in order.
    #[test]
    fn prop_parse_preserves_text(parts in legacy_markup()) {
        let markup: String = parts
            .iter()
            .map(|(code, text)| format!("&{}{text}", code.character()))
            .collect();
        let expected: String = parts.iter().map(|(_, text)| text.as_str()).collect();
        prop_assert_eq!(StyledRun::from_markup(&markup).to_plain_text(), expected);
    }

    /// Parsed runs are flat: the root has children, the children have none.
    #[test]
    fn prop_parse_is_flat(parts in legacy_markup()) {
        let markup: String = parts
            .iter()
            .map(|(code, text)| format!("&{}{text}", code.character()))
            .collect();
        let root = StyledRun::from_markup(&markup);
        prop_assert_eq!(root.text.as_deref(), Some(""));
        prop_assert!(!root.extra.is_empty());
        prop_assert!(root.extra.iter().all(|run| run.extra.is_empty()));
    }

    /// Legacy rendering of a color-only run keeps the code and the text.
    #[test]
    fn prop_single_color_run_legacy(code in palette_color(), text in "[a-z]{1,12}") {
        let rendered = StyledRun::from_markup(&format!("&{}{text}", code.character())).to_legacy_text();
        let expected = if code == LegacyCode::White {
            format!("§r{text}")
        } else {
            format!("{code}{text}")
        };
        prop_assert_eq!(rendered, expected);
    }

    /// Legacy text rendered from a parse is itself stable under
    /// parse-and-render.
    #[test]
    fn prop_legacy_text_is_a_fixed_point(parts in legacy_markup()) {
        let markup: String = parts
            .iter()
            .map(|(code, text)| format!("&{}{text}", code.character()))
            .collect();
        let rendered = StyledRun::from_markup(&markup).to_legacy_text();
        prop_assert_eq!(StyledRun::from_markup(&rendered).to_legacy_text(), rendered);
    }

    /// With distinct adjacent colors nothing is elided, so the tree itself
    /// survives a trip through legacy text.
    #[test]
    fn prop_distinct_colors_roundtrip_through_legacy(
        parts in prop::collection::vec((palette_color(), "[a-z]{1,8}"), 1..8)
    ) {
        let mut markup = String::new();
        let mut previous = None;
        for (code, text) in &parts {
            if previous == Some(*code) {
                continue;
            }
            markup.push_str(&format!("&{}{text}", code.character()));
            previous = Some(*code);
        }
        let parsed = StyledRun::from_markup(&markup);
        prop_assert_eq!(StyledRun::from_markup(&parsed.to_legacy_text()), parsed);
    }

    /// JSON written in RGB mode reads back as the same tree.
    #[test]
    fn prop_json_roundtrip(run in run_tree()) {
        let json = run.to_json_string(RenderMode::Rgb);
        let decoded = StyledRun::from_json(&json).expect("own output decodes");
        prop_assert_eq!(decoded, run);
    }
}
