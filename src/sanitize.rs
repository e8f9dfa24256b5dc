//! Text sanitization for the deck's Helvetica-only output encoding.
//!
//! The output document carries no embedded fonts, so every drawn string must
//! fit the base-14 WinAnsi repertoire. Typographic punctuation is mapped to
//! ASCII equivalents, iconography to word equivalents, and emoji are removed
//! outright. Sanitization must happen before measurement: a glyph the width
//! tables cannot account for corrupts the wrap geometry, and text overruns
//! its box.

use unicode_normalization::UnicodeNormalization;

/// Unicode block ranges deleted entirely (emoji, pictographs, flags,
/// dingbats, variation selectors).
const STRIPPED_RANGES: &[(u32, u32)] = &[
    (0x1F000, 0x1FAFF), // mahjong..symbols-and-pictographs-extended, incl. flags
    (0x2600, 0x26FF),   // miscellaneous symbols
    (0x2700, 0x27BF),   // dingbats
    (0x2B00, 0x2BFF),   // miscellaneous symbols and arrows
    (0xFE00, 0xFE0F),   // variation selectors
    (0x200D, 0x200D),   // zero-width joiner
];

/// Sanitize a content string for drawing and measurement.
///
/// Deterministic, pure, and total: unrecognized characters outside the
/// stripped ranges pass through unchanged, and re-sanitizing a sanitized
/// string is a no-op.
pub fn sanitize(text: &str) -> String {
    let normalized: String = text.nfc().collect();

    let mut out = String::with_capacity(normalized.len());
    for c in normalized.chars() {
        if let Some(replacement) = map_char(c) {
            out.push_str(replacement);
        } else if is_stripped(c) {
            // Deleted entirely; surrounding whitespace collapses below.
        } else {
            out.push(c);
        }
    }

    collapse_whitespace(&out)
}

/// ASCII/word replacement for a single character, if one is defined.
fn map_char(c: char) -> Option<&'static str> {
    let mapped = match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => "'",
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => "\"",
        '\u{2013}' | '\u{2014}' | '\u{2015}' => "-",
        '\u{2026}' => "...",
        '\u{00D7}' => "x",
        '\u{2248}' => "~",
        '\u{00A3}' => "GBP ",
        '\u{00A0}' | '\u{2009}' | '\u{202F}' => " ",
        // Check marks, mapped before the dingbat range strip would eat them
        '\u{2713}' | '\u{2714}' | '\u{2705}' => "-",
        // Arrows
        '\u{2192}' | '\u{21D2}' | '\u{2794}' | '\u{27A1}' => "->",
        // Bullet glyphs
        '\u{2022}' | '\u{2219}' | '\u{25CF}' | '\u{25AA}' | '\u{25E6}' => "-",
        _ => return None,
    };
    Some(mapped)
}

fn is_stripped(c: char) -> bool {
    let code = c as u32;
    STRIPPED_RANGES
        .iter()
        .any(|&(lo, hi)| (lo..=hi).contains(&code))
}

/// Collapse whitespace runs to single spaces and trim the ends.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            in_run = true;
        } else {
            if in_run && !out.is_empty() {
                out.push(' ');
            }
            in_run = false;
            out.push(c);
        }
    }
    out
}
