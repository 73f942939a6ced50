//! Numeric annotation glyph table

/// The NAG codes with a dedicated symbol. Everything else renders as `$<code>`.
const NAG_GLYPHS: &[(u32, &str)] = &[
    (1, "!"),
    (2, "?"),
    (3, "!!"),
    (4, "??"),
    (5, "!?"),
    (6, "?!"),
    (7, "\u{25a1}"),
    (10, "="),
    (13, "\u{221e}"),
    (14, "\u{2a72}"),
    (15, "\u{2a71}"),
    (16, "\u{b1}"),
    (17, "\u{2213}"),
    (18, "+\u{2212}"),
    (19, "\u{2212}+"),
    (22, "\u{2a00}"),
    (32, "\u{27ea}"),
    (33, "\u{27eb}"),
];

/// Highest code whose glyph may be written directly after a move (`e4!?`)
const LAST_MOVE_SUFFIX_CODE: u32 = 6;

pub fn glyph_for_code(code: u32) -> Option<&'static str> {
    NAG_GLYPHS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, glyph)| *glyph)
}

/// The glyph stored for `$code`: the table symbol, or the literal `$<code>`.
pub fn nag_glyph(code: u32) -> String {
    match glyph_for_code(code) {
        Some(glyph) => glyph.to_string(),
        None => format!("${}", code),
    }
}

/// Reverse lookup. Accepts table symbols and literal `$<n>` glyphs.
pub fn code_for_glyph(glyph: &str) -> Option<u32> {
    if let Some(digits) = glyph.strip_prefix('$') {
        return digits.parse().ok();
    }
    NAG_GLYPHS
        .iter()
        .find(|(_, g)| *g == glyph)
        .map(|(code, _)| *code)
}

/// Move-quality glyphs (`!`, `?`, `!!`, `??`, `!?`, `?!`)
pub fn is_move_suffix(glyph: &str) -> bool {
    matches!(code_for_glyph(glyph), Some(code) if (1..=LAST_MOVE_SUFFIX_CODE).contains(&code))
        && !glyph.starts_with('$')
}
