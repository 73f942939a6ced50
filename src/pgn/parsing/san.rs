//! Move token heuristics
//!
//! This is a shape check only: it accepts anything that reads like a SAN move (piece letter,
//! optional disambiguation, capture, destination, promotion, check marker) or a castling
//! literal. Whether the move is legal is the rules engine's business.

use once_cell::sync::Lazy;
use regex::Regex;

static MOVE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[KQRBN][a-h]?[1-8]?x?[a-h][1-8]|[a-h](?:x[a-h][1-8]|[1-8])(?:=?[QRBN])?|O-O(?:-O)?|0-0(?:-0)?)[+#]?$",
    )
    .expect("move pattern is a valid regex")
});

/// Whether a token (suffix glyphs already removed) looks like a move.
pub fn looks_like_move(token: &str) -> bool {
    MOVE_PATTERN.is_match(token)
}

/// Split trailing move-quality glyphs off a move token: `"Nf3!?"` -> `("Nf3", Some("!?"))`.
pub fn split_suffix(token: &str) -> (&str, Option<&str>) {
    let san = token.trim_end_matches(|c: char| c == '!' || c == '?');
    if san.len() == token.len() {
        (token, None)
    } else {
        (san, Some(&token[san.len()..]))
    }
}
