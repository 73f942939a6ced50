//! Parse errors and warnings
//!
//! Parsing never aborts. Problems are collected as values and returned next to the best-effort
//! game, so callers decide what is fatal for them.

use crate::pgn::ast::MovePosition;
use thiserror::Error;

/// Structural problems. The game is still produced, but parts of it may be missing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing movetext")]
    MissingMovetext,

    #[error("unmatched parenthesis opened at byte {offset}")]
    UnmatchedParenthesis { offset: usize },

    #[error("variation opened at byte {offset} nests deeper than {max} levels and was skipped")]
    VariationTooDeep { offset: usize, max: usize },
}

/// Recoverable oddities; the offending input is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    #[error("unknown token '{text}' at byte {offset}")]
    UnknownToken { text: String, offset: usize },

    #[error("empty variation at byte {offset} dropped")]
    EmptyVariation { offset: usize },

    #[error("duplicate half-move {position} {san} dropped")]
    DuplicateHalfMove { position: MovePosition, san: String },

    #[error("annotation '{glyph}' appears before any move")]
    AnnotationBeforeMove { glyph: String },

    #[error("unexpected ')' at byte {offset}")]
    UnexpectedVariationEnd { offset: usize },

    #[error("malformed header line: {line}")]
    MalformedHeader { line: String },

    #[error("{count} token(s) after the game result ignored")]
    TrailingInput { count: usize },
}
