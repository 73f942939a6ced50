//! Token definitions for PGN movetext
//!
//! The tokens are defined using the logos derive macro. Comment bodies are scanned by hand in
//! [brace_comment] because brace nesting is not regular.
use super::nag::nag_glyph;
use logos::{Lexer, Logos};

/// A move number marker: `N.` for white, `N...` for black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveNumberMarker {
    pub number: u32,
    pub black: bool,
}

/// A `$code` annotation, already resolved to its display glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nag {
    pub glyph: String,
    pub code: u32,
}

/// All possible tokens in PGN movetext
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[regex(r"[0-9]+\.+", move_number)]
    MoveNumber(MoveNumberMarker),

    #[token("{", brace_comment)]
    #[regex(r";[^\n]*", line_comment)]
    Comment(String),

    #[regex(r"\$[0-9]+", nag)]
    Nag(Nag),

    // Termination markers win over the move catch-all on equal length
    #[token("1-0", |lex| lex.slice().to_string())]
    #[token("0-1", |lex| lex.slice().to_string())]
    #[token("1/2-1/2", |lex| lex.slice().to_string())]
    #[token("*", |lex| lex.slice().to_string(), priority = 3)]
    Termination(String),

    #[token("(")]
    VariationStart,
    #[token(")")]
    VariationEnd,

    // Anything else that is not a separator; the parser filters non-moves.
    // Only ASCII whitespace separates, so rejected input is always ASCII.
    #[regex(r"[^ \t\r\n\f{}();$.]+", |lex| lex.slice().to_string())]
    Move(String),
}

impl Token {
    pub fn is_comment(&self) -> bool {
        matches!(self, Token::Comment(_))
    }

    /// Short human readable description, used in diagnostics
    pub fn describe(&self) -> String {
        match self {
            Token::MoveNumber(marker) if marker.black => format!("{}...", marker.number),
            Token::MoveNumber(marker) => format!("{}.", marker.number),
            Token::Comment(text) => format!("{{{}}}", text),
            Token::Nag(nag) => format!("${}", nag.code),
            Token::Termination(value) => value.clone(),
            Token::VariationStart => "(".to_string(),
            Token::VariationEnd => ")".to_string(),
            Token::Move(raw) => raw.clone(),
        }
    }
}

fn move_number(lex: &mut Lexer<Token>) -> Option<MoveNumberMarker> {
    let slice = lex.slice();
    let digits = slice.trim_end_matches('.');
    let dots = slice.len() - digits.len();
    let number = digits.parse().ok()?;
    Some(MoveNumberMarker {
        number,
        black: dots >= 3,
    })
}

fn nag(lex: &mut Lexer<Token>) -> Option<Nag> {
    let code: u32 = lex.slice()[1..].parse().ok()?;
    Some(Nag {
        glyph: nag_glyph(code),
        code,
    })
}

/// Consume a brace comment body up to the matching close brace.
///
/// Inner `{`/`}` pairs are kept in the text. An unterminated comment runs to the end of input.
fn brace_comment(lex: &mut Lexer<Token>) -> String {
    let remainder = lex.remainder();
    let mut depth = 1usize;
    let mut body_end = remainder.len();
    let mut consumed = remainder.len();

    for (idx, ch) in remainder.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    body_end = idx;
                    consumed = idx + 1;
                    break;
                }
            }
            _ => {}
        }
    }

    lex.bump(consumed);
    remainder[..body_end].trim().to_string()
}

fn line_comment(lex: &mut Lexer<Token>) -> String {
    lex.slice()[1..].trim().to_string()
}
