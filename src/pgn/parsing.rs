//! Parser
//!
//!     Turns PGN text into a [Game]. The pipeline is:
//!         1. Split the tag pair section from the movetext. See [headers].
//!         2. Tokenize the movetext. See [crate::pgn::lexing].
//!         3. Run the recursive line parser over the tokens. See [parser].
//!
//!     Parsing never fails. The outcome carries the best-effort game together with the errors
//!     (structure that could not be recovered faithfully) and warnings (input that was skipped).
//!     No move is checked for legality; moves only have to look like SAN. See [san].

pub mod diagnostics;
pub mod headers;
pub mod san;

mod builder;
mod parser;

pub use diagnostics::{ParseError, ParseWarning};

use crate::pgn::ast::{Color, Game, MovePosition};
use crate::pgn::lexing::tokenize;
use parser::MovetextParser;

/// Everything a parse produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub game: Option<Game>,
    pub errors: Vec<ParseError>,
    pub warnings: Vec<ParseWarning>,
}

impl ParseOutcome {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// No errors and no warnings
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Parse a full game: tag pairs followed by movetext.
pub fn parse_game(text: &str) -> ParseOutcome {
    let section = headers::split_headers(text);
    let start = start_position(&section.headers);

    let mut outcome = parse_movetext_from(section.movetext, section.movetext_offset, start);
    let mut warnings = section.warnings;
    warnings.append(&mut outcome.warnings);
    outcome.warnings = warnings;

    match outcome.game.as_mut() {
        Some(game) => game.headers = section.headers,
        None if !section.headers.is_empty() => {
            outcome.game = Some(Game {
                headers: section.headers,
                ..Game::default()
            });
        }
        None => {}
    }
    outcome
}

/// Parse bare movetext starting at `1.` for white.
pub fn parse_movetext(text: &str) -> ParseOutcome {
    parse_movetext_from(text, 0, MovePosition::new(1, Color::White))
}

fn parse_movetext_from(text: &str, base_offset: usize, start: MovePosition) -> ParseOutcome {
    let tokenized = tokenize(text);
    let mut outcome = ParseOutcome::default();

    for (fragment, span) in &tokenized.unrecognized {
        outcome.warnings.push(ParseWarning::UnknownToken {
            text: fragment.clone(),
            offset: base_offset + span.start,
        });
    }

    if tokenized.tokens.is_empty() {
        outcome.errors.push(ParseError::MissingMovetext);
        return outcome;
    }

    let mut parser = MovetextParser::new(&tokenized.tokens, base_offset);
    let line = parser.parse_line(start, false);
    let trailing = parser.remaining();

    outcome.errors.extend(parser.errors);
    outcome.warnings.extend(parser.warnings);
    if trailing > 0 {
        outcome
            .warnings
            .push(ParseWarning::TrailingInput { count: trailing });
    }

    tracing::debug!(
        slots = line.moves.len(),
        errors = outcome.errors.len(),
        warnings = outcome.warnings.len(),
        "parsed movetext"
    );

    outcome.game = Some(Game {
        headers: Default::default(),
        comment: line.leading_comment,
        moves: line.moves,
        result: line.result,
        variations: line.leading_variations,
    });
    outcome
}

/// Where the movetext starts, taken from a `FEN` tag when present
fn start_position(headers: &std::collections::BTreeMap<String, String>) -> MovePosition {
    let default = MovePosition::new(1, Color::White);
    let Some(fen) = headers.get("FEN") else {
        return default;
    };
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let color = match fields.get(1) {
        Some(&"b") => Color::Black,
        _ => Color::White,
    };
    let number = fields
        .get(5)
        .and_then(|n| n.parse().ok())
        .filter(|n: &u32| *n > 0)
        .unwrap_or(1);
    MovePosition::new(number, color)
}
