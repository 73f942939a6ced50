//! Recursive line parser
//!
//!     One function, [MovetextParser::parse_line], parses the mainline and every variation at
//!     any depth. A `(` recurses with the position about to be played as the seed and returns
//!     at the matching `)`.
//!
//!     Per line we carry the number and color to move, a builder for the slot being assembled,
//!     and the most recently played half-move. Comments, glyphs and variations attach to the
//!     open builder's half when there is one, otherwise to the most recently played half, and
//!     only when the line has played nothing yet do they land at the branch point (leading
//!     comment / leading variation).
//!
//!     Nesting is capped at [MAX_VARIATION_DEPTH]. A `(` past the cap is skipped up to its
//!     matching `)` without recursing and reported as [ParseError::VariationTooDeep].
//!
//!     Black halves settle their slot, so the builder is flushed right after them. White halves
//!     stay open until the next white move, the end of the line, or a marker for another
//!     number.

use super::builder::MoveBuilder;
use super::diagnostics::{ParseError, ParseWarning};
use super::san;
use crate::pgn::ast::game::join_comment;
use crate::pgn::ast::{
    Annotation, Color, MovePosition, MoveSlot, Variation, MAX_VARIATION_DEPTH,
};
use crate::pgn::lexing::{MoveNumberMarker, Token};
use logos::Span;

/// What one line (mainline or variation body) produced.
#[derive(Debug, Default)]
pub(crate) struct LineOutput {
    pub moves: Vec<MoveSlot>,
    pub result: Option<String>,
    pub leading_variations: Vec<Variation>,
    pub leading_comment: Option<String>,
    pub closed_by_paren: bool,
}

#[derive(Debug, Clone, Copy)]
enum Attachment {
    Half(MovePosition),
    BranchPoint,
}

struct LineState {
    next: MovePosition,
    builder: Option<MoveBuilder>,
    moves: Vec<MoveSlot>,
    last_played: Option<MovePosition>,
    leading_variations: Vec<Variation>,
    leading_comment: Option<String>,
}

impl LineState {
    fn new(start: MovePosition) -> Self {
        Self {
            next: start,
            builder: None,
            moves: Vec::new(),
            last_played: None,
            leading_variations: Vec::new(),
            leading_comment: None,
        }
    }

    fn flush(&mut self) {
        if let Some(slot) = self.builder.take().and_then(MoveBuilder::finish) {
            self.moves.push(slot);
        }
    }

    /// A black marker opens a builder for its number unless one is already open
    fn open_black(&mut self, number: u32) {
        if self.builder.as_ref().map(MoveBuilder::number) != Some(number) {
            self.flush();
            self.builder = Some(MoveBuilder::new(number));
        }
    }

    fn play(&mut self, position: MovePosition, san: &str) {
        match position.color {
            Color::White => {
                self.flush();
                let mut builder = MoveBuilder::new(position.number);
                builder.play(Color::White, san);
                self.builder = Some(builder);
            }
            Color::Black => {
                let reuse = self
                    .builder
                    .as_ref()
                    .is_some_and(|b| b.number() == position.number && !b.has(Color::Black));
                if !reuse {
                    self.flush();
                    self.builder = Some(MoveBuilder::new(position.number));
                }
                if let Some(builder) = self.builder.as_mut() {
                    builder.play(Color::Black, san);
                }
                self.flush();
            }
        }
        self.last_played = Some(position);
        self.next = position.next();
    }

    fn attachment(&self) -> Attachment {
        if let Some(position) = self.builder.as_ref().and_then(MoveBuilder::last_played) {
            return Attachment::Half(position);
        }
        match self.last_played {
            Some(position) => Attachment::Half(position),
            None => Attachment::BranchPoint,
        }
    }

    fn slot_mut(&mut self, position: MovePosition) -> Option<&mut MoveSlot> {
        let in_builder = self
            .builder
            .as_ref()
            .is_some_and(|b| b.number() == position.number && b.has(position.color));
        if in_builder {
            return self.builder.as_mut().and_then(|b| b.slot_for(position));
        }
        self.moves
            .iter_mut()
            .rev()
            .find(|slot| slot.number == position.number && slot.san(position.color).is_some())
    }

    fn attach_comment(&mut self, text: &str) {
        if let Attachment::Half(position) = self.attachment() {
            if let Some(slot) = self.slot_mut(position) {
                slot.push_comment(position.color, text);
                return;
            }
        }
        join_comment(&mut self.leading_comment, text);
    }

    /// Returns false when there is no move to carry the glyph
    fn attach_annotation(&mut self, glyph: &str) -> bool {
        if let Attachment::Half(position) = self.attachment() {
            if let Some(slot) = self.slot_mut(position) {
                slot.annotations.push(Annotation::new(glyph, position.color));
                return true;
            }
        }
        false
    }

    fn attach_variation(&mut self, at: Attachment, variation: Variation) {
        if let Attachment::Half(position) = at {
            if let Some(slot) = self.slot_mut(position) {
                slot.variations.push(variation.with_origin(position));
                return;
            }
        }
        self.leading_variations.push(variation);
    }
}

pub(crate) struct MovetextParser<'t> {
    tokens: &'t [(Token, Span)],
    pos: usize,
    base_offset: usize,
    depth: usize,
    pub errors: Vec<ParseError>,
    pub warnings: Vec<ParseWarning>,
}

impl<'t> MovetextParser<'t> {
    pub fn new(tokens: &'t [(Token, Span)], base_offset: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            base_offset,
            depth: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Tokens not consumed yet
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.pos
    }

    fn offset(&self, span: &Span) -> usize {
        self.base_offset + span.start
    }

    /// Parse tokens into one line until the input ends, a termination marker is read, or
    /// (with `stop_at_close`) the `)` closing this line is read.
    pub fn parse_line(&mut self, start: MovePosition, stop_at_close: bool) -> LineOutput {
        let tokens = self.tokens;
        let mut state = LineState::new(start);
        let mut result = None;
        let mut closed_by_paren = false;

        while let Some((token, span)) = tokens.get(self.pos) {
            self.pos += 1;
            match token {
                Token::MoveNumber(marker) => self.apply_move_number(&mut state, *marker, span),
                Token::Move(raw) => self.play(&mut state, raw, span),
                Token::Comment(text) => state.attach_comment(text),
                Token::Nag(nag) => {
                    if !state.attach_annotation(&nag.glyph) {
                        self.warnings.push(ParseWarning::AnnotationBeforeMove {
                            glyph: nag.glyph.clone(),
                        });
                    }
                }
                Token::VariationStart => self.parse_variation(&mut state, span),
                Token::VariationEnd if stop_at_close => {
                    closed_by_paren = true;
                    break;
                }
                Token::VariationEnd => {
                    self.warnings.push(ParseWarning::UnexpectedVariationEnd {
                        offset: self.offset(span),
                    });
                }
                Token::Termination(value) => {
                    result = Some(value.clone());
                    if stop_at_close {
                        closed_by_paren = self.skip_to_close();
                    }
                    break;
                }
            }
        }

        state.flush();
        LineOutput {
            moves: state.moves,
            result,
            leading_variations: state.leading_variations,
            leading_comment: state.leading_comment,
            closed_by_paren,
        }
    }

    /// Consume tokens up to and including the `)` that closes the current line. Returns false
    /// when the input ends first.
    fn skip_to_close(&mut self) -> bool {
        let mut open = 1usize;
        let mut skipped = 0usize;
        while let Some((token, _)) = self.tokens.get(self.pos) {
            self.pos += 1;
            match token {
                Token::VariationStart => open += 1,
                Token::VariationEnd => {
                    open -= 1;
                    if open == 0 {
                        if skipped > 0 {
                            tracing::debug!(skipped, "tokens skipped before closing parenthesis");
                        }
                        return true;
                    }
                }
                _ => {}
            }
            skipped += 1;
        }
        false
    }

    fn apply_move_number(&mut self, state: &mut LineState, marker: MoveNumberMarker, span: &Span) {
        if marker.number == 0 {
            self.warnings.push(ParseWarning::UnknownToken {
                text: Token::MoveNumber(marker).describe(),
                offset: self.offset(span),
            });
            return;
        }
        if marker.black {
            state.next = MovePosition::new(marker.number, Color::Black);
            state.open_black(marker.number);
        } else {
            state.next = MovePosition::new(marker.number, Color::White);
        }
    }

    fn play(&mut self, state: &mut LineState, raw: &str, span: &Span) {
        let (san, suffix) = san::split_suffix(raw);
        if !san::looks_like_move(san) {
            tracing::trace!(token = raw, "dropping token that does not look like a move");
            self.warnings.push(ParseWarning::UnknownToken {
                text: raw.to_string(),
                offset: self.offset(span),
            });
            return;
        }

        let position = state.next;
        if state.last_played.is_some_and(|last| position <= last) {
            self.warnings.push(ParseWarning::DuplicateHalfMove {
                position,
                san: san.to_string(),
            });
            return;
        }

        state.play(position, san);
        if let Some(glyph) = suffix {
            state.attach_annotation(glyph);
        }
    }

    fn parse_variation(&mut self, state: &mut LineState, span: &Span) {
        let offset = self.offset(span);
        if self.depth >= MAX_VARIATION_DEPTH {
            tracing::debug!(offset, "variation nested too deep, skipping");
            self.errors.push(ParseError::VariationTooDeep {
                offset,
                max: MAX_VARIATION_DEPTH,
            });
            if !self.skip_to_close() {
                self.errors.push(ParseError::UnmatchedParenthesis { offset });
            }
            return;
        }

        let seed = state.next;
        let at = state.attachment();
        self.depth += 1;
        let line = self.parse_line(seed, true);
        self.depth -= 1;

        if !line.closed_by_paren {
            self.errors.push(ParseError::UnmatchedParenthesis { offset });
        }
        if let Some(result) = &line.result {
            tracing::debug!(result = %result, offset, "termination marker inside a variation");
        }

        let mut comment = line.leading_comment;
        let tokens = self.tokens;
        if let Some((Token::Comment(text), _)) = tokens.get(self.pos) {
            join_comment(&mut comment, text);
            self.pos += 1;
        }

        let start = line
            .moves
            .first()
            .map(|slot| {
                let color = if slot.white.is_some() {
                    Color::White
                } else {
                    Color::Black
                };
                MovePosition::new(slot.number, color)
            })
            .unwrap_or(seed);

        let mut variation = Variation::new(start, line.moves);
        variation.comment = comment;
        variation.leading_variations = line.leading_variations;

        if variation.is_empty() {
            self.warnings.push(ParseWarning::EmptyVariation { offset });
            return;
        }
        state.attach_variation(at, variation);
    }
}
