//! Testing utilities for game assertions
//!
//!     Parser tests should check structure through the fluent API rather than comparing whole
//!     `Game` values, so a failure names the slot and half that differ:
//!
//!         assert_game(&game)
//!             .slot_count(3)
//!             .result("1-0")
//!             .slot(0, |s| {
//!                 s.white("e4").black("e5").variation_count(1);
//!             });
//!
//!     Variations are reached the same way with [SlotAssertion::variation], and nest
//!     arbitrarily deep.

use crate::pgn::ast::{Color, Game, MoveSlot, Variation};

pub fn assert_game(game: &Game) -> GameAssertion<'_> {
    GameAssertion { game }
}

pub struct GameAssertion<'a> {
    game: &'a Game,
}

impl<'a> GameAssertion<'a> {
    pub fn slot_count(self, expected: usize) -> Self {
        assert_slot_count(&self.game.moves, expected, "game");
        self
    }

    pub fn result(self, expected: &str) -> Self {
        assert_eq!(
            self.game.result.as_deref(),
            Some(expected),
            "game: unexpected result"
        );
        self
    }

    pub fn no_result(self) -> Self {
        assert_eq!(self.game.result, None, "game: expected no result");
        self
    }

    pub fn header(self, key: &str, expected: &str) -> Self {
        assert_eq!(
            self.game.header(key),
            Some(expected),
            "game: unexpected header {}",
            key
        );
        self
    }

    pub fn comment(self, expected: &str) -> Self {
        assert_eq!(
            self.game.comment.as_deref(),
            Some(expected),
            "game: unexpected leading comment"
        );
        self
    }

    pub fn mainline(self, expected: &[&str]) -> Self {
        assert_eq!(self.game.mainline_sans(), expected, "game: unexpected mainline");
        self
    }

    pub fn leading_variation_count(self, expected: usize) -> Self {
        assert_eq!(
            self.game.variations.len(),
            expected,
            "game: unexpected number of leading variations"
        );
        self
    }

    pub fn slot<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(SlotAssertion<'a>),
    {
        assertion(slot_at(&self.game.moves, index, "moves"));
        self
    }

    pub fn leading_variation<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(VariationAssertion<'a>),
    {
        assertion(variation_at(&self.game.variations, index, "variations"));
        self
    }
}

pub struct SlotAssertion<'a> {
    slot: &'a MoveSlot,
    context: String,
}

impl<'a> SlotAssertion<'a> {
    pub fn number(self, expected: u32) -> Self {
        assert_eq!(self.slot.number, expected, "{}: unexpected move number", self.context);
        self
    }

    pub fn white(self, expected: &str) -> Self {
        self.half(Color::White, Some(expected))
    }

    pub fn black(self, expected: &str) -> Self {
        self.half(Color::Black, Some(expected))
    }

    pub fn no_white(self) -> Self {
        self.half(Color::White, None)
    }

    pub fn no_black(self) -> Self {
        self.half(Color::Black, None)
    }

    fn half(self, color: Color, expected: Option<&str>) -> Self {
        assert_eq!(
            self.slot.san(color),
            expected,
            "{}: unexpected {} move",
            self.context,
            color
        );
        self
    }

    pub fn comment(self, color: Color, expected: &str) -> Self {
        assert_eq!(
            self.slot.comment(color),
            Some(expected),
            "{}: unexpected {} comment",
            self.context,
            color
        );
        self
    }

    /// Glyphs attached to one half, in order
    pub fn annotations(self, color: Color, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .slot
            .annotations_for(color)
            .map(|a| a.glyph.as_str())
            .collect();
        assert_eq!(actual, expected, "{}: unexpected {} annotations", self.context, color);
        self
    }

    pub fn variation_count(self, expected: usize) -> Self {
        assert_eq!(
            self.slot.variations.len(),
            expected,
            "{}: unexpected number of variations",
            self.context
        );
        self
    }

    pub fn variation<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(VariationAssertion<'a>),
    {
        let context = format!("{}.variations", self.context);
        assertion(variation_at(&self.slot.variations, index, &context));
        self
    }
}

pub struct VariationAssertion<'a> {
    variation: &'a Variation,
    context: String,
}

impl<'a> VariationAssertion<'a> {
    pub fn starts_at(self, number: u32, color: Color) -> Self {
        assert_eq!(
            (self.variation.start_number, self.variation.start_color),
            (number, color),
            "{}: unexpected start",
            self.context
        );
        self
    }

    pub fn origin(self, number: u32, color: Color) -> Self {
        let actual = self.variation.origin.map(|o| (o.number, o.color));
        assert_eq!(actual, Some((number, color)), "{}: unexpected origin", self.context);
        self
    }

    pub fn sans(self, expected: &[&str]) -> Self {
        assert_eq!(self.variation.sans(), expected, "{}: unexpected moves", self.context);
        self
    }

    pub fn comment(self, expected: &str) -> Self {
        assert_eq!(
            self.variation.comment.as_deref(),
            Some(expected),
            "{}: unexpected comment",
            self.context
        );
        self
    }

    pub fn slot_count(self, expected: usize) -> Self {
        assert_slot_count(&self.variation.moves, expected, &self.context);
        self
    }

    pub fn slot<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(SlotAssertion<'a>),
    {
        let context = format!("{}.moves", self.context);
        assertion(slot_at(&self.variation.moves, index, &context));
        self
    }

    pub fn leading_variation_count(self, expected: usize) -> Self {
        assert_eq!(
            self.variation.leading_variations.len(),
            expected,
            "{}: unexpected number of leading variations",
            self.context
        );
        self
    }
}

fn assert_slot_count(moves: &[MoveSlot], expected: usize, context: &str) {
    assert_eq!(
        moves.len(),
        expected,
        "{}: expected {} slots, found {}: [{}]",
        context,
        expected,
        moves.len(),
        summarize_slots(moves)
    );
}

fn slot_at<'a>(moves: &'a [MoveSlot], index: usize, context: &str) -> SlotAssertion<'a> {
    assert!(
        index < moves.len(),
        "{}: slot index {} out of bounds ({} slots)",
        context,
        index,
        moves.len()
    );
    SlotAssertion {
        slot: &moves[index],
        context: format!("{}[{}]", context, index),
    }
}

fn variation_at<'a>(
    variations: &'a [Variation],
    index: usize,
    context: &str,
) -> VariationAssertion<'a> {
    assert!(
        index < variations.len(),
        "{}: variation index {} out of bounds ({} variations)",
        context,
        index,
        variations.len()
    );
    VariationAssertion {
        variation: &variations[index],
        context: format!("{}[{}]", context, index),
    }
}

fn summarize_slots(moves: &[MoveSlot]) -> String {
    moves
        .iter()
        .map(|slot| {
            format!(
                "{}:{}/{}",
                slot.number,
                slot.white.as_deref().unwrap_or("-"),
                slot.black.as_deref().unwrap_or("-")
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pgn::parsing::parse_movetext;

    #[test]
    fn test_fluent_assertions() {
        let game = parse_movetext("1. e4 e5 (1... c5 {Sicilian}) 2. Nf3 *")
            .game
            .unwrap();
        assert_game(&game)
            .slot_count(2)
            .result("*")
            .mainline(&["e4", "e5", "Nf3"])
            .slot(0, |s| {
                s.number(1)
                    .white("e4")
                    .black("e5")
                    .variation_count(1)
                    .variation(0, |v| {
                        v.starts_at(1, Color::Black)
                            .origin(1, Color::Black)
                            .sans(&["c5"])
                            .slot(0, |s| {
                                s.no_white().comment(Color::Black, "Sicilian");
                            });
                    });
            })
            .slot(1, |s| {
                s.white("Nf3").no_black();
            });
    }

    #[test]
    #[should_panic(expected = "expected 5 slots")]
    fn test_slot_count_mismatch_panics() {
        let game = parse_movetext("1. e4 *").game.unwrap();
        assert_game(&game).slot_count(5);
    }
}
