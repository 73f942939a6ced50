//! Games, move slots, variations and annotations

use super::color::{Color, MovePosition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where an annotation glyph is rendered relative to its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationPosition {
    Before,
    #[default]
    After,
}

/// A glyph attached to one half of a move slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub glyph: String,
    pub color: Color,
    #[serde(default)]
    pub position: AnnotationPosition,
}

impl Annotation {
    pub fn new(glyph: impl Into<String>, color: Color) -> Self {
        Self {
            glyph: glyph.into(),
            color,
            position: AnnotationPosition::After,
        }
    }
}

/// One move number worth of a line: an optional white and an optional black half.
///
/// A slot that opens a line on black's turn has no white half (`4... Nf6`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MoveSlot {
    pub number: u32,
    pub white: Option<String>,
    pub black: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub black_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<Variation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl MoveSlot {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Self::default()
        }
    }

    pub fn san(&self, color: Color) -> Option<&str> {
        match color {
            Color::White => self.white.as_deref(),
            Color::Black => self.black.as_deref(),
        }
    }

    pub fn set_san(&mut self, color: Color, san: impl Into<String>) {
        let san = Some(san.into());
        match color {
            Color::White => self.white = san,
            Color::Black => self.black = san,
        }
    }

    pub fn comment(&self, color: Color) -> Option<&str> {
        match color {
            Color::White => self.white_comment.as_deref(),
            Color::Black => self.black_comment.as_deref(),
        }
    }

    /// Append a comment to one half, joining with any comment already there.
    pub fn push_comment(&mut self, color: Color, text: &str) {
        let slot = match color {
            Color::White => &mut self.white_comment,
            Color::Black => &mut self.black_comment,
        };
        join_comment(slot, text);
    }

    pub fn annotations_for(&self, color: Color) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(move |a| a.color == color)
    }

    /// Variations branching from the given half. Variations without an origin are
    /// rendered with the white half.
    pub fn variations_for(&self, color: Color) -> impl Iterator<Item = &Variation> {
        self.variations.iter().filter(move |v| match v.origin {
            Some(origin) => origin.color == color,
            None => color == Color::White,
        })
    }

    /// The half-moves in play order
    pub fn sans(&self) -> impl Iterator<Item = &str> {
        self.white.as_deref().into_iter().chain(self.black.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.white.is_none() && self.black.is_none()
    }
}

/// Deepest variation nesting the parser builds and the exporter writes. The mainline is depth 0.
pub const MAX_VARIATION_DEPTH: usize = 256;

/// An alternative line, parenthesised in PGN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub start_number: u32,
    pub start_color: Color,
    pub moves: Vec<MoveSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// The half-move this line branches from. Absent for leading variations that sit
    /// at a branch point before any move of the enclosing line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<MovePosition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leading_variations: Vec<Variation>,
}

impl Variation {
    pub fn new(start: MovePosition, moves: Vec<MoveSlot>) -> Self {
        Self {
            start_number: start.number,
            start_color: start.color,
            moves,
            comment: None,
            origin: None,
            leading_variations: Vec::new(),
        }
    }

    pub fn start(&self) -> MovePosition {
        MovePosition::new(self.start_number, self.start_color)
    }

    pub fn with_origin(mut self, origin: MovePosition) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.leading_variations.is_empty() && self.comment.is_none()
    }

    /// Flattened SAN list of this line (nested variations excluded)
    pub fn sans(&self) -> Vec<String> {
        flatten_sans(&self.moves)
    }
}

/// A complete game record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Game {
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub moves: Vec<MoveSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Variations anchored before the first mainline move
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<Variation>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    pub fn mainline_sans(&self) -> Vec<String> {
        flatten_sans(&self.moves)
    }
}

pub(crate) fn flatten_sans(slots: &[MoveSlot]) -> Vec<String> {
    slots
        .iter()
        .flat_map(|slot| slot.sans().map(str::to_string))
        .collect()
}

/// Join `text` onto an optional comment with a newline, ignoring empty pieces.
pub(crate) fn join_comment(existing: &mut Option<String>, text: &str) {
    if text.is_empty() {
        return;
    }
    match existing {
        Some(current) if !current.is_empty() => {
            current.push('\n');
            current.push_str(text);
        }
        _ => *existing = Some(text.to_string()),
    }
}

/// Lay a flat SAN list out as move slots starting at `start`.
pub fn slots_from_sans(start: MovePosition, sans: &[String]) -> Vec<MoveSlot> {
    let mut slots: Vec<MoveSlot> = Vec::new();
    let mut position = start;
    for san in sans {
        match position.color {
            Color::White => {
                let mut slot = MoveSlot::new(position.number);
                slot.white = Some(san.clone());
                slots.push(slot);
            }
            Color::Black => match slots.last_mut() {
                Some(slot) if slot.number == position.number && slot.black.is_none() => {
                    slot.black = Some(san.clone());
                }
                _ => {
                    let mut slot = MoveSlot::new(position.number);
                    slot.black = Some(san.clone());
                    slots.push(slot);
                }
            },
        }
        position = position.next();
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sans(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_slots_from_sans_white_start() {
        let slots = slots_from_sans(
            MovePosition::new(1, Color::White),
            &sans(&["e4", "e5", "Nf3"]),
        );
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].white.as_deref(), Some("e4"));
        assert_eq!(slots[0].black.as_deref(), Some("e5"));
        assert_eq!(slots[1].number, 2);
        assert_eq!(slots[1].black, None);
    }

    #[test]
    fn test_slots_from_sans_black_start() {
        let slots = slots_from_sans(MovePosition::new(3, Color::Black), &sans(&["Nf6", "e5"]));
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].number, 3);
        assert_eq!(slots[0].white, None);
        assert_eq!(slots[0].black.as_deref(), Some("Nf6"));
        assert_eq!(slots[1].white.as_deref(), Some("e5"));
    }

    #[test]
    fn test_push_comment_joins_and_skips_empty() {
        let mut slot = MoveSlot::new(1);
        slot.push_comment(Color::White, "first");
        slot.push_comment(Color::White, "");
        slot.push_comment(Color::White, "second");
        assert_eq!(slot.comment(Color::White), Some("first\nsecond"));
        assert_eq!(slot.comment(Color::Black), None);
    }

    #[test]
    fn test_variations_for_filters_by_origin() {
        let mut slot = MoveSlot::new(1);
        let start = MovePosition::new(1, Color::White);
        slot.variations
            .push(Variation::new(start, vec![]).with_origin(MovePosition::new(1, Color::Black)));
        slot.variations.push(Variation::new(start, vec![]).with_origin(start));
        assert_eq!(slot.variations_for(Color::White).count(), 1);
        assert_eq!(slot.variations_for(Color::Black).count(), 1);
    }
}
