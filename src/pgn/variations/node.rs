//! Persisted variation nodes

use crate::pgn::ast::{Color, MovePosition};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of a persisted variation. Allocated in strictly increasing order, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariationId(pub u64);

impl fmt::Display for VariationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A variation as edited live: a flat SAN list anchored at a mainline ply.
///
/// Root nodes carry their own move number and color. A nested node is addressed relative to
/// its parent through `parent_ply`, and its `anchor` is always `parent.anchor + parent_ply`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveVariation {
    pub id: VariationId,
    pub anchor: i64,
    pub move_number: u32,
    pub color: Color,
    pub moves: Vec<String>,
    pub comment: Option<String>,
    pub parent: Option<VariationId>,
    pub parent_ply: Option<i64>,
    pub children: Vec<VariationId>,
}

impl LiveVariation {
    pub fn position(&self) -> MovePosition {
        MovePosition::new(self.move_number, self.color)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Input of [super::VariationRepository::add_variation]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVariation {
    pub anchor: i64,
    pub move_number: u32,
    pub color: Color,
    pub moves: Vec<String>,
    pub comment: Option<String>,
    pub parent: Option<VariationId>,
    pub parent_ply: Option<i64>,
}

impl NewVariation {
    pub fn new(anchor: i64, position: MovePosition, moves: Vec<String>) -> Self {
        Self {
            anchor,
            move_number: position.number,
            color: position.color,
            moves,
            comment: None,
            parent: None,
            parent_ply: None,
        }
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    /// Hang the line under `parent`, `ply` half-moves into the parent's line
    pub fn nested_under(mut self, parent: VariationId, ply: Option<i64>) -> Self {
        self.parent = Some(parent);
        self.parent_ply = ply;
        self
    }
}
