//! Draft session types

use super::node::{LiveVariation, VariationId};
use crate::pgn::ast::MovePosition;
use serde::{Deserialize, Serialize};

/// The line a nested draft hangs from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentContext {
    pub parent: VariationId,
    pub ply: i64,
}

/// Where the draft will be persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftOrigin {
    Mainline { anchor: i64 },
    Nested { anchor: i64, parent: VariationId, ply: i64 },
}

impl DraftOrigin {
    pub fn anchor(&self) -> i64 {
        match self {
            DraftOrigin::Mainline { anchor } | DraftOrigin::Nested { anchor, .. } => *anchor,
        }
    }

    pub fn parent(&self) -> Option<ParentContext> {
        match self {
            DraftOrigin::Mainline { .. } => None,
            DraftOrigin::Nested { parent, ply, .. } => Some(ParentContext {
                parent: *parent,
                ply: *ply,
            }),
        }
    }
}

/// Arguments of [super::VariationRepository::begin_draft]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftStart {
    pub anchor: i64,
    /// Length of the mainline notation list when the draft began
    pub base_size: usize,
    pub position: MovePosition,
    /// The mainline continuation the draft branches away from
    pub future_moves: Vec<String>,
    pub resume: Option<VariationId>,
    pub parent: Option<ParentContext>,
}

impl DraftStart {
    pub fn new(anchor: i64, base_size: usize, position: MovePosition) -> Self {
        Self {
            anchor,
            base_size,
            position,
            future_moves: Vec::new(),
            resume: None,
            parent: None,
        }
    }

    pub fn with_future_moves(mut self, moves: Vec<String>) -> Self {
        self.future_moves = moves;
        self
    }

    pub fn resuming(mut self, id: VariationId) -> Self {
        self.resume = Some(id);
        self
    }

    pub fn with_parent(mut self, parent: ParentContext) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// The single in-progress edit of a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDraft {
    pub origin: DraftOrigin,
    pub base_size: usize,
    pub position: MovePosition,
    pub future_moves: Vec<String>,
    /// The working move list
    pub moves: Vec<String>,
    /// Content of the resumed node before the draft touched it
    pub resumed: Option<LiveVariation>,
    /// Node the draft has written through to, if any
    pub persisted: Option<VariationId>,
}

impl ActiveDraft {
    /// True when the persisted node is the resumed one rather than a node this draft created
    pub fn owns_resumed(&self) -> bool {
        match (&self.resumed, self.persisted) {
            (Some(original), Some(id)) => original.id == id,
            _ => false,
        }
    }
}

/// Key of the mainline snapshot cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotKey {
    pub anchor: i64,
    pub parent: Option<VariationId>,
}
