//! Conversion between the live forest and the PGN model
//!
//!     Export walks the forest into [Variation]s addressed by move number and color. A root
//!     keeps its own position as origin. A nested node starts at the ply right after its
//!     anchor and hangs off the parent slot holding that half-move, falling back to the half
//!     right before it, and to the parent's leading variations when the parent has neither.
//!
//!     Import is the inverse: every variation with moves becomes a node whose anchor is
//!     computed from its first move, children keep `child.anchor - parent.anchor` as their
//!     parent offset.

use super::node::{LiveVariation, NewVariation, VariationId};
use super::ply::{anchor_for, game_start, move_color_from_ply, position_after};
use super::repository::VariationRepository;
use crate::pgn::ast::{slots_from_sans, Game, MovePosition, MoveSlot, Variation};
use crate::pgn::formats::{render_line, ExportOptions};
use std::collections::BTreeMap;

impl VariationRepository {
    /// The forest as PGN variations, roots in insertion order
    pub fn export_variations(&self) -> Vec<Variation> {
        self.roots
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .map(|node| self.to_variation(node))
            .collect()
    }

    fn start_of(&self, node: &LiveVariation) -> MovePosition {
        if node.is_root() {
            node.position()
        } else {
            position_after(node.anchor)
        }
    }

    fn to_variation(&self, node: &LiveVariation) -> Variation {
        let start = self.start_of(node);
        let mut moves = slots_from_sans(start, &node.moves);
        let mut leading = Vec::new();

        for child in node.children.iter().filter_map(|id| self.nodes.get(id)) {
            let mut variation = self.to_variation(child);
            let child_start = variation.start();
            let previous = move_color_from_ply(child_start, -1);
            let target = [child_start, previous]
                .into_iter()
                .find_map(|position| slot_index(&moves, position).map(|i| (i, position)));
            match target {
                Some((index, origin)) => {
                    variation.origin = Some(origin);
                    moves[index].variations.push(variation);
                }
                None => {
                    variation.origin = None;
                    leading.push(variation);
                }
            }
        }

        let mut variation = Variation::new(start, moves).with_origin(start);
        variation.comment = node.comment.clone();
        variation.leading_variations = leading;
        variation
    }

    /// Rebuild the forest from a parsed game. The draft and the snapshot cache are dropped.
    pub fn replace_with_pgn_variations(&mut self, game: &Game) {
        self.clear();
        for variation in &game.variations {
            self.import_variation(variation, None);
        }
        for slot in &game.moves {
            for variation in &slot.variations {
                self.import_variation(variation, None);
            }
        }
        tracing::debug!(nodes = self.len(), roots = self.roots.len(), "imported variations");
    }

    fn import_variation(&mut self, variation: &Variation, parent: Option<(VariationId, i64)>) {
        let sans = variation.sans();
        if sans.is_empty() {
            tracing::trace!("skipping variation without moves");
            return;
        }

        let start = variation.start();
        let anchor = anchor_for(start);
        let mut new = NewVariation::new(anchor, start, sans).with_comment(variation.comment.clone());
        if let Some((parent_id, parent_anchor)) = parent {
            new = new.nested_under(parent_id, Some(anchor - parent_anchor));
        }
        let Some(id) = self.add_variation(new) else {
            return;
        };

        for child in &variation.leading_variations {
            self.import_variation(child, Some((id, anchor)));
        }
        for slot in &variation.moves {
            for child in &slot.variations {
                self.import_variation(child, Some((id, anchor)));
            }
        }
    }

    /// A game holding `mainline` with the forest attached. Roots whose origin is a mainline
    /// half hang off that slot, the rest become game-level variations.
    pub fn merge_into_game(
        &self,
        mainline: &[String],
        headers: BTreeMap<String, String>,
        result: Option<String>,
    ) -> Game {
        let mut moves = slots_from_sans(game_start(), mainline);
        let mut loose = Vec::new();
        for variation in self.export_variations() {
            let index = variation
                .origin
                .and_then(|origin| slot_index(&moves, origin));
            match index {
                Some(index) => moves[index].variations.push(variation),
                None => loose.push(variation),
            }
        }
        Game {
            headers,
            comment: None,
            moves,
            result,
            variations: loose,
        }
    }

    /// A node's moves rendered as movetext, e.g. `3... Nf6 4. e5`
    pub fn preview(&self, id: VariationId) -> Option<String> {
        let node = self.nodes.get(&id)?;
        let slots = slots_from_sans(self.start_of(node), &node.moves);
        Some(render_line(&slots, &ExportOptions::default(), &[]))
    }
}

fn slot_index(moves: &[MoveSlot], position: MovePosition) -> Option<usize> {
    moves
        .iter()
        .position(|slot| slot.number == position.number && slot.san(position.color).is_some())
}
