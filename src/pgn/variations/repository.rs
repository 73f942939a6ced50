//! The variation tree and its draft session

use super::draft::{ActiveDraft, DraftOrigin, DraftStart, ParentContext, SnapshotKey};
use super::node::{LiveVariation, NewVariation, VariationId};
use crate::pgn::ast::MovePosition;
use std::collections::BTreeMap;

/// Id-indexed forest of live variations plus at most one active draft.
///
/// Lookups by id never fail loudly: missing ids yield `None` or `false`.
#[derive(Debug, Clone)]
pub struct VariationRepository {
    pub(super) nodes: BTreeMap<VariationId, LiveVariation>,
    pub(super) roots: Vec<VariationId>,
    next_id: u64,
    pub(super) draft: Option<ActiveDraft>,
    pub(super) snapshots: BTreeMap<SnapshotKey, Vec<String>>,
}

impl Default for VariationRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl VariationRepository {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            roots: Vec::new(),
            next_id: 1,
            draft: None,
            snapshots: BTreeMap::new(),
        }
    }

    // ---- reads ----

    pub fn variation(&self, id: VariationId) -> Option<&LiveVariation> {
        self.nodes.get(&id)
    }

    /// Root nodes in insertion order
    pub fn roots(&self) -> Vec<&LiveVariation> {
        self.roots.iter().filter_map(|id| self.nodes.get(id)).collect()
    }

    pub fn children(&self, id: VariationId) -> Vec<&LiveVariation> {
        self.nodes
            .get(&id)
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|child| self.nodes.get(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of persisted nodes at any depth
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn active_draft(&self) -> Option<&ActiveDraft> {
        self.draft.as_ref()
    }

    /// The mainline continuation cached for a draft origin
    pub fn snapshot(&self, anchor: i64, parent: Option<VariationId>) -> Option<&[String]> {
        self.snapshots
            .get(&SnapshotKey { anchor, parent })
            .map(Vec::as_slice)
    }

    /// Every node anchored at `anchor`, roots and nested alike, depth-first
    pub fn variations_at_anchor(&self, anchor: i64) -> Vec<&LiveVariation> {
        let mut found = Vec::new();
        let mut stack: Vec<VariationId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            if node.anchor == anchor {
                found.push(node);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        found
    }

    // ---- tree mutation ----

    /// Persist a new line. Returns `None` for an empty move list or an unknown parent.
    ///
    /// With a parent, the anchor is recomputed as `parent.anchor + parent_ply` and the
    /// caller's anchor is ignored.
    pub fn add_variation(&mut self, new: NewVariation) -> Option<VariationId> {
        if new.moves.is_empty() {
            tracing::debug!("refusing to persist an empty variation");
            return None;
        }

        let anchor = match new.parent {
            Some(parent) => {
                let parent_anchor = self.nodes.get(&parent)?.anchor;
                parent_anchor + new.parent_ply.unwrap_or(0)
            }
            None => new.anchor,
        };

        let id = self.allocate_id();
        let node = LiveVariation {
            id,
            anchor,
            move_number: new.move_number,
            color: new.color,
            moves: new.moves,
            comment: new.comment,
            parent: new.parent,
            parent_ply: new.parent.map(|_| new.parent_ply.unwrap_or(0)),
            children: Vec::new(),
        };

        match node.parent {
            Some(parent) => {
                if let Some(parent_node) = self.nodes.get_mut(&parent) {
                    parent_node.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        tracing::debug!(%id, anchor, parent = ?node.parent, moves = node.moves.len(), "added variation");
        self.nodes.insert(id, node);
        Some(id)
    }

    /// Persist a line under `parent`, `parent_ply` half-moves into it
    pub fn add_nested_variation(
        &mut self,
        parent: VariationId,
        parent_ply: i64,
        position: MovePosition,
        moves: Vec<String>,
        comment: Option<String>,
    ) -> Option<VariationId> {
        let parent_anchor = self.nodes.get(&parent)?.anchor;
        self.add_variation(
            NewVariation::new(parent_anchor + parent_ply, position, moves)
                .with_comment(comment)
                .nested_under(parent, Some(parent_ply)),
        )
    }

    /// Swap a node's moves and comment, keeping its place in the tree
    pub fn replace_variation(
        &mut self,
        id: VariationId,
        moves: Vec<String>,
        comment: Option<String>,
    ) -> bool {
        if moves.is_empty() {
            return false;
        }
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.moves = moves;
                node.comment = comment;
                tracing::debug!(%id, moves = node.moves.len(), "replaced variation");
                true
            }
            None => false,
        }
    }

    /// Delete a node and its whole subtree
    pub fn remove_variation(&mut self, id: VariationId) -> bool {
        let Some(node) = self.nodes.get(&id) else {
            return false;
        };
        match node.parent {
            Some(parent) => {
                if let Some(parent_node) = self.nodes.get_mut(&parent) {
                    parent_node.children.retain(|child| *child != id);
                }
            }
            None => self.roots.retain(|root| *root != id),
        }

        let mut pending = vec![id];
        let mut removed = 0usize;
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                pending.extend(node.children);
                removed += 1;
            }
        }
        tracing::debug!(%id, removed, "removed variation subtree");
        true
    }

    /// Drop the forest, the draft and the snapshot cache. Ids keep counting up.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.draft = None;
        self.snapshots.clear();
    }

    fn allocate_id(&mut self) -> VariationId {
        let id = VariationId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Put a node back to the content captured before a draft touched it
    fn restore_node(&mut self, original: &LiveVariation) {
        if let Some(node) = self.nodes.get_mut(&original.id) {
            node.moves = original.moves.clone();
            node.comment = original.comment.clone();
            tracing::debug!(id = %original.id, "restored variation to its pre-draft content");
        }
    }

    // ---- draft lifecycle ----

    /// Open a draft, replacing any active one without persisting it.
    pub fn begin_draft(&mut self, start: DraftStart) -> DraftOrigin {
        let resumed = start.resume.and_then(|id| self.nodes.get(&id)).cloned();

        let origin = match &resumed {
            Some(node) => match node.parent {
                Some(parent) => DraftOrigin::Nested {
                    anchor: node.anchor,
                    parent,
                    ply: node.parent_ply.unwrap_or(0),
                },
                None => DraftOrigin::Mainline {
                    anchor: node.anchor,
                },
            },
            None => match start.parent {
                Some(ParentContext { parent, ply }) => DraftOrigin::Nested {
                    anchor: start.anchor,
                    parent,
                    ply,
                },
                None => DraftOrigin::Mainline {
                    anchor: start.anchor,
                },
            },
        };

        if let Some(previous) = self.draft.take() {
            tracing::debug!(origin = ?previous.origin, "replacing active draft");
        }

        self.snapshots.insert(
            SnapshotKey {
                anchor: origin.anchor(),
                parent: origin.parent().map(|p| p.parent),
            },
            start.future_moves.clone(),
        );

        let moves = resumed
            .as_ref()
            .map(|node| node.moves.clone())
            .unwrap_or_default();
        let persisted = resumed.as_ref().map(|node| node.id);
        tracing::debug!(?origin, resumed = ?persisted, "began draft");

        self.draft = Some(ActiveDraft {
            origin,
            base_size: start.base_size,
            position: start.position,
            future_moves: start.future_moves,
            moves,
            resumed,
            persisted,
        });
        origin
    }

    /// Replace the working move list. Nothing is persisted.
    pub fn update_draft_moves(&mut self, moves: Vec<String>) -> bool {
        match self.draft.as_mut() {
            Some(draft) => {
                draft.moves = moves;
                true
            }
            None => false,
        }
    }

    /// Write the working list through to the tree, keeping the draft open.
    /// Returns the node now holding the draft, if any.
    pub fn persist_draft_snapshot(&mut self) -> Option<VariationId> {
        let draft = self.draft.clone()?;

        let persisted = if draft.moves.is_empty() {
            match draft.persisted {
                Some(_) if draft.owns_resumed() => {
                    if let Some(original) = &draft.resumed {
                        self.restore_node(original);
                    }
                    draft.persisted
                }
                Some(id) => {
                    self.remove_variation(id);
                    None
                }
                None => None,
            }
        } else {
            let resumed_comment = draft.resumed.as_ref().and_then(|n| n.comment.clone());
            let existing = draft
                .persisted
                .and_then(|id| self.nodes.get(&id).map(|node| (id, node.comment.clone())));
            match existing {
                Some((id, comment)) => {
                    self.replace_variation(id, draft.moves.clone(), comment.or(resumed_comment));
                    Some(id)
                }
                None => {
                    let new = NewVariation::new(
                        draft.origin.anchor(),
                        draft.position,
                        draft.moves.clone(),
                    )
                    .with_comment(resumed_comment);
                    let new = match draft.origin.parent() {
                        Some(ParentContext { parent, ply }) => new.nested_under(parent, Some(ply)),
                        None => new,
                    };
                    self.add_variation(new)
                }
            }
        };

        if let Some(active) = self.draft.as_mut() {
            active.persisted = persisted;
        }
        persisted
    }

    /// Persist and close the draft
    pub fn commit_draft(&mut self) -> Option<VariationId> {
        self.draft.as_ref()?;
        let id = self.persist_draft_snapshot();
        self.draft = None;
        tracing::debug!(committed = ?id, "committed draft");
        id
    }

    /// Close the draft without touching the tree
    pub fn discard_draft(&mut self) -> bool {
        match self.draft.take() {
            Some(draft) => {
                if let Some(id) = draft.persisted.filter(|_| !draft.owns_resumed()) {
                    tracing::debug!(%id, "discarded draft keeps its persisted node");
                }
                true
            }
            None => false,
        }
    }

    /// Close the draft and undo what it persisted
    pub fn discard_draft_and_revert(&mut self) -> bool {
        let Some(draft) = self.draft.take() else {
            return false;
        };
        match (&draft.resumed, draft.persisted) {
            (Some(original), Some(id)) if original.id == id => {
                if self.nodes.contains_key(&id) {
                    self.restore_node(original);
                } else {
                    tracing::debug!(%id, "resumed variation is gone, nothing to restore");
                }
            }
            (_, Some(id)) => {
                self.remove_variation(id);
            }
            (_, None) => {}
        }
        tracing::debug!(origin = ?draft.origin, "reverted draft");
        true
    }

    // ---- mainline reconciliation ----

    /// The notation list to display while a draft is active
    pub fn overlay_mainline(&self, notations: &[String]) -> Vec<String> {
        let Some(draft) = &self.draft else {
            return notations.to_vec();
        };
        let base = draft.base_size;
        if notations.len() >= base {
            let mut overlay = notations[..base].to_vec();
            overlay.extend(draft.future_moves.iter().cloned());
            overlay
        } else if notations.len() + 1 == base {
            let mut overlay = notations.to_vec();
            overlay.extend(draft.future_moves.iter().cloned());
            overlay
        } else {
            draft.future_moves.clone()
        }
    }

    /// Rebuild the canonical mainline from the root-level snapshots, lowest anchor first
    pub fn restore_mainline(&self, notations: &[String]) -> Vec<String> {
        let mut mainline = notations.to_vec();
        for (key, continuation) in self.snapshots.iter().filter(|(k, _)| k.parent.is_none()) {
            let keep = usize::try_from(key.anchor + 1).unwrap_or(0);
            mainline.truncate(keep);
            mainline.extend(continuation.iter().cloned());
        }
        mainline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pgn::ast::Color;

    fn sans(moves: &[&str]) -> Vec<String> {
        moves.iter().map(|m| m.to_string()).collect()
    }

    fn white(number: u32) -> MovePosition {
        MovePosition::new(number, Color::White)
    }

    fn black(number: u32) -> MovePosition {
        MovePosition::new(number, Color::Black)
    }

    #[test]
    fn test_empty_moves_are_rejected() {
        let mut repo = VariationRepository::new();
        assert_eq!(repo.add_variation(NewVariation::new(5, white(4), vec![])), None);
        assert!(repo.is_empty());
    }

    #[test]
    fn test_siblings_at_same_anchor() {
        let mut repo = VariationRepository::new();
        let a = repo
            .add_variation(NewVariation::new(5, white(4), sans(&["d4"])))
            .unwrap();
        let b = repo
            .add_variation(NewVariation::new(5, white(4), sans(&["c4"])))
            .unwrap();
        assert!(b > a);
        assert_eq!(repo.roots().len(), 2);
        assert_eq!(repo.variations_at_anchor(5).len(), 2);
    }

    #[test]
    fn test_nested_anchor_overrides_caller() {
        let mut repo = VariationRepository::new();
        let parent = repo
            .add_variation(NewVariation::new(5, white(4), sans(&["d4", "d5"])))
            .unwrap();
        let child = repo
            .add_variation(
                NewVariation::new(99, black(4), sans(&["Nf6"])).nested_under(parent, Some(1)),
            )
            .unwrap();
        assert_eq!(repo.variation(child).unwrap().anchor, 6);
        assert_eq!(repo.children(parent).len(), 1);
        assert_eq!(repo.variations_at_anchor(6)[0].id, child);
    }

    #[test]
    fn test_unknown_parent() {
        let mut repo = VariationRepository::new();
        let new = NewVariation::new(0, white(1), sans(&["e4"])).nested_under(VariationId(7), None);
        assert_eq!(repo.add_variation(new), None);
    }

    #[test]
    fn test_remove_takes_subtree() {
        let mut repo = VariationRepository::new();
        let parent = repo
            .add_variation(NewVariation::new(1, black(1), sans(&["c5", "Nf3"])))
            .unwrap();
        let child = repo
            .add_nested_variation(parent, 1, white(2), sans(&["c3"]), None)
            .unwrap();
        repo.add_nested_variation(child, 0, white(2), sans(&["d4"]), None)
            .unwrap();
        assert_eq!(repo.len(), 3);
        assert!(repo.remove_variation(parent));
        assert!(repo.is_empty());
        assert!(repo.roots().is_empty());
        assert!(!repo.remove_variation(parent));
    }

    #[test]
    fn test_ids_survive_clear() {
        let mut repo = VariationRepository::new();
        let first = repo
            .add_variation(NewVariation::new(-1, white(1), sans(&["d4"])))
            .unwrap();
        repo.clear();
        let second = repo
            .add_variation(NewVariation::new(-1, white(1), sans(&["c4"])))
            .unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_draft_persist_then_commit() {
        let mut repo = VariationRepository::new();
        repo.begin_draft(DraftStart::new(3, 4, white(3)).with_future_moves(sans(&["Bb5"])));
        repo.update_draft_moves(sans(&["Bc4"]));
        assert!(repo.is_empty());

        let id = repo.persist_draft_snapshot().unwrap();
        repo.update_draft_moves(sans(&["Bc4", "Bc5"]));
        assert_eq!(repo.persist_draft_snapshot(), Some(id));
        assert_eq!(repo.commit_draft(), Some(id));

        assert!(repo.active_draft().is_none());
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.variation(id).unwrap().moves, sans(&["Bc4", "Bc5"]));
    }

    #[test]
    fn test_emptying_new_draft_deletes_node() {
        let mut repo = VariationRepository::new();
        repo.begin_draft(DraftStart::new(3, 4, white(3)));
        repo.update_draft_moves(sans(&["Bc4"]));
        repo.persist_draft_snapshot().unwrap();
        repo.update_draft_moves(vec![]);
        assert_eq!(repo.persist_draft_snapshot(), None);
        assert!(repo.is_empty());
        assert_eq!(repo.active_draft().unwrap().persisted, None);
    }

    #[test]
    fn test_emptying_resumed_draft_restores_node() {
        let mut repo = VariationRepository::new();
        let id = repo
            .add_variation(
                NewVariation::new(3, white(3), sans(&["Bc4"])).with_comment(Some("Italian".into())),
            )
            .unwrap();
        repo.begin_draft(DraftStart::new(3, 4, white(3)).resuming(id));
        repo.update_draft_moves(sans(&["Bc4", "Bc5"]));
        repo.persist_draft_snapshot();
        repo.update_draft_moves(vec![]);
        assert_eq!(repo.persist_draft_snapshot(), Some(id));

        let node = repo.variation(id).unwrap();
        assert_eq!(node.moves, sans(&["Bc4"]));
        assert_eq!(node.comment.as_deref(), Some("Italian"));
        assert_eq!(repo.active_draft().unwrap().persisted, Some(id));
    }

    #[test]
    fn test_revert_restores_resumed_node() {
        let mut repo = VariationRepository::new();
        let id = repo
            .add_variation(NewVariation::new(3, white(3), sans(&["Bc4"])))
            .unwrap();
        repo.begin_draft(DraftStart::new(3, 4, white(3)).resuming(id));
        repo.update_draft_moves(sans(&["Bb5", "a6"]));
        repo.persist_draft_snapshot();
        assert_eq!(repo.variation(id).unwrap().moves, sans(&["Bb5", "a6"]));

        assert!(repo.discard_draft_and_revert());
        assert_eq!(repo.variation(id).unwrap().moves, sans(&["Bc4"]));
    }

    #[test]
    fn test_revert_deletes_created_node() {
        let mut repo = VariationRepository::new();
        repo.begin_draft(DraftStart::new(3, 4, white(3)));
        repo.update_draft_moves(sans(&["Bb5"]));
        repo.persist_draft_snapshot();
        assert_eq!(repo.len(), 1);
        assert!(repo.discard_draft_and_revert());
        assert!(repo.is_empty());
    }

    #[test]
    fn test_discard_leaves_tree() {
        let mut repo = VariationRepository::new();
        repo.begin_draft(DraftStart::new(3, 4, white(3)));
        repo.update_draft_moves(sans(&["Bb5"]));
        assert!(repo.discard_draft());
        assert!(repo.is_empty());
        assert!(!repo.discard_draft());
    }

    #[test]
    fn test_resuming_nested_node_uses_its_linkage() {
        let mut repo = VariationRepository::new();
        let parent = repo
            .add_variation(NewVariation::new(5, white(4), sans(&["d4", "d5"])))
            .unwrap();
        let child = repo
            .add_nested_variation(parent, 1, black(4), sans(&["Nf6"]), None)
            .unwrap();
        let origin = repo.begin_draft(DraftStart::new(0, 7, black(4)).resuming(child));
        assert_eq!(
            origin,
            DraftOrigin::Nested {
                anchor: 6,
                parent,
                ply: 1
            }
        );
        assert_eq!(repo.active_draft().unwrap().moves, sans(&["Nf6"]));
    }

    #[test]
    fn test_nested_draft_creates_child() {
        let mut repo = VariationRepository::new();
        let parent = repo
            .add_variation(NewVariation::new(5, white(4), sans(&["d4", "d5"])))
            .unwrap();
        repo.begin_draft(
            DraftStart::new(6, 7, black(4)).with_parent(ParentContext { parent, ply: 1 }),
        );
        repo.update_draft_moves(sans(&["e5"]));
        let child = repo.commit_draft().unwrap();
        assert_eq!(repo.variation(child).unwrap().parent, Some(parent));
        assert_eq!(repo.variation(child).unwrap().anchor, 6);
        assert_eq!(repo.snapshot(6, Some(parent)), Some(&[][..]));
    }

    #[test]
    fn test_overlay_cases() {
        let mut repo = VariationRepository::new();
        let history = sans(&["e4", "e5", "Nf3", "Nc6"]);
        assert_eq!(repo.overlay_mainline(&history), history);

        repo.begin_draft(DraftStart::new(1, 2, white(2)).with_future_moves(sans(&["Nf3", "Nc6"])));
        assert_eq!(repo.overlay_mainline(&history), history);
        assert_eq!(
            repo.overlay_mainline(&sans(&["e4", "e5", "Bc4"])),
            sans(&["e4", "e5", "Nf3", "Nc6"])
        );
        assert_eq!(
            repo.overlay_mainline(&sans(&["e4"])),
            sans(&["e4", "Nf3", "Nc6"])
        );
        assert_eq!(repo.overlay_mainline(&[]), sans(&["Nf3", "Nc6"]));
    }

    #[test]
    fn test_restore_mainline_applies_root_snapshots() {
        let mut repo = VariationRepository::new();
        repo.begin_draft(DraftStart::new(1, 2, white(2)).with_future_moves(sans(&["Nf3", "Nc6"])));
        repo.begin_draft(DraftStart::new(3, 4, white(3)).with_future_moves(sans(&["Bb5"])));
        repo.discard_draft();

        let drifted = sans(&["e4", "e5", "Bc4", "Bc5", "c3"]);
        assert_eq!(
            repo.restore_mainline(&drifted),
            sans(&["e4", "e5", "Nf3", "Nc6", "Bb5"])
        );
    }
}
