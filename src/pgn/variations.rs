//! Live variation tree
//!
//!     While a game is being analysed, variations are edited as flat SAN lists hanging off a
//!     mainline ply (the anchor) rather than as PGN slots. [VariationRepository] owns that
//!     forest: an id-indexed arena where each node lists its children by id, plus at most one
//!     draft session for the line currently being typed.
//!
//!     Draft lifecycle:
//!         NoDraft --begin_draft--> DraftActive
//!         DraftActive --update_draft_moves | persist_draft_snapshot--> DraftActive
//!         DraftActive --commit_draft | discard_draft | discard_draft_and_revert--> NoDraft
//!
//!     The repository also caches, per draft origin, the mainline continuation the draft
//!     branched away from, so the canonical mainline can be rebuilt later. See
//!     [VariationRepository::restore_mainline].
//!
//!     Conversion to and from the PGN model lives in [conversion], ply arithmetic in [ply].
//!     Nothing here validates chess legality.

pub mod conversion;
pub mod draft;
pub mod node;
pub mod ply;
pub mod repository;

pub use draft::{ActiveDraft, DraftOrigin, DraftStart, ParentContext, SnapshotKey};
pub use node::{LiveVariation, NewVariation, VariationId};
pub use ply::{anchor_for, move_color_from_ply, ply_offset};
pub use repository::VariationRepository;
