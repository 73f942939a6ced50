//! Game record data model
//!
//!     These are the immutable values that travel between the parser, the exporter and the
//!     variation repository. A `Game` owns a mainline of `MoveSlot`s; every slot may carry
//!     `Variation`s, and every variation owns its own slots, recursively, so the nesting of
//!     parenthesised lines in the source is mirrored exactly.
//!
//! Addressing
//!
//!     Half-moves are addressed by (move number, color), see [MovePosition]. The repository
//!     works with flat ply anchors instead; the translation between the two lives in
//!     [crate::pgn::variations::ply].

pub mod color;
pub mod game;

pub use color::{Color, MovePosition};
pub use game::{
    slots_from_sans, Annotation, AnnotationPosition, Game, MoveSlot, Variation, MAX_VARIATION_DEPTH,
};
