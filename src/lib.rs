//! # movetext
//!
//! A notation engine for chess game records.
//!
//! The crate is split along the path a game record travels:
//!
//!     PGN text -> lexing -> parsing -> ast::Game -> formats -> PGN text
//!
//! and, next to it, the interactive side used while annotating a game live:
//!
//!     ast::Game <-> variations::VariationRepository (drafts, nested lines)
//!
//! Nothing in here checks chess legality. Moves are opaque SAN strings that only
//! have to look like moves; a rules engine upstream is expected to have produced
//! them.
//!
//! For the fluent assertion helpers used by the test suite, see the
//! [testing module](pgn::testing).

pub mod pgn;
