//! Output formats for games
//!
//! This module contains the serializers for [crate::pgn::ast::Game]:
//! - PGN text, the mirror image of the parser (see [pgn])
//! - JSON, a direct serde rendering of the data model (see [json])
//!
//! Both are reachable by name through the [FormatRegistry].

pub mod json;
pub mod options;
pub mod pgn;
pub mod registry;

pub use json::JsonFormatter;
pub use options::ExportOptions;
pub use pgn::{export_game, render_line, PgnFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
