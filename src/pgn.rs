//! Main module for movetext library functionality

pub mod ast;
pub mod config;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod testing;
pub mod variations;

pub use ast::{Annotation, AnnotationPosition, Color, Game, MovePosition, MoveSlot, Variation};
pub use formats::{export_game, render_line, ExportOptions};
pub use parsing::{parse_game, parse_movetext, ParseError, ParseOutcome, ParseWarning};
pub use variations::{VariationId, VariationRepository};
