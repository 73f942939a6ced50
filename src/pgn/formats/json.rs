//! JSON rendering of the data model

use super::registry::{FormatError, Formatter};
use crate::pgn::ast::Game;

pub fn to_json(game: &Game) -> Result<String, FormatError> {
    serde_json::to_string_pretty(game).map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub fn from_json(text: &str) -> Result<Game, FormatError> {
    serde_json::from_str(text).map_err(|e| FormatError::SerializationError(e.to_string()))
}

/// Pretty-printed JSON of the whole [Game]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, game: &Game) -> Result<String, FormatError> {
        to_json(game)
    }

    fn description(&self) -> &str {
        "Game structure as JSON"
    }
}
