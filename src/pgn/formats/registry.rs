//! Format registry for game serialization
//!
//! Each output format implements [Formatter] and is registered with a [FormatRegistry] under
//! its name, which is what the CLI's `--format` flag looks up.

use crate::pgn::ast::Game;
use std::collections::HashMap;
use thiserror::Error;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// A named serializer for [Game]s
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "pgn", "json")
    fn name(&self) -> &str;

    fn serialize(&self, game: &Game) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

/// Registry of game formatters, keyed by name
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any formatter with the same name.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, game: &Game, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(game)
    }

    /// Format names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registry with the built-in formatters using default export options
    pub fn with_defaults() -> Self {
        Self::with_options(super::ExportOptions::default())
    }

    /// Registry with the built-in formatters, the PGN one configured with `options`
    pub fn with_options(options: super::ExportOptions) -> Self {
        let mut registry = Self::new();
        registry.register(super::PgnFormatter::new(options));
        registry.register(super::JsonFormatter);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestFormatter;
    impl Formatter for TestFormatter {
        fn name(&self) -> &str {
            "test"
        }
        fn serialize(&self, _game: &Game) -> Result<String, FormatError> {
            Ok("test output".to_string())
        }
        fn description(&self) -> &str {
            "Test formatter"
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert!(registry.list_formats().is_empty());
    }

    #[test]
    fn test_registry_register() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        assert!(registry.has("test"));
        assert_eq!(registry.list_formats(), vec!["test"]);
        assert_eq!(
            registry.get("test").map(|f| f.description()),
            Some("Test formatter")
        );
    }

    #[test]
    fn test_registry_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        let game = Game::new();
        assert_eq!(registry.serialize(&game, "test").unwrap(), "test output");
        assert_eq!(
            registry.serialize(&game, "nope"),
            Err(FormatError::FormatNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_defaults() {
        let registry = FormatRegistry::default();
        assert_eq!(registry.list_formats(), vec!["json", "pgn"]);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FormatError::FormatNotFound("xml".into()).to_string(),
            "Format 'xml' not found"
        );
    }
}
