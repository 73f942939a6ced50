//! Export switches

use crate::pgn::config::ExportConfig;

/// What the PGN exporter includes. Every inclusion is an independent switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub include_headers: bool,
    pub include_comments: bool,
    pub include_variations: bool,
    pub include_annotations: bool,
    /// Advisory wrap width for the movetext; `None` keeps it on one line
    pub max_line_length: Option<usize>,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_headers(mut self, include: bool) -> Self {
        self.include_headers = include;
        self
    }

    pub fn with_comments(mut self, include: bool) -> Self {
        self.include_comments = include;
        self
    }

    pub fn with_variations(mut self, include: bool) -> Self {
        self.include_variations = include;
        self
    }

    pub fn with_annotations(mut self, include: bool) -> Self {
        self.include_annotations = include;
        self
    }

    pub fn with_max_line_length(mut self, max: Option<usize>) -> Self {
        self.max_line_length = max.filter(|m| *m > 0);
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_headers: true,
            include_comments: true,
            include_variations: true,
            include_annotations: true,
            max_line_length: None,
        }
    }
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        Self::new()
            .with_headers(config.include_headers)
            .with_comments(config.include_comments)
            .with_variations(config.include_variations)
            .with_annotations(config.include_annotations)
            .with_max_line_length(Some(config.max_line_length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_width_disables_wrapping() {
        let options = ExportOptions::new().with_max_line_length(Some(0));
        assert_eq!(options.max_line_length, None);
    }

    #[test]
    fn test_builder_switches_are_independent() {
        let options = ExportOptions::new().with_comments(false);
        assert!(!options.include_comments);
        assert!(options.include_variations);
        assert!(options.include_annotations);
        assert!(options.include_headers);
    }
}
