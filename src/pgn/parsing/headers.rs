//! Tag pair section
//!
//! Splits the `[Key "Value"]` lines at the top of a game from its movetext. Tag values use
//! backslash escapes for `"` and `\`.

use super::diagnostics::ParseWarning;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static TAG_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\[\s*([A-Za-z0-9_]+)\s+"((?:[^"\\]|\\.)*)"\s*\]$"#)
        .expect("tag pair pattern is a valid regex")
});

/// The header section of a game and where its movetext begins.
#[derive(Debug, Default)]
pub struct HeaderSection<'a> {
    pub headers: BTreeMap<String, String>,
    pub movetext: &'a str,
    /// Byte offset of `movetext` inside the original text
    pub movetext_offset: usize,
    pub warnings: Vec<ParseWarning>,
}

pub fn split_headers(text: &str) -> HeaderSection<'_> {
    let mut section = HeaderSection::default();
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('[') {
            break;
        }
        offset += line.len();
        if trimmed.is_empty() {
            continue;
        }
        match TAG_PAIR.captures(trimmed) {
            Some(caps) => {
                section
                    .headers
                    .insert(caps[1].to_string(), unescape(&caps[2]));
            }
            None => section.warnings.push(ParseWarning::MalformedHeader {
                line: trimmed.to_string(),
            }),
        }
    }

    section.movetext = &text[offset..];
    section.movetext_offset = offset;
    section
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Escape a tag value for output
pub fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_headers_from_movetext() {
        let text = "[Event \"Casual\"]\n[White \"Anderssen\"]\n\n1. e4 e5 *\n";
        let section = split_headers(text);
        assert_eq!(section.headers.len(), 2);
        assert_eq!(section.headers["White"], "Anderssen");
        assert_eq!(section.movetext, "1. e4 e5 *\n");
        assert_eq!(&text[section.movetext_offset..], section.movetext);
    }

    #[test]
    fn test_no_headers() {
        let section = split_headers("1. d4 *");
        assert!(section.headers.is_empty());
        assert_eq!(section.movetext, "1. d4 *");
    }

    #[test]
    fn test_escaped_values_round_trip() {
        let raw = r#"say "hi" \ bye"#;
        let text = format!("[Annotator \"{}\"]\n1. e4", escape(raw));
        let section = split_headers(&text);
        assert_eq!(section.headers["Annotator"], raw);
    }

    #[test]
    fn test_malformed_header_is_a_warning() {
        let section = split_headers("[Broken]\n1. e4");
        assert!(section.headers.is_empty());
        assert_eq!(
            section.warnings,
            vec![ParseWarning::MalformedHeader {
                line: "[Broken]".to_string()
            }]
        );
        assert_eq!(section.movetext, "1. e4");
    }
}
