//! Base tokenization
//!
//! Runs the logos lexer over a movetext string and keeps every token's byte span. Input that
//! no token rule accepts is collected separately; adjacent rejected bytes are merged into one
//! fragment so `...` on its own is reported once, not three times.

use super::tokens::Token;
use logos::Logos;

/// Lexer output: the token stream plus whatever could not be tokenized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tokenized {
    pub tokens: Vec<(Token, logos::Span)>,
    pub unrecognized: Vec<(String, logos::Span)>,
}

impl Tokenized {
    /// Tokens without their spans
    pub fn kinds(&self) -> Vec<Token> {
        self.tokens.iter().map(|(t, _)| t.clone()).collect()
    }
}

/// Tokenize movetext with location information
pub fn tokenize(source: &str) -> Tokenized {
    let mut lexer = Token::lexer(source);
    let mut output = Tokenized::default();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => output.tokens.push((token, span)),
            Err(()) => match output.unrecognized.last_mut() {
                Some((text, last)) if last.end == span.start => {
                    text.push_str(lexer.slice());
                    last.end = span.end;
                }
                _ => output
                    .unrecognized
                    .push((lexer.slice().to_string(), span)),
            },
        }
    }

    tracing::trace!(
        tokens = output.tokens.len(),
        unrecognized = output.unrecognized.len(),
        "tokenized movetext"
    );
    output
}
