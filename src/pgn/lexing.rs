//! Lexer
//!
//!     Turns raw movetext (headers already stripped) into a flat token stream. Whitespace only
//!     separates tokens and is never emitted. Nothing here knows about chess legality: a move
//!     token is whatever run of characters is not claimed by a more specific rule, and the
//!     parser decides whether it looks enough like a move to keep.
//!
//! Tokens
//!
//!     - Move numbers: `12.` opens white's half, `12...` opens black's half.
//!     - Moves: SAN-like runs (`Nf3`, `exd5`, `O-O`, `e8=Q+`), suffix glyphs included.
//!     - Comments: `{...}`, nesting aware, or `;` to the end of the line.
//!     - NAGs: `$n`, resolved through the fixed table in [nag].
//!     - Parentheses opening and closing variations.
//!     - Termination markers: `1-0`, `0-1`, `1/2-1/2`, `*`.
//!
//!     Input no rule accepts (a stray `.`, a lone `$`) is collected as unrecognized text with
//!     its span so the parser can report it instead of silently losing it.

pub mod base_tokenization;
pub mod nag;
pub mod tokens;

pub use base_tokenization::{tokenize, Tokenized};
pub use tokens::{MoveNumberMarker, Nag, Token};
