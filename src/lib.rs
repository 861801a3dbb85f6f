//! # Lispscan - A Lexical Scanner for LISP-like Source
//!
//! Lispscan turns raw source text for a parenthesized, LISP-like notation into
//! an ordered stream of typed tokens for a downstream parser.
//!
//! The scanner is purely syntactic. It recognizes lexeme boundaries and hands
//! lexemes over verbatim, delimiters included. Turning `"0x1F"` into a number
//! or unescaping `"a\"b"` is the consumer's job.
//!
//! ## Quick Start
//!
//! Scan on a background thread and pull tokens one at a time:
//!
//! ```rust
//! use lispscan::{lex, TokenKind};
//!
//! let mut stream = lex("example", "(add 1 2)");
//! let mut kinds = Vec::new();
//! while let Some(token) = stream.next_item() {
//!     kinds.push(token.kind);
//! }
//!
//! assert_eq!(kinds.first(), Some(&TokenKind::LeftParen));
//! assert_eq!(kinds.last(), Some(&TokenKind::Eof));
//! ```
//!
//! Or run the scanner inline and get a `Result`:
//!
//! ```rust
//! use lispscan::{tokenize, TokenKind};
//!
//! # fn main() -> lispscan::Result<()> {
//! let tokens = tokenize("(f 1+2i)")?;
//! assert_eq!(tokens[3].kind, TokenKind::Complex);
//! assert_eq!(tokens[3].text, "1+2i");
//! # Ok(())
//! # }
//! ```
//!
//! ## Token Kinds
//!
//! - **Delimiters**: `(` and `)`
//! - **Atoms**: identifiers, numbers (decimal, hex, float, imaginary), complex `a+bi`
//! - **Strings**: `"quoted"` with backslash escapes, `` `raw` `` spanning lines
//! - **Space**: runs of spaces and tabs
//! - **Char**: any other single character
//! - **EOF** / **Error**: exactly one of these ends every scan
//!
//! ## Error Handling
//!
//! Scan failures arrive as a final [`TokenKind::Error`] token. Helpers that
//! return a `Result` convert it into [`Error::Lex`]:
//!
//! ```rust
//! use lispscan::{tokenize, Error};
//!
//! match tokenize("(print \"oops)") {
//!     Err(Error::Lex { message, line, .. }) => {
//!         assert_eq!(message, "unterminated quoted string");
//!         assert_eq!(line, 1);
//!     }
//!     other => panic!("expected a lex error, got {:?}", other),
//! }
//! ```
//!
//! ## Abandoning a Scan
//!
//! A consumer that stops early should call [`TokenStream::drain`], which
//! discards the rest of the stream and waits for the scanning thread.
//! Dropping the stream also releases the thread.

pub mod config;
pub mod error;
pub mod lexer;

pub use config::{ScanConfig, UnrecognizedRune};
pub use error::{Error, Result};
pub use lexer::{lex, lex_with, SExprScanner, Token, TokenKind, TokenStream};

/// Version of the Lispscan crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Type alias for the S-expression scanner.
pub type Scanner<'a> = SExprScanner<'a>;

/// Scans `source` to completion on the current thread. Errors are labelled `input`.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    tokenize_with("input", source, ScanConfig::default())
}

/// Scans `source` to completion on the current thread with an explicit configuration.
/// `name` labels the input in [`Error::Lex`], as it does for [`lex`].
/// The returned tokens end with EOF.
pub fn tokenize_with(name: &str, source: &str, config: ScanConfig) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    for token in SExprScanner::with_config(source, config) {
        if token.kind == TokenKind::Error {
            return Err(Error::from_token(name, &token));
        }
        tokens.push(token);
    }
    Ok(tokens)
}
