//! Error types for Lispscan

use thiserror::Error;

use crate::lexer::{Token, TokenKind};

/// Lispscan errors
///
/// The scanner itself never returns these: scan failures travel through the
/// token stream as [`TokenKind::Error`] tokens. These variants appear when a
/// consumer asks for a `Result`, e.g. via [`crate::tokenize`] or
/// [`crate::TokenStream::collect_tokens`].
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Scan failure reported by an error token
    ///
    /// **Triggered by:** Malformed numbers, unterminated strings, unterminated raw strings,
    /// and (when enabled) unbalanced parentheses or unrecognized characters
    /// **Example:** `"abc` (missing closing quote)
    #[error("{name}:{line}: {message} (at byte {pos})")]
    Lex {
        /// Label of the scanned input
        name: String,
        /// Line number where the error was detected (1-indexed)
        line: usize,
        /// Byte offset of the failing token
        pos: usize,
        /// Diagnostic carried by the error token
        message: String,
    },

    /// Invalid scanner configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Waiting for the next token timed out
    #[error("Timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// The scanning thread died without closing the stream
    #[error("Scanner thread panicked")]
    ProducerPanicked,
}

impl Error {
    /// Build a [`Error::Lex`] from an error token
    pub fn from_token(name: impl Into<String>, token: &Token) -> Self {
        debug_assert_eq!(token.kind, TokenKind::Error);
        Error::Lex {
            name: name.into(),
            line: token.line,
            pos: token.pos,
            message: token.text.clone(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// Result type for Lispscan operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_message() {
        let token = Token::new(TokenKind::Error, 4, "unterminated quoted string", 2);
        let err = Error::from_token("input.lisp", &token);
        assert_eq!(
            err.to_string(),
            "input.lisp:2: unterminated quoted string (at byte 4)"
        );
    }

    #[test]
    fn test_config_error_from_json() {
        let err: Error = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(matches!(err, Error::Config(_)));
    }
}
