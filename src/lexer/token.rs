use serde::{Deserialize, Serialize};

/// A single token from the source code
///
/// Tokens are independent copies of the text they span, so a consumer may keep
/// them after the scanner has moved on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Byte offset of the token's first byte in the input
    pub pos: usize,
    /// Original text of the token, or the diagnostic for [`TokenKind::Error`]
    pub text: String,
    /// Line number where the token starts (1-indexed)
    pub line: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, pos: usize, text: impl Into<String>, line: usize) -> Self {
        Token {
            kind,
            pos,
            text: text.into(),
            line,
        }
    }

    /// EOF and error tokens end the stream
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, TokenKind::Eof | TokenKind::Error)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "EOF"),
            TokenKind::Error => write!(f, "{}", self.text),
            _ if self.text.chars().count() > 10 => {
                let head: String = self.text.chars().take(10).collect();
                write!(f, "{:?}...", head)
            }
            _ => write!(f, "{:?}", self.text),
        }
    }
}

/// All possible token types
///
/// `Bool` and `CharConstant` are reserved for the keyword table and are not
/// produced by the current grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Error occurred; text is the diagnostic
    Error,
    /// Boolean constant
    Bool,
    /// Single character outside the grammar; grab bag for commas etc.
    Char,
    /// Character constant
    CharConstant,
    /// Complex constant (1+2i)
    Complex,
    /// End of input
    Eof,
    /// Alphanumeric identifier
    Identifier,
    /// Left parenthesis (
    LeftParen,
    /// Simple number, including imaginary
    Number,
    /// Raw quoted string (includes backticks)
    RawString,
    /// Right parenthesis )
    RightParen,
    /// Run of spaces and tabs
    Space,
    /// Quoted string (includes quotes)
    String,
}

impl TokenKind {
    /// Look up a reserved word. No keywords are defined yet, so every
    /// identifier stays an identifier.
    pub fn keyword(_s: &str) -> Option<TokenKind> {
        None
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            TokenKind::Error => "error",
            TokenKind::Bool => "bool",
            TokenKind::Char => "char",
            TokenKind::CharConstant => "charconst",
            TokenKind::Complex => "complex",
            TokenKind::Eof => "EOF",
            TokenKind::Identifier => "identifier",
            TokenKind::LeftParen => "(",
            TokenKind::Number => "number",
            TokenKind::RawString => "raw string",
            TokenKind::RightParen => ")",
            TokenKind::Space => "space",
            TokenKind::String => "string",
        };
        f.pad(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table_is_empty() {
        assert_eq!(TokenKind::keyword("if"), None);
        assert_eq!(TokenKind::keyword("define"), None);
        assert_eq!(TokenKind::keyword("true"), None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(TokenKind::LeftParen.to_string(), "(");
        assert_eq!(TokenKind::RawString.to_string(), "raw string");
        assert_eq!(TokenKind::CharConstant.to_string(), "charconst");
        assert_eq!(TokenKind::Eof.to_string(), "EOF");
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::new(TokenKind::Eof, 3, "", 1).to_string(), "EOF");
        assert_eq!(
            Token::new(TokenKind::Error, 0, "unterminated quoted string", 1).to_string(),
            "unterminated quoted string"
        );
        assert_eq!(
            Token::new(TokenKind::Identifier, 0, "abc", 1).to_string(),
            "\"abc\""
        );
        assert_eq!(
            Token::new(TokenKind::String, 0, "\"hello, world\"", 1).to_string(),
            "\"\\\"hello, wo\"..."
        );
    }

    #[test]
    fn test_is_terminal() {
        assert!(Token::new(TokenKind::Eof, 0, "", 1).is_terminal());
        assert!(Token::new(TokenKind::Error, 0, "bad", 1).is_terminal());
        assert!(!Token::new(TokenKind::Space, 0, " ", 1).is_terminal());
    }
}
