//! Lexical analysis for Lispscan
//!
//! Converts source text into a stream of tokens using LISP-style S-expressions.

mod cursor;
mod sexpr_scanner;
mod stream;
mod token;

pub use sexpr_scanner::SExprScanner;
pub use stream::{lex, lex_with, TokenStream};
pub use token::{Token, TokenKind};
