use unicode_general_category::{get_general_category, GeneralCategory};

use super::cursor::Cursor;
use super::token::{Token, TokenKind};
use crate::config::{ScanConfig, UnrecognizedRune};

const DECIMAL_DIGITS: &str = "0123456789";
const HEX_DIGITS: &str = "0123456789abcdefABCDEF";

/// Scanner states; each one performs a unit of recognition work and names the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Number,
    Quote,
    RawQuote,
    Identifier,
    Space,
    Done,
}

/// Scanner for S-expression (LISP-style) syntax
///
/// Pull-based: every call to [`Iterator::next`] runs the state machine until
/// one token is produced. The sequence always ends with exactly one EOF or
/// error token, after which the iterator is exhausted.
pub struct SExprScanner<'a> {
    cursor: Cursor<'a>,
    config: ScanConfig,
    state: State,
    /// Token produced by the last state, waiting to be handed out
    item: Option<Token>,
    /// Nesting depth of ( ) exprs
    paren_depth: isize,
}

impl<'a> SExprScanner<'a> {
    /// Creates a new S-expression scanner with the default configuration
    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, ScanConfig::default())
    }

    /// Creates a new S-expression scanner with an explicit configuration
    pub fn with_config(source: &'a str, config: ScanConfig) -> Self {
        SExprScanner {
            cursor: Cursor::new(source),
            config,
            state: State::Start,
            item: None,
            paren_depth: 0,
        }
    }

    /// Current nesting depth; negative after unmatched right parens
    pub fn paren_depth(&self) -> isize {
        self.paren_depth
    }

    /// Current byte offset in the input
    pub fn pos(&self) -> usize {
        self.cursor.pos()
    }

    /// Current line number (1-indexed)
    pub fn line(&self) -> usize {
        self.cursor.line()
    }

    /// True once the terminal token has been produced
    pub fn is_done(&self) -> bool {
        self.state == State::Done && self.item.is_none()
    }

    fn step(&mut self) -> State {
        match self.state {
            State::Start => self.lex_start(),
            State::Number => self.lex_number(),
            State::Quote => self.lex_quote(),
            State::RawQuote => self.lex_raw_quote(),
            State::Identifier => self.lex_identifier(),
            State::Space => self.lex_space(),
            State::Done => State::Done,
        }
    }

    fn emit(&mut self, kind: TokenKind) {
        self.item = Some(self.cursor.emit(kind));
    }

    /// Produces an error token and terminates the scan
    fn errorf(&mut self, message: impl Into<String>) -> State {
        self.item = Some(self.cursor.error(message));
        State::Done
    }

    fn lex_start(&mut self) -> State {
        let Some(c) = self.cursor.next() else {
            if self.config.check_parens && self.paren_depth > 0 {
                return self.errorf("unclosed left paren");
            }
            self.emit(TokenKind::Eof);
            return State::Done;
        };
        match c {
            '(' => {
                self.emit(TokenKind::LeftParen);
                self.paren_depth += 1;
                State::Start
            }
            ')' => {
                if self.config.check_parens && self.paren_depth <= 0 {
                    return self.errorf("unexpected right paren");
                }
                self.emit(TokenKind::RightParen);
                self.paren_depth -= 1;
                State::Start
            }
            '"' => State::Quote,
            '`' => State::RawQuote,
            c if is_space(c) => State::Space,
            c if c.is_ascii_digit() => {
                self.cursor.reset();
                State::Number
            }
            '+' | '-' => {
                if matches!(self.cursor.peek(), Some(d) if d.is_ascii_digit()) {
                    self.cursor.reset();
                    State::Number
                } else {
                    self.lex_unrecognized(c)
                }
            }
            c if c == '_' || is_letter(c) => State::Identifier,
            c => self.lex_unrecognized(c),
        }
    }

    fn lex_unrecognized(&mut self, c: char) -> State {
        match self.config.unrecognized {
            UnrecognizedRune::Char => {
                self.emit(TokenKind::Char);
                State::Start
            }
            UnrecognizedRune::Error => self.errorf(format!("unrecognized character: {:?}", c)),
        }
    }

    /// Scans a run of space characters. One space has already been seen.
    fn lex_space(&mut self) -> State {
        self.cursor.accept_while(is_space);
        if self.config.emit_space {
            self.emit(TokenKind::Space);
        } else {
            self.cursor.ignore();
        }
        State::Start
    }

    /// Scans an alphanumeric. The leading letter has already been seen.
    fn lex_identifier(&mut self) -> State {
        self.cursor.accept_while(is_alpha_numeric);
        let kind = TokenKind::keyword(self.cursor.pending()).unwrap_or(TokenKind::Identifier);
        self.emit(kind);
        State::Start
    }

    /// Scans a number: decimal, hex, float, or imaginary, optionally forming a
    /// complex `a+bi`. This isn't a perfect number scanner - it accepts "."
    /// and "0x0.2" and "089" - but when it's wrong the input is invalid and
    /// the consumer's numeric parser will notice.
    fn lex_number(&mut self) -> State {
        if !self.scan_number() {
            return self.bad_number();
        }
        if matches!(self.cursor.peek(), Some('+' | '-')) {
            // Complex: 1+2i. No spaces, must end in 'i'.
            if !self.scan_number() || self.cursor.last_byte() != Some(b'i') {
                return self.bad_number();
            }
            self.emit(TokenKind::Complex);
        } else {
            self.emit(TokenKind::Number);
        }
        State::Start
    }

    fn bad_number(&mut self) -> State {
        let text = self.cursor.pending();
        self.errorf(format!("bad number syntax: {:?}", text))
    }

    fn scan_number(&mut self) -> bool {
        self.cursor.accept("+-");
        let mut digits = DECIMAL_DIGITS;
        if self.cursor.accept("0") && self.cursor.accept("xX") {
            digits = HEX_DIGITS;
        }
        self.cursor.accept_run(digits);
        if self.cursor.accept(".") {
            self.cursor.accept_run(digits);
        }
        if self.cursor.accept("eE") {
            self.cursor.accept("+-");
            self.cursor.accept_run(DECIMAL_DIGITS);
        }
        self.cursor.accept("i");
        // Next thing mustn't be alphanumeric.
        if matches!(self.cursor.peek(), Some(c) if is_alpha_numeric(c)) {
            self.cursor.next();
            return false;
        }
        true
    }

    /// Scans a quoted string. The opening quote has already been seen.
    fn lex_quote(&mut self) -> State {
        loop {
            match self.cursor.next() {
                Some('\\') => {
                    if matches!(self.cursor.next(), None | Some('\n')) {
                        return self.errorf("unterminated quoted string");
                    }
                }
                None | Some('\n') => return self.errorf("unterminated quoted string"),
                Some('"') => break,
                Some(_) => {}
            }
        }
        self.emit(TokenKind::String);
        State::Start
    }

    /// Scans a raw quoted string. The opening backtick has already been seen.
    fn lex_raw_quote(&mut self) -> State {
        let start_line = self.cursor.start_line();
        loop {
            match self.cursor.next() {
                None => {
                    // Point the diagnostic at the opening backtick.
                    self.cursor.set_line(start_line);
                    return self.errorf("unterminated raw quoted string");
                }
                Some('`') => break,
                Some(_) => {}
            }
        }
        self.emit(TokenKind::RawString);
        State::Start
    }
}

impl Iterator for SExprScanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while self.item.is_none() && self.state != State::Done {
            self.state = self.step();
        }
        let token = self.item.take()?;
        tracing::trace!("emit {} {:?} at {}:{}", token.kind, token.text, token.line, token.pos);
        Some(token)
    }
}

impl std::iter::FusedIterator for SExprScanner<'_> {}

/// Reports whether `c` is a space character
fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Reports whether `c` is a letter (general category L)
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Reports whether `c` is a decimal digit (general category Nd)
fn is_digit(c: char) -> bool {
    get_general_category(c) == GeneralCategory::DecimalNumber
}

/// Reports whether `c` is a letter, a decimal digit, or underscore
fn is_alpha_numeric(c: char) -> bool {
    c == '_' || is_letter(c) || is_digit(c)
}
