use super::token::{Token, TokenKind};

/// Byte-addressed reader over the scanner input
///
/// Tracks the current offset, the start of the token in progress, and the line
/// number. Remembers the width of the last rune read so exactly one `next`
/// can be undone with `backup`.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    /// The string being scanned
    input: &'a str,
    /// Current position in the input
    pos: usize,
    /// Start position of the token in progress
    start: usize,
    /// Width in bytes of the last rune read
    width: usize,
    /// Set by `backup`, cleared by `next`
    backed_up: bool,
    /// 1 + number of newlines consumed
    line: usize,
    /// Line of the byte at `start`
    start_line: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor {
            input,
            pos: 0,
            start: 0,
            width: 0,
            backed_up: false,
            line: 1,
            start_line: 1,
        }
    }

    /// Consumes and returns the next rune, or `None` at end of input
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<char> {
        self.backed_up = false;
        let Some(c) = self.input[self.pos..].chars().next() else {
            self.width = 0;
            return None;
        };
        self.width = c.len_utf8();
        self.pos += self.width;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Returns but does not consume the next rune
    pub fn peek(&mut self) -> Option<char> {
        let c = self.next();
        self.backup();
        c
    }

    /// Steps back one rune. Can only be called once per call of `next`.
    pub fn backup(&mut self) {
        debug_assert!(!self.backed_up, "backup called twice without next");
        if self.backed_up {
            return;
        }
        self.backed_up = true;
        self.pos -= self.width;
        if self.width == 1 && self.input.as_bytes()[self.pos] == b'\n' {
            self.line -= 1;
        }
    }

    /// Consumes the next rune if it's from the valid set
    pub fn accept(&mut self, valid: &str) -> bool {
        match self.next() {
            Some(c) if valid.contains(c) => true,
            _ => {
                self.backup();
                false
            }
        }
    }

    /// Consumes a run of runes from the valid set
    pub fn accept_run(&mut self, valid: &str) {
        while matches!(self.next(), Some(c) if valid.contains(c)) {}
        self.backup();
    }

    /// Consumes runes while `pred` holds
    pub fn accept_while(&mut self, pred: impl Fn(char) -> bool) {
        while matches!(self.next(), Some(c) if pred(c)) {}
        self.backup();
    }

    /// Produces a token spanning the pending input and starts the next one
    pub fn emit(&mut self, kind: TokenKind) -> Token {
        let token = Token::new(kind, self.start, self.pending(), self.start_line);
        self.ignore();
        token
    }

    /// Skips over the pending input before this point
    pub fn ignore(&mut self) {
        self.start = self.pos;
        self.start_line = self.line;
    }

    /// Moves the cursor back to the token start, un-reading the pending input
    pub fn reset(&mut self) {
        self.pos = self.start;
        self.line = self.start_line;
        self.width = 0;
        self.backed_up = false;
    }

    /// Produces an error token at the start of the pending input
    pub fn error(&self, message: impl Into<String>) -> Token {
        Token::new(TokenKind::Error, self.start, message, self.line)
    }

    /// Text between the token start and the cursor
    pub fn pending(&self) -> &'a str {
        &self.input[self.start..self.pos]
    }

    /// The byte just before the cursor, if any
    pub fn last_byte(&self) -> Option<u8> {
        self.pos
            .checked_sub(1)
            .map(|i| self.input.as_bytes()[i])
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Overwrites the current line; used to point a diagnostic at an earlier line
    pub fn set_line(&mut self, line: usize) {
        self.line = line;
    }

    pub fn start_line(&self) -> usize {
        self.start_line
    }
}
