//! Threaded token stream
//!
//! [`lex`] runs an [`SExprScanner`] on its own thread and hands tokens to a
//! single consumer through a rendezvous channel: the producer blocks until
//! the consumer takes each token, so nothing is buffered and a slow consumer
//! stalls the scan.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};

use super::sexpr_scanner::SExprScanner;
use super::token::{Token, TokenKind};
use crate::config::ScanConfig;
use crate::error::{Error, Result};

/// Consumer handle for a scan running on another thread
pub struct TokenStream {
    /// Label of the input; used only for error reports
    name: String,
    items: Receiver<Token>,
    producer: Option<JoinHandle<()>>,
    /// Position of the most recent token returned by `next_item`
    last_pos: usize,
    /// Set once a terminal token has been handed out
    finished: bool,
}

/// Starts scanning `input` with the default configuration
pub fn lex(name: impl Into<String>, input: impl Into<String>) -> TokenStream {
    lex_with(name, input, ScanConfig::default())
}

/// Starts scanning `input` with an explicit configuration
pub fn lex_with(
    name: impl Into<String>,
    input: impl Into<String>,
    config: ScanConfig,
) -> TokenStream {
    let name = name.into();
    let input = input.into();
    tracing::debug!("lex {}: scanning {} bytes", name, input.len());

    let (items, receiver) = bounded(0);
    let label = name.clone();
    let spawned = thread::Builder::new()
        .name(format!("lex-{}", name))
        .spawn(move || run(&label, &input, config, items));

    match spawned {
        Ok(producer) => TokenStream {
            name,
            items: receiver,
            producer: Some(producer),
            last_pos: 0,
            finished: false,
        },
        Err(err) => {
            tracing::warn!("lex {}: failed to spawn scanner thread: {}", name, err);
            failed_stream(name, format!("failed to spawn scanner thread: {}", err))
        }
    }
}

/// A closed stream holding a single error token
fn failed_stream(name: String, message: String) -> TokenStream {
    let (items, receiver) = bounded(1);
    // The slot is empty and the receiver is alive, so this cannot fail.
    let _ = items.try_send(Token::new(TokenKind::Error, 0, message, 1));
    TokenStream {
        name,
        items: receiver,
        producer: None,
        last_pos: 0,
        finished: false,
    }
}

/// Runs the scanner, handing each token over until the terminal one or until
/// the consumer goes away
fn run(name: &str, input: &str, config: ScanConfig, items: Sender<Token>) {
    let mut scanner = SExprScanner::with_config(input, config);
    let mut count = 0usize;
    for token in scanner.by_ref() {
        let failed = token.kind == TokenKind::Error;
        if failed {
            tracing::debug!("lex {}: {} at line {}", name, token.text, token.line);
        }
        if items.send(token).is_err() {
            tracing::debug!("lex {}: consumer went away after {} tokens", name, count);
            return;
        }
        count += 1;
    }
    tracing::debug!(
        "lex {}: done after {} tokens, line {}, paren depth {}",
        name,
        count,
        scanner.line(),
        scanner.paren_depth()
    );
}

impl TokenStream {
    /// Label given to [`lex`]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Byte offset of the most recent token returned
    pub fn last_pos(&self) -> usize {
        self.last_pos
    }

    /// Blocks until the next token is ready. Returns `None` once the scan
    /// has ended and the terminal token was already returned.
    pub fn next_item(&mut self) -> Option<Token> {
        let token = self.items.recv().ok()?;
        Some(self.record(token))
    }

    /// Like [`TokenStream::next_item`], but gives up after `timeout`
    pub fn next_item_timeout(&mut self, timeout: Duration) -> Result<Option<Token>> {
        match self.items.recv_timeout(timeout) {
            Ok(token) => Ok(Some(self.record(token))),
            Err(RecvTimeoutError::Timeout) => Err(Error::Timeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => Ok(None),
        }
    }

    fn record(&mut self, token: Token) -> Token {
        self.last_pos = token.pos;
        self.finished |= token.is_terminal();
        token
    }

    /// Discards the remaining tokens so the scanning thread can exit, then
    /// waits for it. Safe to call any number of times.
    pub fn drain(&mut self) {
        for _ in self.items.iter() {}
        self.finished = true;
        if let Err(err) = self.join() {
            tracing::warn!("lex {}: {}", self.name, err);
        }
    }

    /// Reads the whole stream, turning an error token into [`Error::Lex`].
    /// The returned tokens end with EOF.
    pub fn collect_tokens(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_item() {
            match token.kind {
                TokenKind::Error => {
                    self.drain();
                    return Err(Error::from_token(&self.name, &token));
                }
                TokenKind::Eof => {
                    tokens.push(token);
                    self.drain();
                    return Ok(tokens);
                }
                _ => tokens.push(token),
            }
        }
        // Closed without a terminal token: the producer died.
        self.join()?;
        Err(Error::ProducerPanicked)
    }

    fn join(&mut self) -> Result<()> {
        match self.producer.take() {
            Some(handle) => handle.join().map_err(|_| Error::ProducerPanicked),
            None => Ok(()),
        }
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_item()
    }
}

impl Drop for TokenStream {
    fn drop(&mut self) {
        // Dropping the receiver makes the producer's pending send fail, so the
        // thread exits on its own.
        if !self.finished {
            tracing::debug!("lex {}: stream dropped before end of scan", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_item_in_order() {
        let mut stream = lex("test", "(a)");
        let kinds: Vec<TokenKind> = std::iter::from_fn(|| stream.next_item())
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LeftParen,
                TokenKind::Identifier,
                TokenKind::RightParen,
                TokenKind::Eof
            ]
        );
        assert_eq!(stream.last_pos(), 3);
        assert_eq!(stream.next_item(), None);
    }

    #[test]
    fn test_collect_tokens() {
        let tokens = lex("test", "()").collect_tokens().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::LeftParen, 0, "(", 1),
                Token::new(TokenKind::RightParen, 1, ")", 1),
                Token::new(TokenKind::Eof, 2, "", 1),
            ]
        );
    }

    #[test]
    fn test_collect_tokens_error() {
        let err = lex("quote.lisp", "(\"abc").collect_tokens().unwrap_err();
        match err {
            Error::Lex {
                name,
                line,
                pos,
                message,
            } => {
                assert_eq!(name, "quote.lisp");
                assert_eq!(line, 1);
                assert_eq!(pos, 1);
                assert_eq!(message, "unterminated quoted string");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_drain_joins_producer() {
        let mut stream = lex("test", "(a b c d e f)");
        assert_eq!(stream.next_item().map(|t| t.kind), Some(TokenKind::LeftParen));
        stream.drain();
        assert!(stream.producer.is_none());
        stream.drain();
        assert_eq!(stream.next_item(), None);
    }

    #[test]
    fn test_drain_before_first_token() {
        let mut stream = lex("test", "(a)");
        stream.drain();
        assert!(stream.producer.is_none());
    }

    #[test]
    fn test_next_item_timeout() {
        let mut stream = lex("test", "x");
        let token = stream
            .next_item_timeout(Duration::from_secs(5))
            .unwrap()
            .unwrap();
        assert_eq!(token.kind, TokenKind::Identifier);
        let token = stream
            .next_item_timeout(Duration::from_secs(5))
            .unwrap()
            .unwrap();
        assert_eq!(token.kind, TokenKind::Eof);
        assert!(stream
            .next_item_timeout(Duration::from_secs(5))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_config_reaches_producer() {
        let config = ScanConfig::default().with_emit_space(false);
        let kinds: Vec<TokenKind> = lex_with("test", "a b", config).map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn test_producer_thread_is_named() {
        let mut stream = lex("named.lisp", "(a)");
        let producer = stream.producer.as_ref().unwrap();
        assert_eq!(producer.thread().name(), Some("lex-named.lisp"));
        stream.drain();
    }

    #[test]
    fn test_failed_stream_yields_one_error() {
        let mut stream = failed_stream("broken".to_string(), "no threads".to_string());
        let token = stream.next_item().unwrap();
        assert_eq!(token, Token::new(TokenKind::Error, 0, "no threads", 1));
        assert_eq!(stream.next_item(), None);
        stream.drain();

        let err = failed_stream("broken".to_string(), "no threads".to_string())
            .collect_tokens()
            .unwrap_err();
        assert!(matches!(err, Error::Lex { ref message, .. } if message == "no threads"));
    }
}
