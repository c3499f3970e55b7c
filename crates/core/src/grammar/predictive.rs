use log::debug;

use super::lexer::Lexer;
use super::source::{RingBuffer, TokenSource};
use super::token::{Token, TokenKind};
use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::ParseError;

/// LL(1) / LL(k) recursive-descent recognizer for
///
/// ```text
/// list     := '[' elements ']'
/// elements := element (',' element)*
/// element  := NAME '=' NAME | NAME | list     (k >= 2)
/// element  := NAME | list                     (k = 1)
/// ```
///
/// Every alternative is chosen from at most `k` tokens of lookahead; nothing
/// is ever retried. A syntax failure does not stop the parse: it is recorded
/// and parsing continues best-effort, and only the most recently recorded
/// syntax failure is kept. A lexical or nesting-depth failure is kept apart,
/// ends the parse, and takes precedence in [`finish`](Self::finish).
#[derive(Debug)]
pub struct PredictiveParser<S = RingBuffer> {
    input: S,
    k: usize,
    error: Option<ParseError>,
    fatal: Option<ParseError>,
    nesting: usize,
    max_depth: usize,
}

impl PredictiveParser<RingBuffer> {
    /// LL(k) parser over a `k`-slot circular buffer.
    ///
    /// Panics if `k` is zero.
    pub fn new(lexer: Lexer, k: usize) -> Self {
        Self::with_source(RingBuffer::new(lexer, k), k)
    }
}

impl<S: TokenSource> PredictiveParser<S> {
    /// Run over any token source that can look at least `k` tokens ahead.
    ///
    /// Panics if `k` is zero or larger than the source's capacity.
    pub fn with_source(input: S, k: usize) -> Self {
        assert!(k >= 1, "predictive parser needs at least one token of lookahead");
        if let Some(cap) = input.capacity() {
            assert!(k <= cap, "lookahead {k} exceeds source capacity {cap}");
        }
        Self {
            input,
            k,
            error: None,
            fatal: None,
            nesting: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit list nesting to `max_depth` levels.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Lookahead width.
    pub fn lookahead(&self) -> usize {
        self.k
    }

    /// The fatal failure if there was one, otherwise the most recently
    /// recorded syntax failure.
    pub fn last_error(&self) -> Option<&ParseError> {
        self.fatal.as_ref().or(self.error.as_ref())
    }

    /// Recognize `list EndOfInput` and report the last recorded failure.
    pub fn recognize(mut self) -> Result<(), ParseError> {
        self.list();
        self.match_token(TokenKind::EndOfInput);
        self.finish()
    }

    /// Consume the parser, returning the fatal failure or else the last
    /// recorded syntax failure.
    pub fn finish(self) -> Result<(), ParseError> {
        match self.fatal.or(self.error) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn record(&mut self, err: ParseError) {
        if err.is_fatal() {
            debug!("predictive: stopping on {err}");
            if self.fatal.is_none() {
                self.fatal = Some(err);
            }
        } else if self.fatal.is_none() {
            debug!("predictive: recorded {err}");
            self.error = Some(err);
        }
    }

    fn stopped(&self) -> bool {
        self.fatal.is_some()
    }

    /// The token `n` ahead. Once a lexical failure has been recorded, or the
    /// parse has otherwise stopped, this reports end of input.
    pub fn peek(&mut self, n: usize) -> Token {
        if let Some(fatal) = &self.fatal {
            return Token::end_of_input(fatal.span().start);
        }
        match self.input.peek(n) {
            Ok(tok) => tok.clone(),
            Err(err) => {
                let at = err.span().start;
                self.record(err);
                Token::end_of_input(at)
            }
        }
    }

    fn la(&mut self, n: usize) -> TokenKind {
        self.peek(n).kind
    }

    /// Consume the current token if it has kind `expected`, otherwise
    /// record a syntax error and leave the input where it is.
    pub fn match_token(&mut self, expected: TokenKind) {
        let tok = self.peek(1);
        if self.stopped() {
            return;
        }
        if tok.kind == expected {
            if let Err(err) = self.input.consume() {
                self.record(err);
            }
        } else {
            self.record(ParseError::expected(expected, &tok));
        }
    }

    /// `list := '[' elements ']'`
    pub fn list(&mut self) {
        if self.nesting >= self.max_depth {
            let offset = self.peek(1).span.start;
            self.record(ParseError::TooDeep {
                limit: self.max_depth,
                offset,
            });
            return;
        }
        self.nesting += 1;
        self.match_token(TokenKind::LeftBracket);
        self.elements();
        self.match_token(TokenKind::RightBracket);
        self.nesting -= 1;
    }

    /// `elements := element (',' element)*`
    fn elements(&mut self) {
        self.element();
        while self.la(1) == TokenKind::Comma {
            self.match_token(TokenKind::Comma);
            self.element();
        }
    }

    /// `element := NAME '=' NAME | NAME | list`
    ///
    /// Telling `a=b` from a bare `a` takes two tokens; with `k = 1` the
    /// assignment branch is unreachable and the `=` is left for the caller to
    /// trip over.
    fn element(&mut self) {
        let first = self.la(1);
        if self.k >= 2 && first == TokenKind::Name && self.la(2) == TokenKind::Equals {
            self.match_token(TokenKind::Name);
            self.match_token(TokenKind::Equals);
            self.match_token(TokenKind::Name);
        } else if first == TokenKind::Name {
            self.match_token(TokenKind::Name);
        } else if first == TokenKind::LeftBracket {
            self.list();
        } else if !self.stopped() {
            let found = self.peek(1);
            self.record(ParseError::expected_one_of(
                &[TokenKind::Name, TokenKind::LeftBracket],
                &found,
            ));
        }
    }
}
