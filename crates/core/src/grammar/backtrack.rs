use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::lexer::Lexer;
use super::source::{Marker, SpeculativeBuffer, TokenSource};
use super::token::{Token, TokenKind};
use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::ParseError;

/// The top-level alternative a statement was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statement {
    /// `list EndOfInput`
    List,
    /// `list '=' list EndOfInput`
    Assign,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::List => write!(f, "list"),
            Statement::Assign => write!(f, "assign"),
        }
    }
}

/// Backtracking recursive-descent recognizer for
///
/// ```text
/// statement := list EndOfInput | assign EndOfInput
/// assign    := list '=' list
/// list      := '[' elements ']'
/// elements  := element (',' element)*
/// element   := NAME '=' NAME | NAME | list
/// ```
///
/// `list` and `assign` share an arbitrarily long prefix, so no fixed
/// lookahead can choose between them. The parser instead runs each
/// alternative speculatively over a [`SpeculativeBuffer`], rolls back on
/// failure, and commits to the first one that parses in full.
///
/// Rule methods return `Err` on the first mismatch. Inside
/// [`speculate`](Self::speculate) a syntax error only means "this
/// alternative failed"; lexical and nesting-depth errors always abort the
/// whole parse.
#[derive(Debug)]
pub struct BacktrackingParser {
    input: SpeculativeBuffer,
    furthest: Option<ParseError>,
    nesting: usize,
    max_depth: usize,
}

impl BacktrackingParser {
    /// Create a parser reading from `lexer`.
    pub fn new(lexer: Lexer) -> Self {
        Self {
            input: SpeculativeBuffer::new(lexer),
            furthest: None,
            nesting: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit list nesting to `max_depth` levels.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// `statement := list EndOfInput | assign EndOfInput`
    ///
    /// Alternatives are tried in that order. On failure the error cites the
    /// token at the decision point. The marker stack is empty on return
    /// either way.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        if self.speculate(Self::list_statement)? {
            self.list_statement()?;
            return Ok(Statement::List);
        }
        if self.speculate(Self::assign_statement)? {
            self.assign_statement()?;
            return Ok(Statement::Assign);
        }
        let found = self.input.peek(1)?;
        Err(ParseError::no_viable_alternative(&["list", "assign"], found))
    }

    /// Run `alternative` as a trial: mark, parse, release.
    ///
    /// Returns `Ok(true)` if the alternative parsed, `Ok(false)` if it raised
    /// a syntax error. The cursor is back at the mark in both cases; tokens
    /// lexed during the trial stay buffered for the committed re-run. A
    /// fatal error is returned as `Err` after the marker is released.
    pub fn speculate<T>(
        &mut self,
        alternative: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<bool, ParseError> {
        let marker = self.input.mark();
        let depth = marker.depth();
        debug!("speculate: enter at depth {depth}");
        let outcome = alternative(self);
        self.input.release(marker);
        match outcome {
            Ok(_) => {
                debug!("speculate: depth {depth} succeeded");
                Ok(true)
            }
            Err(err) if !err.is_fatal() => {
                debug!("speculate: depth {depth} failed: {err}");
                self.note_failure(err);
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn note_failure(&mut self, err: ParseError) {
        let further = self
            .furthest
            .as_ref()
            .is_none_or(|prev| err.span().start > prev.span().start);
        if further {
            self.furthest = Some(err);
        }
    }

    /// The failed speculative attempt that got furthest into the input.
    pub fn furthest_failure(&self) -> Option<&ParseError> {
        self.furthest.as_ref()
    }

    /// Push a checkpoint of the current position.
    pub fn mark(&mut self) -> Marker {
        self.input.mark()
    }

    /// Pop `marker` and restore the position it captured.
    pub fn release(&mut self, marker: Marker) {
        self.input.release(marker);
    }

    /// Number of outstanding checkpoints.
    pub fn depth(&self) -> usize {
        self.input.depth()
    }

    /// The token `n` positions ahead, lexing more input as needed.
    pub fn peek(&mut self, n: usize) -> Result<&Token, ParseError> {
        self.input.peek(n)
    }

    /// Consume the current token if it has kind `expected`.
    pub fn match_token(&mut self, expected: TokenKind) -> Result<(), ParseError> {
        let found = self.input.peek(1)?;
        if found.kind != expected {
            return Err(ParseError::expected(expected, found));
        }
        self.input.consume()
    }

    /// `list EndOfInput`
    pub fn list_statement(&mut self) -> Result<(), ParseError> {
        self.list()?;
        self.match_token(TokenKind::EndOfInput)
    }

    /// `assign EndOfInput`
    pub fn assign_statement(&mut self) -> Result<(), ParseError> {
        self.assign()?;
        self.match_token(TokenKind::EndOfInput)
    }

    /// `assign := list '=' list`
    pub fn assign(&mut self) -> Result<(), ParseError> {
        self.list()?;
        self.match_token(TokenKind::Equals)?;
        self.list()
    }

    /// `list := '[' elements ']'`
    ///
    /// Fails with [`ParseError::TooDeep`] instead of opening a list past the
    /// nesting limit.
    pub fn list(&mut self) -> Result<(), ParseError> {
        if self.nesting >= self.max_depth {
            let offset = self.input.peek(1)?.span.start;
            return Err(ParseError::TooDeep {
                limit: self.max_depth,
                offset,
            });
        }
        self.nesting += 1;
        let res = self.list_body();
        self.nesting -= 1;
        res
    }

    fn list_body(&mut self) -> Result<(), ParseError> {
        self.match_token(TokenKind::LeftBracket)?;
        self.elements()?;
        self.match_token(TokenKind::RightBracket)
    }

    /// `elements := element (',' element)*`
    pub fn elements(&mut self) -> Result<(), ParseError> {
        self.element()?;
        while self.input.peek(1)?.is(TokenKind::Comma) {
            self.match_token(TokenKind::Comma)?;
            self.element()?;
        }
        Ok(())
    }

    /// `element := NAME '=' NAME | NAME | list`
    ///
    /// An assignment needs both `peek(1) == NAME` and `peek(2) == '='`; one
    /// token of lookahead cannot tell `a=b` from `a`. A `[` directly before
    /// end of input is never a sublist.
    pub fn element(&mut self) -> Result<(), ParseError> {
        let first = self.input.peek(1)?.kind;
        let second = self.input.peek(2)?.kind;
        match (first, second) {
            (TokenKind::Name, TokenKind::Equals) => {
                self.match_token(TokenKind::Name)?;
                self.match_token(TokenKind::Equals)?;
                self.match_token(TokenKind::Name)
            }
            (TokenKind::Name, _) => self.match_token(TokenKind::Name),
            (TokenKind::LeftBracket, second) if second != TokenKind::EndOfInput => self.list(),
            _ => {
                let found = self.input.peek(1)?;
                Err(ParseError::expected_one_of(
                    &[TokenKind::Name, TokenKind::LeftBracket],
                    found,
                ))
            }
        }
    }
}
