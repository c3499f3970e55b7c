use log::trace;

use super::diag::Span;
use super::token::{Token, TokenKind};
use crate::error::ParseError;

/// Pull-based lexer over a sequence of Unicode scalar values.
///
/// Offsets are code-point indices into the input, never byte offsets. The
/// lexer produces tokens one at a time on demand; once it has produced
/// [`TokenKind::EndOfInput`] (or failed on an unrecognized character) it is
/// exhausted and every further call returns `EndOfInput` again.
#[derive(Debug, Clone)]
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    exhausted: bool,
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

impl Lexer {
    /// Create a lexer positioned at the first character of `input`.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            exhausted: false,
        }
    }

    /// Whether another call to [`next_token`](Self::next_token) can produce
    /// anything other than a repeated `EndOfInput`.
    pub fn has_more(&self) -> bool {
        !self.exhausted
    }

    /// The character under the cursor, `None` past the end.
    fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            self.pos += 1;
        }
    }

    /// Produce the next token.
    ///
    /// Whitespace between tokens is skipped. An unrecognized character is a
    /// [`ParseError::Lexical`], after which the lexer is exhausted.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        if self.exhausted {
            return Ok(Token::end_of_input(self.input.len()));
        }
        while let Some(c) = self.current() {
            if is_whitespace(c) {
                self.advance();
                continue;
            }
            let start = self.pos;
            if let Some(kind) = TokenKind::from_punct(c) {
                self.advance();
                let tok = Token::new(kind, c.to_string(), Span::new(start, self.pos));
                trace!("lexed {:?} at {}", tok.kind, start);
                return Ok(tok);
            }
            if is_letter(c) {
                return Ok(self.name());
            }
            self.exhausted = true;
            trace!("invalid character {c:?} at {start}");
            return Err(ParseError::Lexical {
                character: c,
                offset: start,
            });
        }
        self.exhausted = true;
        trace!("lexed EndOfInput at {}", self.input.len());
        Ok(Token::end_of_input(self.input.len()))
    }

    /// Longest run of ASCII letters starting at the cursor.
    fn name(&mut self) -> Token {
        let start = self.pos;
        while self.current().is_some_and(is_letter) {
            self.advance();
        }
        let text: String = self.input[start..self.pos].iter().collect();
        trace!("lexed Name {text:?} at {start}");
        Token::new(TokenKind::Name, text, Span::new(start, self.pos))
    }
}

/// Yields every token up to and including the single `EndOfInput`, then
/// stops. A lexical error is yielded once and also ends the sequence.
impl Iterator for Lexer {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_more() {
            return None;
        }
        Some(self.next_token())
    }
}

/// Tokenize `input` completely.
///
/// The returned vector always ends with exactly one `EndOfInput` token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(input).collect()
}
