use std::fmt;

use serde::{Deserialize, Serialize};

use super::diag::Span;

/// Classification of a lexer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// End of input. Always the last token, with empty text.
    EndOfInput,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// A run of one or more ASCII letters.
    Name,
    /// `,`
    Comma,
    /// `=`
    Equals,
    /// Guard value; the lexer never produces a token of this kind.
    Invalid,
}

impl TokenKind {
    /// Map a punctuation character to its single-character token kind.
    pub fn from_punct(c: char) -> Option<Self> {
        match c {
            '[' => Some(TokenKind::LeftBracket),
            ']' => Some(TokenKind::RightBracket),
            ',' => Some(TokenKind::Comma),
            '=' => Some(TokenKind::Equals),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::EndOfInput => "end of input",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::Name => "name",
            TokenKind::Comma => "','",
            TokenKind::Equals => "'='",
            TokenKind::Invalid => "<invalid>",
        };
        f.write_str(s)
    }
}

/// A lexed token. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The classification of this token.
    pub kind: TokenKind,
    /// Source text of the token; empty only for [`TokenKind::EndOfInput`].
    pub text: String,
    /// Code-point span of the token in the input.
    pub span: Span,
}

impl Token {
    /// Create a token.
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// The end-of-input token positioned at code-point offset `at`.
    pub fn end_of_input(at: usize) -> Self {
        Self::new(TokenKind::EndOfInput, String::new(), Span::empty(at))
    }

    /// Whether this token has the given kind.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Name => write!(f, "name '{}'", self.text),
            kind => write!(f, "{kind}"),
        }
    }
}
