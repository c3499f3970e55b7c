//! Typed error values for the lexer and parsers.

use std::fmt;

use crate::grammar::diag::{Diagnostic, Span, codes};
use crate::grammar::token::{Token, TokenKind};

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        std::collections::BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// A lexical or syntax failure. Constructed at the failure site; carries no
/// mutable state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A character outside every token's alphabet.
    #[error("unexpected character {character:?} at offset {offset}")]
    Lexical {
        /// The offending character.
        character: char,
        /// Code-point offset of the character in the input.
        offset: usize,
    },

    /// A token of unexpected kind at a decision point.
    #[error("expected {expected}, found {found} at offset {}", .found.span.start)]
    Syntax {
        /// What the grammar required at this point.
        expected: Expected,
        /// The lookahead token actually present.
        found: Token,
    },

    /// A list opened more levels deep than the configured limit allows.
    #[error("lists nested deeper than {limit} levels at offset {offset}")]
    TooDeep {
        /// The configured maximum nesting depth.
        limit: usize,
        /// Code-point offset of the `[` that went past the limit.
        offset: usize,
    },
}

impl ParseError {
    /// A syntax error expecting a single token kind.
    pub fn expected(kind: TokenKind, found: &Token) -> Self {
        ParseError::Syntax {
            expected: Expected::Kinds(vec![kind]),
            found: found.clone(),
        }
    }

    /// A syntax error expecting any of several token kinds.
    pub fn expected_one_of(kinds: &[TokenKind], found: &Token) -> Self {
        ParseError::Syntax {
            expected: Expected::Kinds(kinds.to_vec()),
            found: found.clone(),
        }
    }

    /// A syntax error raised after every named alternative failed.
    pub fn no_viable_alternative(alternatives: &[&'static str], found: &Token) -> Self {
        ParseError::Syntax {
            expected: Expected::Alternatives(alternatives.to_vec()),
            found: found.clone(),
        }
    }

    /// Whether this is a lexical error.
    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::Lexical { .. })
    }

    /// Whether this error ends the parse outright. Only syntax errors can be
    /// recovered from by trying another alternative.
    pub fn is_fatal(&self) -> bool {
        !self.is_syntax()
    }

    /// Whether this is a syntax error.
    pub fn is_syntax(&self) -> bool {
        matches!(self, ParseError::Syntax { .. })
    }

    /// Code-point span the error points at.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lexical { offset, .. } | ParseError::TooDeep { offset, .. } => {
                Span::new(*offset, offset + 1)
            }
            ParseError::Syntax { found, .. } => found.span,
        }
    }

    /// Convert to a [`Diagnostic`] with a stable code and machine-readable context.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let span = Some(self.span());
        match self {
            ParseError::Lexical { character, .. } => {
                Diagnostic::error(codes::LEX_INVALID_CHARACTER, self.to_string(), span)
                    .with_context(ctx!("character" => character.to_string()))
            }
            ParseError::Syntax { expected, found } => {
                let code = match expected {
                    Expected::Kinds(_) => codes::SYNTAX_UNEXPECTED_TOKEN,
                    Expected::Alternatives(_) => codes::SYNTAX_NO_VIABLE_ALTERNATIVE,
                };
                Diagnostic::error(code, self.to_string(), span)
                    .with_context(ctx!("expected" => expected.to_string(), "found" => found.to_string()))
            }
            ParseError::TooDeep { limit, .. } => {
                Diagnostic::error(codes::NESTING_TOO_DEEP, self.to_string(), span)
                    .with_context(ctx!("limit" => limit.to_string()))
            }
        }
    }
}

/// What a syntax error expected to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// One of these token kinds.
    Kinds(Vec<TokenKind>),
    /// One of these named grammar alternatives, all of which failed.
    Alternatives(Vec<&'static str>),
}

impl Expected {
    /// The expected token kinds, if this names kinds rather than alternatives.
    pub fn kinds(&self) -> &[TokenKind] {
        match self {
            Expected::Kinds(kinds) => kinds,
            Expected::Alternatives(_) => &[],
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Kinds(kinds) => {
                let names: Vec<String> = kinds.iter().map(ToString::to_string).collect();
                f.write_str(&join_or(&names))
            }
            Expected::Alternatives(alts) => {
                let names: Vec<String> = alts.iter().map(|a| (*a).to_string()).collect();
                write!(f, "{}", join_or(&names))
            }
        }
    }
}

/// `a`, `a or b`, `a, b or c`.
fn join_or(items: &[String]) -> String {
    match items {
        [] => String::from("nothing"),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}
