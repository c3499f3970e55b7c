//! Recursive-descent recognizers for a nested, bracketed list grammar.
//!
//! ```text
//! statement := list EndOfInput | assign EndOfInput
//! assign    := list '=' list
//! list      := '[' elements ']'
//! elements  := element (',' element)*
//! element   := NAME '=' NAME | NAME | list
//! ```
//!
//! Three recognizers share one lexer and one lookahead protocol: an LL(1)
//! and an LL(k) [`PredictiveParser`] over a fixed circular buffer, and a
//! [`BacktrackingParser`] that speculates over an unbounded buffer with
//! checkpoint/rollback. The main entry points are [`tokenize`],
//! [`recognize`] and [`check_str`].

#![warn(missing_docs)]

/// One-call recognition entry points.
pub mod check;
/// Parser configuration.
pub mod config;
/// Lexical and syntax error values.
pub mod error;
/// Lexer, token sources, and parsers.
pub mod grammar;

// ── Convenience re-exports ──────────────────────────────────────────────────

pub use check::{CheckResult, check_str, recognize};
pub use config::{ConfigError, DEFAULT_MAX_DEPTH, ParserConfig, Strategy};
pub use error::{Expected, ParseError};
pub use grammar::backtrack::{BacktrackingParser, Statement};
pub use grammar::diag::{Diagnostic, Severity, Span, codes};
pub use grammar::lexer::{Lexer, tokenize};
pub use grammar::predictive::PredictiveParser;
pub use grammar::source::{Marker, RingBuffer, SpeculativeBuffer, TokenSource};
pub use grammar::token::{Token, TokenKind};
