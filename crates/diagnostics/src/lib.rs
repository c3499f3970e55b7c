//! Diagnostics for the nestlist recognizers.
//!
//! Provides [`Diagnostic`], [`Severity`] and [`Span`] types used to report
//! lexical and syntax failures from the lexer and parsers. Diagnostic codes
//! are defined in the [`codes`] module.

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Hard error: the input is not recognized.
    Error,
    /// Informational note attached to another diagnostic.
    Info,
}

/// Half-open span in the source input.
///
/// Offsets count Unicode scalar values (code points), not bytes, so a span
/// over `"é,a"` that covers the `a` is `2..3`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Span {
    /// Code-point offset of the first character (0-based).
    pub start: usize,
    /// Code-point offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Create a zero-width span at the given position.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Number of code points covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A diagnostic message produced by the lexer or a parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"NL2001"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Optional span in the source input that this diagnostic relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Machine-readable context for tooling. Keys and values are free-form strings.
    /// Serialized only when present.
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Error, message, span)
    }

    /// Shorthand for an `Info` diagnostic.
    pub fn info(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Info, message, span)
    }

    /// Attach machine-readable context metadata (builder pattern).
    ///
    /// Keys are short descriptors like `"expected"`, `"found"` or
    /// `"character"`.
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Whether this diagnostic has `Error` severity.
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Returns the human-readable explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    match id {
        codes::LEX_INVALID_CHARACTER => Some(
            "The input contains a character outside the token alphabet. Only ASCII \
             letters, '[', ']', ',', '=' and whitespace (space, tab, CR, LF) are \
             allowed. Lexical errors abort the parse; no other grammar alternative \
             is tried.",
        ),
        codes::SYNTAX_UNEXPECTED_TOKEN => Some(
            "A token of one kind was found where the grammar requires another, \
             for example a ',' followed directly by ']' in \"[a, ]\", or a missing \
             closing bracket.",
        ),
        codes::SYNTAX_NO_VIABLE_ALTERNATIVE => Some(
            "Neither statement alternative matched: the input is not a single \
             bracketed list (\"[a,b]\") nor a parallel assignment of two lists \
             (\"[a,b]=[c,d]\"), each followed by end of input.",
        ),
        codes::NESTING_TOO_DEEP => Some(
            "Lists are nested deeper than the configured maximum depth. The \
             parsers recurse once per nesting level, so the limit keeps hostile \
             input from exhausting the stack. Raise it with --max-depth if the \
             input is legitimate.",
        ),
        codes::SYNTAX_FURTHEST_FAILURE => Some(
            "The deepest point any speculative alternative reached before failing. \
             It usually marks the real mistake when the statement as a whole has \
             no viable alternative.",
        ),
        _ => None,
    }
}
