//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. Every code listed here has an [`explain`](crate::explain)
//! entry.

/// An input character does not belong to any token's alphabet.
pub const LEX_INVALID_CHARACTER: &str = "NL1001";

/// A token of unexpected kind appeared where another kind was required.
pub const SYNTAX_UNEXPECTED_TOKEN: &str = "NL2001";

/// No top-level statement alternative recognized the input.
pub const SYNTAX_NO_VIABLE_ALTERNATIVE: &str = "NL2002";

/// The furthest point a failed speculative alternative reached.
pub const SYNTAX_FURTHEST_FAILURE: &str = "NL2003";

/// Lists nested deeper than the configured limit.
pub const NESTING_TOO_DEEP: &str = "NL3001";

/// All known codes, in ID order.
pub const ALL: &[&str] = &[
    LEX_INVALID_CHARACTER,
    SYNTAX_UNEXPECTED_TOKEN,
    SYNTAX_NO_VIABLE_ALTERNATIVE,
    SYNTAX_FURTHEST_FAILURE,
    NESTING_TOO_DEEP,
];
