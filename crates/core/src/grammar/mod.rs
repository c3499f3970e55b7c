/// Backtracking parser: speculative recognition with checkpoint/rollback.
pub mod backtrack;
/// Re-exports from the diagnostics crate.
pub mod diag;
/// Lexer: turns input characters into a lazy stream of tokens.
pub mod lexer;
/// LL(1) / LL(k) predictive parser: the non-backtracking baseline.
pub mod predictive;
/// Token sources: bounded circular and unbounded speculative lookahead buffers.
pub mod source;
/// Token and token kind types.
pub mod token;
