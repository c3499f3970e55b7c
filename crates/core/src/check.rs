//! One-call entry points that run the configured recognizer over a string.

use log::debug;
use serde::Serialize;

use crate::config::{ParserConfig, Strategy};
use crate::error::ParseError;
use crate::grammar::backtrack::{BacktrackingParser, Statement};
use crate::grammar::diag::{Diagnostic, codes};
use crate::grammar::lexer::Lexer;
use crate::grammar::predictive::PredictiveParser;
use crate::grammar::token::Token;

/// Outcome of [`check_str`].
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// The recognized statement, `None` on failure.
    pub statement: Option<Statement>,
    /// Every token lexed before end of input or the first lexical error.
    pub tokens: Vec<Token>,
    /// The failure, plus for the backtracking strategy a note on the
    /// furthest failed attempt. Empty on success.
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckResult {
    /// Whether the input was recognized.
    pub fn ok(&self) -> bool {
        self.statement.is_some()
    }
}

/// Recognize `input` with the configured strategy.
///
/// The predictive strategy recognizes `list EndOfInput` only and reports it
/// as [`Statement::List`].
///
/// Panics if the configuration fails [`ParserConfig::validate`].
pub fn recognize(input: &str, config: &ParserConfig) -> Result<Statement, ParseError> {
    let lexer = Lexer::new(input);
    match config.strategy {
        Strategy::Predictive => PredictiveParser::new(lexer, config.lookahead)
            .with_max_depth(config.max_depth)
            .recognize()
            .map(|()| Statement::List),
        Strategy::Backtracking => BacktrackingParser::new(lexer)
            .with_max_depth(config.max_depth)
            .parse_statement(),
    }
}

/// Recognize `input` and collect tokens and diagnostics for tooling.
///
/// Panics if the configuration fails [`ParserConfig::validate`].
pub fn check_str(input: &str, config: &ParserConfig) -> CheckResult {
    debug!(
        "check: {} chars with {} strategy",
        input.chars().count(),
        config.strategy
    );
    let tokens: Vec<Token> = Lexer::new(input).map_while(Result::ok).collect();
    let mut diagnostics = Vec::new();

    let lexer = Lexer::new(input);
    let statement = match config.strategy {
        Strategy::Predictive => {
            let parser =
                PredictiveParser::new(lexer, config.lookahead).with_max_depth(config.max_depth);
            match parser.recognize() {
                Ok(()) => Some(Statement::List),
                Err(err) => {
                    diagnostics.push(err.to_diagnostic());
                    None
                }
            }
        }
        Strategy::Backtracking => {
            let mut parser = BacktrackingParser::new(lexer).with_max_depth(config.max_depth);
            match parser.parse_statement() {
                Ok(statement) => Some(statement),
                Err(err) => {
                    diagnostics.push(err.to_diagnostic());
                    if err.is_syntax()
                        && let Some(furthest) = parser.furthest_failure()
                        && furthest != &err
                    {
                        diagnostics.push(furthest_note(furthest));
                    }
                    None
                }
            }
        }
    };

    CheckResult {
        statement,
        tokens,
        diagnostics,
    }
}

fn furthest_note(furthest: &ParseError) -> Diagnostic {
    let note = Diagnostic::info(
        codes::SYNTAX_FURTHEST_FAILURE,
        format!("furthest attempt failed here: {furthest}"),
        Some(furthest.span()),
    );
    match furthest.to_diagnostic().context {
        Some(ctx) => note.with_context(ctx),
        None => note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_success_has_tokens_and_no_diagnostics() {
        let res = check_str("[a]=[b]", &ParserConfig::backtracking());
        assert!(res.ok());
        assert_eq!(res.statement, Some(Statement::Assign));
        assert_eq!(res.tokens.len(), 8);
        assert!(res.diagnostics.is_empty());
    }

    #[test]
    fn check_failure_adds_furthest_note() {
        let res = check_str("[a, ]", &ParserConfig::backtracking());
        assert!(!res.ok());
        let ids: Vec<&str> = res.diagnostics.iter().map(|d| d.id.as_ref()).collect();
        assert_eq!(
            ids,
            [codes::SYNTAX_NO_VIABLE_ALTERNATIVE, codes::SYNTAX_FURTHEST_FAILURE]
        );
        let note = &res.diagnostics[1];
        assert_eq!(note.severity, crate::Severity::Info);
        assert_eq!(note.span.map(|s| s.start), Some(4));
        assert_eq!(note.context.as_ref().unwrap()["found"], "']'");
    }

    #[test]
    fn check_lexical_failure_stops_tokens() {
        let res = check_str("[a,1]", &ParserConfig::predictive(2));
        assert_eq!(res.tokens.len(), 3);
        assert!(!res.ok());
        let ids: Vec<&str> = res.diagnostics.iter().map(|d| d.id.as_ref()).collect();
        assert_eq!(ids, [codes::LEX_INVALID_CHARACTER]);
        assert_eq!(res.diagnostics[0].span.map(|s| s.start), Some(3));
    }

    #[test]
    fn deep_nesting_is_reported_not_overflowed() {
        let deep = format!("{}a{}", "[".repeat(20_000), "]".repeat(20_000));
        for cfg in [ParserConfig::backtracking(), ParserConfig::predictive(2)] {
            let res = check_str(&deep, &cfg);
            assert!(!res.ok());
            let ids: Vec<&str> = res.diagnostics.iter().map(|d| d.id.as_ref()).collect();
            assert_eq!(ids, [codes::NESTING_TOO_DEEP], "{} strategy", cfg.strategy);
        }
    }

    #[test]
    fn predictive_reports_list_only() {
        assert_eq!(recognize("[a]", &ParserConfig::predictive(1)), Ok(Statement::List));
        assert!(recognize("[a]=[b]", &ParserConfig::predictive(2)).is_err());
    }
}
