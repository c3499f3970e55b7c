//! Parser configuration: which recognizer to run and how far it may look ahead.

use std::fmt;

/// Default maximum list nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Recognition strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// LL(k) recursive descent over a fixed circular lookahead buffer.
    /// Records the most recent failure and keeps going.
    Predictive,
    /// Speculative recursive descent with unbounded lookahead and rollback.
    #[default]
    Backtracking,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Predictive => write!(f, "predictive"),
            Strategy::Backtracking => write!(f, "backtracking"),
        }
    }
}

/// Complete parser configuration.
///
/// `lookahead` is the width `k` of the predictive parser's buffer. With
/// `k = 1` assignment elements (`a=b`) cannot be told apart from bare names,
/// so the grammar degrades to `element := NAME | list`. The backtracking
/// strategy buffers without bound and ignores it.
///
/// `max_depth` bounds list nesting for both strategies. Each level is one
/// recursive call, so input past the limit is rejected with
/// [`ParseError::TooDeep`](crate::ParseError::TooDeep).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Which recognizer to run.
    pub strategy: Strategy,
    /// Lookahead width for [`Strategy::Predictive`].
    pub lookahead: usize,
    /// Maximum list nesting depth.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Backtracking,
            lookahead: 2,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    /// Predictive LL(k) configuration.
    pub fn predictive(k: usize) -> Self {
        Self {
            strategy: Strategy::Predictive,
            lookahead: k,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Backtracking configuration.
    pub fn backtracking() -> Self {
        Self::default()
    }

    /// Replace the nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check the configuration for values no parser can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.strategy == Strategy::Predictive && self.lookahead == 0 {
            return Err(ConfigError::ZeroLookahead);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }
        Ok(())
    }
}

/// Invalid configuration values.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A predictive parser needs at least one token of lookahead.
    #[error("lookahead must be at least 1")]
    ZeroLookahead,
    /// Every statement contains at least one list.
    #[error("max depth must be at least 1")]
    ZeroMaxDepth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_backtracking() {
        let cfg = ParserConfig::default();
        assert_eq!(cfg.strategy, Strategy::Backtracking);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_lookahead_rejected_for_predictive_only() {
        assert_eq!(
            ParserConfig::predictive(0).validate(),
            Err(ConfigError::ZeroLookahead)
        );
        let mut cfg = ParserConfig::backtracking();
        cfg.lookahead = 0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_max_depth_rejected() {
        let cfg = ParserConfig::backtracking().with_max_depth(0);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroMaxDepth));
        let cfg = ParserConfig::predictive(2).with_max_depth(1);
        assert_eq!(cfg.max_depth, 1);
        assert!(cfg.validate().is_ok());
        assert_eq!(ParserConfig::default().max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn strategy_display() {
        assert_eq!(Strategy::Predictive.to_string(), "predictive");
        assert_eq!(Strategy::Backtracking.to_string(), "backtracking");
    }
}
