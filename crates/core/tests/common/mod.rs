//! Shared test helpers for `nestlist_core` integration tests.

#![allow(unreachable_pub)]

use std::path::PathBuf;

use nestlist_core::grammar::lexer::Lexer;
use nestlist_core::grammar::token::{Token, TokenKind};

/// Install a test logger once; `RUST_LOG=debug cargo test` shows parser traces.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .try_init();
}

/// Read a fixture file and return its non-empty lines.
#[allow(dead_code)]
pub fn fixture_lines(name: &str) -> Vec<String> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Lex `input` to completion, panicking on a lexical error.
#[allow(dead_code)]
pub fn lex_all(input: &str) -> Vec<Token> {
    nestlist_core::tokenize(input)
        .unwrap_or_else(|e| panic!("unexpected lexical error for {input:?}: {e}"))
}

/// `(kind, text)` pairs for the full token stream of `input`.
#[allow(dead_code)]
pub fn kinds_and_texts(input: &str) -> Vec<(TokenKind, String)> {
    lex_all(input)
        .into_iter()
        .map(|t| (t.kind, t.text))
        .collect()
}

/// Token kinds for the full token stream of `input`.
#[allow(dead_code)]
pub fn kinds(input: &str) -> Vec<TokenKind> {
    lex_all(input).into_iter().map(|t| t.kind).collect()
}

/// A fresh lexer over `input`.
#[allow(dead_code)]
pub fn lexer(input: &str) -> Lexer {
    Lexer::new(input)
}

// ─── Simple deterministic PRNG (LCG) ────────────────────────────────────────

#[allow(dead_code)]
pub struct SimpleRng(u64);

#[allow(dead_code)]
impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    pub fn gen_range(&mut self, max: usize) -> usize {
        (self.next() as usize) % max
    }

    pub fn chance(&mut self, percent: usize) -> bool {
        self.gen_range(100) < percent
    }
}
