//! Tests for the lexer: token segmentation, whitespace, end-of-input
//! idempotence, code-point spans, and lexical errors.

mod common;

use common::{kinds, kinds_and_texts};
use nestlist_core::grammar::diag::Span;
use nestlist_core::grammar::lexer::{Lexer, tokenize};
use nestlist_core::grammar::token::TokenKind::{
    self, Comma, EndOfInput, Equals, LeftBracket, Name, RightBracket,
};
use nestlist_core::ParseError;

fn pairs(items: &[(TokenKind, &str)]) -> Vec<(TokenKind, String)> {
    items.iter().map(|(k, t)| (*k, t.to_string())).collect()
}

// ─── 1. Segmentation ─────────────────────────────────────────────────────────

#[test]
fn empty_input_is_just_end_of_input() {
    assert_eq!(kinds_and_texts(""), pairs(&[(EndOfInput, "")]));
}

#[test]
fn simple_list() {
    assert_eq!(
        kinds_and_texts("[a,b,c]"),
        pairs(&[
            (LeftBracket, "["),
            (Name, "a"),
            (Comma, ","),
            (Name, "b"),
            (Comma, ","),
            (Name, "c"),
            (RightBracket, "]"),
            (EndOfInput, ""),
        ])
    );
}

#[test]
fn nested_list() {
    assert_eq!(
        kinds("[a,[b,c]]"),
        vec![
            LeftBracket,
            Name,
            Comma,
            LeftBracket,
            Name,
            Comma,
            Name,
            RightBracket,
            RightBracket,
            EndOfInput
        ]
    );
}

#[test]
fn assignment_elements_and_statement() {
    assert_eq!(
        kinds("[a=b]=[c]"),
        vec![
            LeftBracket,
            Name,
            Equals,
            Name,
            RightBracket,
            Equals,
            LeftBracket,
            Name,
            RightBracket,
            EndOfInput
        ]
    );
}

#[test]
fn names_are_longest_letter_runs() {
    assert_eq!(
        kinds_and_texts("[abc,XyZ,z]"),
        pairs(&[
            (LeftBracket, "["),
            (Name, "abc"),
            (Comma, ","),
            (Name, "XyZ"),
            (Comma, ","),
            (Name, "z"),
            (RightBracket, "]"),
            (EndOfInput, ""),
        ])
    );
}

#[test]
fn whitespace_separates_names() {
    assert_eq!(
        kinds_and_texts("ab cd"),
        pairs(&[(Name, "ab"), (Name, "cd"), (EndOfInput, "")])
    );
}

#[test]
fn whitespace_is_discarded() {
    let toks = tokenize("  [ \t a ,\r\n b ]\n").unwrap();
    assert_eq!(toks.len(), 6);
    assert!(
        toks.iter().all(|t| !t.text.contains(char::is_whitespace)),
        "no token text may contain whitespace: {toks:?}"
    );
}

#[test]
fn exactly_one_end_of_input_terminates_stream() {
    let toks = tokenize("[a]").unwrap();
    let eofs = toks.iter().filter(|t| t.is(EndOfInput)).count();
    assert_eq!(eofs, 1);
    assert!(toks.last().unwrap().is(EndOfInput));
    assert!(toks.last().unwrap().text.is_empty());
}

// ─── 2. End of input ─────────────────────────────────────────────────────────

#[test]
fn end_of_input_is_idempotent() {
    let mut lx = Lexer::new("[a]");
    for _ in 0..3 {
        lx.next_token().unwrap();
    }
    for _ in 0..5 {
        assert_eq!(lx.next_token().unwrap().kind, EndOfInput);
    }
}

#[test]
fn end_of_input_without_polling_has_more() {
    let mut lx = Lexer::new("a");
    assert_eq!(lx.next_token().unwrap().kind, Name);
    assert!(lx.has_more());
    assert_eq!(lx.next_token().unwrap().kind, EndOfInput);
    assert!(!lx.has_more());
    assert_eq!(lx.next_token().unwrap().kind, EndOfInput);
}

#[test]
fn has_more_drives_a_scan_loop() {
    let mut lx = Lexer::new("  [  a, \t\tb,c]");
    let mut texts = Vec::new();
    while lx.has_more() {
        texts.push(lx.next_token().unwrap().text);
    }
    assert_eq!(texts, ["[", "a", ",", "b", ",", "c", "]", ""]);
}

#[test]
fn iterator_stops_after_end_of_input() {
    let toks: Vec<_> = Lexer::new("[a]").collect();
    assert_eq!(toks.len(), 4);
    assert!(toks.iter().all(Result::is_ok));
}

// ─── 3. Spans ────────────────────────────────────────────────────────────────

#[test]
fn spans_are_code_point_offsets() {
    let toks = tokenize("[ab, c]").unwrap();
    assert_eq!(toks[1].span, Span::new(1, 3));
    assert_eq!(toks[3].span, Span::new(5, 6));
    assert_eq!(toks.last().unwrap().span, Span::empty(7));
}

#[test]
fn lexical_error_offset_counts_code_points() {
    // 'é' is two bytes in UTF-8 but one code point.
    let err = tokenize("[a,é]").unwrap_err();
    assert_eq!(
        err,
        ParseError::Lexical {
            character: 'é',
            offset: 3
        }
    );
}

// ─── 4. Lexical errors ───────────────────────────────────────────────────────

#[test]
fn digits_are_rejected() {
    let err = tokenize("[1,2,3]").unwrap_err();
    assert_eq!(
        err,
        ParseError::Lexical {
            character: '1',
            offset: 1
        }
    );
}

#[test]
fn non_ascii_input_is_rejected() {
    assert!(matches!(
        tokenize("🙈"),
        Err(ParseError::Lexical { character: '🙈', offset: 0 })
    ));
}

#[test]
fn control_characters_are_rejected() {
    assert!(tokenize("\u{5}R").unwrap_err().is_lexical());
}

#[test]
fn lexer_is_exhausted_after_error() {
    let mut lx = Lexer::new("[#a]");
    assert_eq!(lx.next_token().unwrap().kind, LeftBracket);
    assert!(lx.next_token().is_err());
    assert!(!lx.has_more());
    assert_eq!(lx.next_token().unwrap().kind, EndOfInput);
}

#[test]
fn iterator_yields_error_once() {
    let items: Vec<_> = Lexer::new("[%]").collect();
    assert_eq!(items.len(), 2);
    assert!(items[0].is_ok());
    assert!(items[1].is_err());
}
