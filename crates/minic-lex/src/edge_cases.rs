//! Boundary-condition tests that don't fit naturally in `lexer.rs`'s own
//! test module: multi-byte input, adjacent-operator ambiguity, and the
//! handful of places the grammar leaves genuinely empty.

use minic_util::Interner;

use crate::lexer::Lexer;
use crate::token::{TokenKind, TokenValue};

fn all_kinds(src: &str) -> Vec<TokenKind> {
    let interner = Interner::new();
    let mut lex = Lexer::new(src, &interner);
    let mut out = Vec::new();
    loop {
        lex.advance().expect("lex error in edge-case input");
        let kind = lex.current().unwrap().kind;
        let done = kind == TokenKind::Eof;
        out.push(kind);
        if done {
            break;
        }
    }
    out
}

#[test]
fn empty_string_literal_lexes_to_empty_payload() {
    let interner = Interner::new();
    let mut lex = Lexer::new("\"\"", &interner);
    lex.advance().unwrap();
    assert_eq!(lex.current().unwrap().value, TokenValue::Str(String::new()));
}

#[test]
fn empty_source_is_a_single_eof() {
    assert_eq!(all_kinds(""), vec![TokenKind::Eof]);
    assert_eq!(all_kinds("   \n\t  "), vec![TokenKind::Eof]);
}

#[test]
fn adjacent_relational_and_assign_do_not_merge_wrongly() {
    // "<=" must not be read as "<" followed by "=".
    assert_eq!(all_kinds("<="), vec![TokenKind::Le, TokenKind::Eof]);
    // But "< =" (with a space) is genuinely two tokens.
    assert_eq!(all_kinds("< ="), vec![TokenKind::Lt, TokenKind::Assign, TokenKind::Eof]);
}

#[test]
fn bang_not_followed_by_equals_is_logical_not() {
    assert_eq!(all_kinds("!x"), vec![TokenKind::Not, TokenKind::Iden, TokenKind::Eof]);
}

#[test]
fn digit_run_stops_at_non_digit_and_resumes_as_identifier() {
    // "1abc" is not a malformed number: it is Int(1) followed by Iden("abc").
    assert_eq!(all_kinds("1abc"), vec![TokenKind::Int, TokenKind::Iden, TokenKind::Eof]);
}

#[test]
fn zero_is_a_valid_int_literal() {
    let interner = Interner::new();
    let mut lex = Lexer::new("0", &interner);
    lex.advance().unwrap();
    assert_eq!(lex.current().unwrap().value, TokenValue::Int(0));
}

#[test]
fn i32_max_is_accepted_one_past_is_rejected() {
    let interner = Interner::new();
    let mut lex = Lexer::new("2147483647", &interner);
    lex.advance().unwrap();
    assert_eq!(lex.current().unwrap().value, TokenValue::Int(i32::MAX));

    let mut lex = Lexer::new("2147483648", &interner);
    assert!(lex.advance().is_err());
}

#[test]
fn unicode_identifier_is_accepted_and_interned() {
    let interner = Interner::new();
    let mut lex = Lexer::new("café", &interner);
    lex.advance().unwrap();
    assert_eq!(lex.current().unwrap().kind, TokenKind::Iden);
}
