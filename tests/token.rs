//! Token value type and rendering.

use std::collections::HashSet;

use graphql_tokens::{Token, TokenKind};

// -----------------------------------------------------------
// Construction and accessors.
// -----------------------------------------------------------

#[test]
fn token_round_trips_its_inputs() {
    let source = "mutation { like(id: 4) }";
    for (kind, start, end) in [
        (TokenKind::Name, 0, 8),
        (TokenKind::Name, 11, 15),
        (TokenKind::Int, 20, 21),
        (TokenKind::Unknown, 24, 24),
    ] {
        let token = Token::new(kind, source, start, end);
        assert_eq!(token.kind(), kind);
        assert_eq!(token.start(), start);
        assert_eq!(token.end(), end);
        assert_eq!(token.value(), &source[start..end]);
    }
}

#[test]
fn token_is_copy() {
    let token = Token::new(TokenKind::Name, "id", 0, 2);
    let copy = token;
    assert_eq!(token, copy);
}

#[test]
fn token_outlives_nothing_but_source() {
    let source = String::from("{ a }");
    let value = {
        let token = Token::new(TokenKind::Name, &source, 2, 3);
        token.value()
    };
    assert_eq!(value, "a");
}

#[test]
#[should_panic(expected = "out of bounds")]
fn token_rejects_span_past_source() {
    let _ = Token::new(TokenKind::Name, "", 0, 1);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn token_rejects_reversed_span() {
    let _ = Token::punctuator(TokenKind::BraceL, "{}", 1, 0);
}

#[test]
fn token_allows_empty_span_at_end() {
    let token = Token::new(TokenKind::Eof, "abc", 3, 3);
    assert_eq!(token, Token::eof("abc"));
}

// -----------------------------------------------------------
// Value semantics.
// -----------------------------------------------------------

#[test]
fn equal_tokens_hash_equal() {
    let first = String::from("name");
    let second = String::from("name");
    let mut set = HashSet::new();
    set.insert(Token::new(TokenKind::Name, &first, 0, 4));
    set.insert(Token::new(TokenKind::Name, &second, 0, 4));
    assert_eq!(set.len(), 1);
}

#[test]
fn tokens_differing_in_span_are_distinct() {
    let source = "a a";
    let left = Token::new(TokenKind::Name, source, 0, 1);
    let right = Token::new(TokenKind::Name, source, 2, 3);
    assert_eq!(left.value(), right.value());
    assert_ne!(left, right);
}

// -----------------------------------------------------------
// Rendering.
// -----------------------------------------------------------

#[test]
fn render_content_kinds_quote_value() {
    let cases = [
        (TokenKind::Name, "foo", "Name \"foo\""),
        (TokenKind::Int, "42", "Int \"42\""),
        (TokenKind::Float, "1.5e3", "Float \"1.5e3\""),
        (TokenKind::String, "hi there", "String \"hi there\""),
        (TokenKind::Comment, " note", "# \" note\""),
        (TokenKind::Unknown, "?", " \"?\""),
    ];
    for (kind, source, expected) in cases {
        let token = Token::new(kind, source, 0, source.len());
        assert_eq!(token.to_string(), expected);
    }
}

#[test]
fn render_punctuators_ignore_value() {
    let source = "{{{";
    let token = Token::new(TokenKind::BraceL, source, 0, 3);
    assert_eq!(token.value(), "{{{");
    assert_eq!(token.to_string(), "{");
}

#[test]
fn render_spread() {
    let token = Token::new(TokenKind::Spread, "...", 0, 3);
    assert_eq!(token.to_string(), "...");
}

#[test]
fn render_eof_with_stray_value() {
    let token = Token::new(TokenKind::Eof, "junk", 0, 4);
    assert_eq!(token.to_string(), "EOF");
}

#[test]
fn punctuator_classification() {
    assert!(TokenKind::Spread.is_punctuator());
    assert!(TokenKind::Pipe.is_punctuator());
    assert!(!TokenKind::Eof.is_punctuator());
    assert!(!TokenKind::Name.is_punctuator());
    assert!(TokenKind::Unknown.has_unique_value());
    assert!(!TokenKind::BraceR.has_unique_value());
}
