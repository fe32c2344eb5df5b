//! Token stream consumption as a parser would drive it.

use graphql_tokens::{StreamError, TokenKind, TokenStream};

/// Collect the field names of a flat selection set like `{ a b c }`.
fn selection_names(source: &str) -> Result<Vec<&str>, StreamError> {
    let mut stream = TokenStream::new(source);
    stream.expect(TokenKind::BraceL)?;
    let mut names = Vec::new();
    while !stream.skip(TokenKind::BraceR)? {
        names.push(stream.expect(TokenKind::Name)?.value());
    }
    stream.expect(TokenKind::Eof)?;
    Ok(names)
}

#[test]
fn stream_drives_simple_parser() {
    let names = selection_names("{ id, name # the name\n friends }").unwrap();
    assert_eq!(names, ["id", "name", "friends"]);
}

#[test]
fn stream_reports_unexpected_token() {
    let err = selection_names("{ id 42 }").unwrap_err();
    assert_eq!(
        err.to_string(),
        "expected 'Name', got 'Int \"42\"' at line 1, column 6"
    );
}

#[test]
fn stream_reports_missing_close() {
    let err = selection_names("{ id").unwrap_err();
    assert!(matches!(
        err,
        StreamError::Unexpected {
            expected: TokenKind::Name,
            ref found,
            ..
        } if found == "EOF"
    ));
}

#[test]
fn stream_exposes_source() {
    let source = "{ a }";
    let stream = TokenStream::new(source);
    assert!(std::ptr::eq(stream.source(), source));
}

#[test]
fn stream_error_is_sticky() {
    let mut stream = TokenStream::new("012");
    let first = stream.expect(TokenKind::Int).unwrap_err();
    let second = stream.expect(TokenKind::Int).unwrap_err();
    assert!(matches!(first, StreamError::Lex(_)));
    assert_eq!(first, second);
    assert!(stream.peek().is_err());
}
