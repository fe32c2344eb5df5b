#![allow(dead_code)]

use graphql_tokens::{Token, TokenKind, tokenize};

/// Check the structural invariants every token sequence must satisfy:
/// spans are in bounds and ordered without overlap, every value is a
/// slice of the source lying inside its token's span, and the sequence
/// ends with exactly one `Eof` at the end of the source.
pub fn assert_well_formed(source: &str, tokens: &[Token<'_>]) {
    let base = source.as_ptr() as usize;
    let mut previous_end = 0;

    for (i, token) in tokens.iter().enumerate() {
        assert!(
            token.start() <= token.end() && token.end() <= source.len(),
            "token {i} span {:?} out of bounds",
            token.span()
        );
        assert!(
            token.start() >= previous_end,
            "token {i} overlaps previous token"
        );
        previous_end = token.end();

        if !token.value().is_empty() {
            let offset = token.value().as_ptr() as usize - base;
            assert!(
                offset >= token.start() && offset + token.value().len() <= token.end(),
                "token {i} value is not inside its span"
            );
            assert_eq!(&source[offset..offset + token.value().len()], token.value());
        }

        let is_last = i + 1 == tokens.len();
        assert_eq!(token.kind() == TokenKind::Eof, is_last, "token {i}");
    }

    let eof = tokens.last().expect("at least one token");
    assert_eq!(eof.start(), source.len());
    assert_eq!(eof.end(), source.len());
}

/// Tokenize and return `(kind, value)` pairs, `Eof` excluded.
pub fn pairs(source: &str) -> Vec<(TokenKind, &str)> {
    let tokens = tokenize(source).expect("tokenize failed");
    assert_well_formed(source, &tokens);
    tokens
        .iter()
        .filter(|t| t.kind() != TokenKind::Eof)
        .map(|t| (t.kind(), t.value()))
        .collect()
}
