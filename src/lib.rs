//! Lexical tokens for GraphQL documents.
//!
//! A [`Token`] is an immutable, position-tagged view into the source
//! text: it records its [`TokenKind`], the half-open byte span
//! `[start, end)` it covers, and a borrowed slice of the matched text.
//! Tokens never copy the source, so the source string must outlive them.
//!
//! # Quick start
//!
//! ```
//! use graphql_tokens::{tokenize, TokenKind};
//!
//! let tokens = tokenize("{ hero(episode: JEDI) }").unwrap();
//! assert_eq!(tokens[1].to_string(), "Name \"hero\"");
//! assert_eq!(tokens[0].to_string(), "{");
//! assert_eq!(tokens.last().unwrap().kind(), TokenKind::Eof);
//! ```
//!
//! ## Pulling tokens for a parser
//!
//! ```
//! use graphql_tokens::{TokenStream, TokenKind};
//!
//! let mut stream = TokenStream::new("query Hero { name }");
//! let keyword = stream.expect(TokenKind::Name).unwrap();
//! assert_eq!(keyword.value(), "query");
//! assert!(stream.expect(TokenKind::BraceL).is_err());
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod lexer;
pub mod stream;
pub mod token;
pub mod value;

pub use lexer::{LexError, LexErrorKind, LexOptions, Lexer, tokenize, tokenize_with};
pub use stream::{StreamError, TokenStream};
pub use token::{Location, Token, TokenKind};
pub use value::{ValueError, block_string_value, string_value};

/// Unified error type covering lexing and string decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A string token with an undecodable value.
    #[error("{0} at {1}")]
    Value(ValueError, Location),
}

/// Tokenize `source` and check that every string token decodes.
pub fn validate(source: &str) -> Result<Vec<Token<'_>>, Error> {
    let tokens = tokenize(source)?;
    for token in tokens.iter().filter(|t| t.kind() == TokenKind::String) {
        string_value(token)
            .map_err(|e| Error::Value(e, Location::of(source, token.start())))?;
    }
    Ok(tokens)
}
