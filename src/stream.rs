use crate::lexer::{LexError, LexOptions, Lexer};
use crate::token::{Location, Token, TokenKind};

/// Error produced while pulling tokens off a [`TokenStream`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// The underlying lexer failed.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The next token was not of the expected kind.
    #[error("expected '{expected}', got '{found}' at {location}")]
    Unexpected {
        expected: TokenKind,
        /// Rendering of the token that was found.
        found: String,
        location: Location,
    },
}

/// Pull-style token source for a parser: one token of lookahead,
/// comments skipped by default.
///
/// The stream cannot be rewound. Once the input is exhausted every call
/// to [`TokenStream::advance`] yields the same `Eof` token.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Token<'a>>,
}

impl<'a> TokenStream<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, LexOptions::default().with_comments(false))
    }

    #[must_use]
    pub const fn with_options(source: &'a str, options: LexOptions) -> Self {
        Self {
            lexer: Lexer::with_options(source, options),
            peeked: None,
        }
    }

    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.lexer.source()
    }

    /// Look at the next token without consuming it.
    pub fn peek(&mut self) -> Result<Token<'a>, LexError> {
        if let Some(token) = self.peeked {
            return Ok(token);
        }
        let token = self.lexer.next_token()?;
        self.peeked = Some(token);
        Ok(token)
    }

    /// Consume and return the next token.
    pub fn advance(&mut self) -> Result<Token<'a>, LexError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.lexer.next_token(),
        }
    }

    /// Consume the next token if it is of `kind`.
    pub fn skip(&mut self, kind: TokenKind) -> Result<bool, LexError> {
        if self.peek()?.kind() == kind {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consume the next token, failing unless it is of `kind`. A
    /// mismatched token is left in place.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>, StreamError> {
        let token = self.peek()?;
        if token.kind() != kind {
            return Err(StreamError::Unexpected {
                expected: kind,
                found: token.to_string(),
                location: Location::of(self.source(), token.start()),
            });
        }
        Ok(self.advance()?)
    }
}
