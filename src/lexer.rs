use std::fmt;

use log::{debug, trace};

use crate::token::{Location, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// One or two dots that do not form `...`.
    IncompleteSpread,
    /// Quoted string without a closing quote on the same line.
    UnterminatedString,
    /// Block string without a closing `"""`.
    UnterminatedBlockString,
    /// Control character inside a string.
    InvalidCharacter(char),
    /// Backslash followed by a character that is not a valid escape.
    InvalidEscape(char),
    /// `\u` not followed by four hex digits.
    InvalidUnicodeEscape,
    /// A `0` followed by another digit.
    LeadingZero,
    /// A digit was required (after `-`, `.` or an exponent marker).
    ExpectedDigit { found: Option<char> },
    /// A number immediately followed by `.` or a name character.
    InvalidNumberSuffix(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompleteSpread => {
                write!(f, "expected '...'")
            }
            Self::UnterminatedString => {
                write!(f, "unterminated string")
            }
            Self::UnterminatedBlockString => {
                write!(f, "unterminated block string")
            }
            Self::InvalidCharacter(ch) => {
                write!(f, "invalid character within string: {}", ch.escape_unicode())
            }
            Self::InvalidEscape(ch) => {
                write!(f, "invalid escape sequence: \\{ch}")
            }
            Self::InvalidUnicodeEscape => {
                write!(f, "invalid unicode escape sequence")
            }
            Self::LeadingZero => {
                write!(f, "invalid number, unexpected digit after 0")
            }
            Self::ExpectedDigit { found: None } => {
                write!(f, "invalid number, expected digit but got end of input")
            }
            Self::ExpectedDigit { found: Some(ch) } => {
                write!(f, "invalid number, expected digit but got '{ch}'")
            }
            Self::InvalidNumberSuffix(ch) => {
                write!(f, "invalid number, unexpected '{ch}' after number")
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {location}")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Byte offset of the offending input.
    pub offset: usize,
    pub location: Location,
}

/// Lexer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexOptions {
    /// Emit `Comment` tokens. When false comments are skipped like
    /// whitespace.
    pub comments: bool,
}

impl Default for LexOptions {
    fn default() -> Self {
        Self { comments: true }
    }
}

impl LexOptions {
    #[must_use]
    pub const fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }
}

/// Tokenize a GraphQL document. The last token is always `Eof`.
///
/// # Errors
///
/// Returns `LexError` on malformed strings or numbers and on stray dots.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    tokenize_with(source, LexOptions::default())
}

/// Like [`tokenize`], with explicit options.
pub fn tokenize_with(source: &str, options: LexOptions) -> Result<Vec<Token<'_>>, LexError> {
    let tokens = Lexer::with_options(source, options).collect::<Result<Vec<_>, _>>()?;
    debug!(
        "tokenized {} bytes into {} tokens",
        source.len(),
        tokens.len()
    );
    Ok(tokens)
}

/// On-demand scanner over a source document.
///
/// [`Lexer::next_token`] keeps returning `Eof` once the input is
/// exhausted. As an iterator the lexer stops after the first `Eof` or
/// the first error.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    options: LexOptions,
    done: bool,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, LexOptions::default())
    }

    #[must_use]
    pub const fn with_options(source: &'a str, options: LexOptions) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            options,
            done: false,
        }
    }

    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.source
    }

    /// Scan the next token.
    ///
    /// # Errors
    ///
    /// Returns `LexError` when the input at the current position is
    /// malformed. The lexer stays at the start of the malformed token, so
    /// calling again returns the same error.
    pub fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        loop {
            self.skip_ignored();

            let Some(&byte) = self.bytes.get(self.pos) else {
                return Ok(Token::eof(self.source));
            };

            let start = self.pos;
            let scanned = match byte {
                b'#' => Ok(self.read_comment()),
                b'!' => Ok(self.punctuator(TokenKind::Bang)),
                b'$' => Ok(self.punctuator(TokenKind::Dollar)),
                b'(' => Ok(self.punctuator(TokenKind::ParenL)),
                b')' => Ok(self.punctuator(TokenKind::ParenR)),
                b':' => Ok(self.punctuator(TokenKind::Colon)),
                b'=' => Ok(self.punctuator(TokenKind::Equals)),
                b'@' => Ok(self.punctuator(TokenKind::At)),
                b'[' => Ok(self.punctuator(TokenKind::BracketL)),
                b']' => Ok(self.punctuator(TokenKind::BracketR)),
                b'{' => Ok(self.punctuator(TokenKind::BraceL)),
                b'|' => Ok(self.punctuator(TokenKind::Pipe)),
                b'}' => Ok(self.punctuator(TokenKind::BraceR)),
                b'.' => self.read_spread(),
                b'"' => self.read_string(),
                b'-' | b'0'..=b'9' => self.read_number(),
                b if is_name_start(b) => Ok(self.read_name()),
                _ => Ok(self.read_unknown()),
            };

            let token = match scanned {
                Ok(token) => token,
                Err(err) => {
                    // rewind so a retry reports the same error
                    self.pos = start;
                    return Err(err);
                }
            };

            if token.kind() == TokenKind::Comment && !self.options.comments {
                continue;
            }

            trace!("{token} at {}..{}", token.start(), token.end());
            return Ok(token);
        }
    }

    fn error(&self, kind: LexErrorKind, offset: usize) -> LexError {
        LexError {
            kind,
            offset,
            location: Location::of(self.source, offset),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    fn skip_ignored(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r' | b',') => self.pos += 1,
                // U+FEFF
                Some(0xEF) if self.rest().starts_with(&[0xEF, 0xBB, 0xBF]) => self.pos += 3,
                _ => break,
            }
        }
    }

    fn punctuator(&mut self, kind: TokenKind) -> Token<'a> {
        let start = self.pos;
        self.pos += 1;
        Token::punctuator(kind, self.source, start, self.pos)
    }

    fn read_spread(&mut self) -> Result<Token<'a>, LexError> {
        if !self.rest().starts_with(b"...") {
            return Err(self.error(LexErrorKind::IncompleteSpread, self.pos));
        }
        let start = self.pos;
        self.pos += 3;
        Ok(Token::punctuator(
            TokenKind::Spread,
            self.source,
            start,
            self.pos,
        ))
    }

    fn read_comment(&mut self) -> Token<'a> {
        let start = self.pos;
        self.pos += 1; // skip #

        while !matches!(self.peek(), None | Some(b'\n' | b'\r')) {
            self.pos += 1;
        }

        Token::with_value(
            TokenKind::Comment,
            self.source,
            start + 1..self.pos,
            start,
            self.pos,
        )
    }

    fn read_name(&mut self) -> Token<'a> {
        let start = self.pos;
        while self.peek().is_some_and(is_name_continue) {
            self.pos += 1;
        }
        Token::new(TokenKind::Name, self.source, start, self.pos)
    }

    fn read_unknown(&mut self) -> Token<'a> {
        let start = self.pos;
        self.pos += self.peek_char().map_or(1, char::len_utf8);
        Token::new(TokenKind::Unknown, self.source, start, self.pos)
    }

    fn read_number(&mut self) -> Result<Token<'a>, LexError> {
        let start = self.pos;
        let mut is_float = false;

        if self.peek() == Some(b'-') {
            self.pos += 1;
        }

        if self.peek() == Some(b'0') {
            self.pos += 1;
            if self.peek().is_some_and(|b| b.is_ascii_digit()) {
                return Err(self.error(LexErrorKind::LeadingZero, self.pos));
            }
        } else {
            self.read_digits()?;
        }

        if self.peek() == Some(b'.') {
            is_float = true;
            self.pos += 1;
            self.read_digits()?;
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            is_float = true;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            self.read_digits()?;
        }

        if let Some(b) = self.peek().filter(|&b| b == b'.' || is_name_start(b)) {
            return Err(self.error(
                LexErrorKind::InvalidNumberSuffix(char::from(b)),
                self.pos,
            ));
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Int
        };
        Ok(Token::new(kind, self.source, start, self.pos))
    }

    fn read_digits(&mut self) -> Result<(), LexError> {
        if !self.peek().is_some_and(|b| b.is_ascii_digit()) {
            let found = self.peek_char();
            return Err(self.error(LexErrorKind::ExpectedDigit { found }, self.pos));
        }
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        Ok(())
    }

    fn read_string(&mut self) -> Result<Token<'a>, LexError> {
        if self.rest().starts_with(b"\"\"\"") {
            return self.read_block_string();
        }

        let start = self.pos;
        self.pos += 1; // skip opening quote
        let value_start = self.pos;

        loop {
            match self.peek_char() {
                None | Some('\n' | '\r') => {
                    return Err(self.error(LexErrorKind::UnterminatedString, start));
                }
                Some('"') => {
                    let value_end = self.pos;
                    self.pos += 1;
                    return Ok(Token::with_value(
                        TokenKind::String,
                        self.source,
                        value_start..value_end,
                        start,
                        self.pos,
                    ));
                }
                Some('\\') => self.read_escape(start)?,
                Some(ch) if is_disallowed_control(ch) => {
                    return Err(self.error(LexErrorKind::InvalidCharacter(ch), self.pos));
                }
                Some(ch) => self.pos += ch.len_utf8(),
            }
        }
    }

    fn read_escape(&mut self, string_start: usize) -> Result<(), LexError> {
        let escape_start = self.pos;
        self.pos += 1; // skip backslash

        match self.peek_char() {
            None | Some('\n' | '\r') => {
                Err(self.error(LexErrorKind::UnterminatedString, string_start))
            }
            Some('"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't') => {
                self.pos += 1;
                Ok(())
            }
            Some('u') => {
                self.pos += 1;
                let hex = self.rest().iter().take(4);
                if hex.len() < 4 || !hex.clone().all(u8::is_ascii_hexdigit) {
                    return Err(self.error(LexErrorKind::InvalidUnicodeEscape, escape_start));
                }
                self.pos += 4;
                Ok(())
            }
            Some(ch) => Err(self.error(LexErrorKind::InvalidEscape(ch), escape_start)),
        }
    }

    fn read_block_string(&mut self) -> Result<Token<'a>, LexError> {
        let start = self.pos;
        self.pos += 3; // skip opening """
        let value_start = self.pos;

        loop {
            let rest = self.rest();
            if rest.starts_with(b"\"\"\"") {
                let value_end = self.pos;
                self.pos += 3;
                return Ok(Token::with_value(
                    TokenKind::String,
                    self.source,
                    value_start..value_end,
                    start,
                    self.pos,
                ));
            }
            if rest.starts_with(b"\\\"\"\"") {
                self.pos += 4;
                continue;
            }

            match self.peek_char() {
                None => {
                    return Err(self.error(LexErrorKind::UnterminatedBlockString, start));
                }
                Some(ch) if ch != '\n' && ch != '\r' && is_disallowed_control(ch) => {
                    return Err(self.error(LexErrorKind::InvalidCharacter(ch), self.pos));
                }
                Some(ch) => self.pos += ch.len_utf8(),
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        self.done = !matches!(&result, Ok(token) if token.kind() != TokenKind::Eof);
        Some(result)
    }
}

const fn is_name_start(byte: u8) -> bool {
    byte == b'_' || byte.is_ascii_alphabetic()
}

const fn is_name_continue(byte: u8) -> bool {
    byte == b'_' || byte.is_ascii_alphanumeric()
}

const fn is_disallowed_control(ch: char) -> bool {
    ch < '\u{20}' && ch != '\t'
}
