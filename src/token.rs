use std::fmt;
use std::ops::Range;

/// Line and column of a byte offset, for error reporting.
///
/// Both are 1-based. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Resolve `offset` in `source` to a line and column.
    ///
    /// `\n`, `\r\n` and a lone `\r` each end a line. Offsets past the end
    /// of `source` resolve to the position just after the last character.
    #[must_use]
    pub fn of(source: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        let mut chars = source.char_indices().peekable();

        while let Some((idx, ch)) = chars.next() {
            if idx >= offset {
                break;
            }
            match ch {
                '\r' => {
                    if matches!(chars.peek(), Some(&(next, '\n')) if next < offset) {
                        chars.next();
                    }
                    line += 1;
                    column = 1;
                }
                '\n' => {
                    line += 1;
                    column = 1;
                }
                _ => column += 1,
            }
        }

        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input. Always the last token of a document.
    Eof,
    /// `!`
    Bang,
    /// `$`
    Dollar,
    /// `(`
    ParenL,
    /// `)`
    ParenR,
    /// `...`
    Spread,
    /// `:`
    Colon,
    /// `=`
    Equals,
    /// `@`
    At,
    /// `[`
    BracketL,
    /// `]`
    BracketR,
    /// `{`
    BraceL,
    /// `|`
    Pipe,
    /// `}`
    BraceR,
    /// Name such as a field, type or argument name.
    Name,
    /// Integer literal.
    Int,
    /// Float literal (has a fraction, an exponent, or both).
    Float,
    /// Quoted or block string. The value is the raw text between the
    /// delimiters.
    String,
    /// Comment (`# ...`). The value excludes the leading `#`.
    Comment,
    /// A character that cannot start any other token.
    Unknown,
}

impl TokenKind {
    /// Short symbol used in diagnostics.
    ///
    /// Kinds without an entry in the table (currently only
    /// [`TokenKind::Unknown`]) describe as the empty string.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::Bang => "!",
            Self::Dollar => "$",
            Self::ParenL => "(",
            Self::ParenR => ")",
            Self::Spread => "...",
            Self::Colon => ":",
            Self::Equals => "=",
            Self::At => "@",
            Self::BracketL => "[",
            Self::BracketR => "]",
            Self::BraceL => "{",
            Self::Pipe => "|",
            Self::BraceR => "}",
            Self::Name => "Name",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::String => "String",
            Self::Comment => "#",
            Self::Unknown => "",
        }
    }

    /// Whether tokens of this kind carry text that differs between
    /// occurrences and is worth showing.
    #[must_use]
    pub const fn has_unique_value(self) -> bool {
        matches!(
            self,
            Self::Name | Self::Int | Self::Float | Self::String | Self::Comment | Self::Unknown
        )
    }

    #[must_use]
    pub const fn is_punctuator(self) -> bool {
        matches!(
            self,
            Self::Bang
                | Self::Dollar
                | Self::ParenL
                | Self::ParenR
                | Self::Spread
                | Self::Colon
                | Self::Equals
                | Self::At
                | Self::BracketL
                | Self::BracketR
                | Self::BraceL
                | Self::Pipe
                | Self::BraceR
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A single token: its kind, the half-open byte span `[start, end)` it
/// covers in the source, and a zero-copy view of its text.
///
/// The token borrows `value` from the source buffer and owns nothing, so
/// the buffer outlives every token derived from it. Tokens are plain
/// values: two tokens with the same kind, span and text are
/// interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    kind: TokenKind,
    start: usize,
    end: usize,
    value: &'a str,
}

impl<'a> Token<'a> {
    /// Token whose value is the whole span `source[start..end]`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`, if `end > source.len()`, or if either
    /// offset is not on a char boundary.
    #[must_use]
    pub fn new(kind: TokenKind, source: &'a str, start: usize, end: usize) -> Self {
        Self::with_value(kind, source, start..end, start, end)
    }

    /// Token whose value is `source[value]`, a sub-range of the span.
    ///
    /// Strings and comments use this: their delimiters belong to the span
    /// but not to the value.
    ///
    /// # Panics
    ///
    /// Panics unless `start <= value.start <= value.end <= end <=
    /// source.len()` and all offsets are on char boundaries.
    #[must_use]
    pub fn with_value(
        kind: TokenKind,
        source: &'a str,
        value: Range<usize>,
        start: usize,
        end: usize,
    ) -> Self {
        assert!(
            start <= end && end <= source.len(),
            "token span {start}..{end} out of bounds for source of length {}",
            source.len()
        );
        assert!(
            start <= value.start && value.start <= value.end && value.end <= end,
            "token value {value:?} not within span {start}..{end}"
        );
        assert!(
            source.is_char_boundary(start) && source.is_char_boundary(end),
            "token span {start}..{end} splits a character"
        );
        Self {
            kind,
            start,
            end,
            value: &source[value],
        }
    }

    /// Token with an empty value anchored at `start`, for punctuators.
    ///
    /// # Panics
    ///
    /// Same preconditions as [`Token::new`].
    #[must_use]
    pub fn punctuator(kind: TokenKind, source: &'a str, start: usize, end: usize) -> Self {
        Self::with_value(kind, source, start..start, start, end)
    }

    /// The end-of-input token: an empty span at `source.len()`.
    #[must_use]
    pub fn eof(source: &'a str) -> Self {
        let end = source.len();
        Self::punctuator(TokenKind::Eof, source, end, end)
    }

    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Byte offset of the first byte of the token.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the last byte of the token.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Text of the token, borrowed from the source.
    #[must_use]
    pub const fn value(&self) -> &'a str {
        self.value
    }

    /// Width of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.has_unique_value() {
            write!(f, "{} \"{}\"", self.kind.description(), self.value)
        } else {
            f.write_str(self.kind.description())
        }
    }
}
