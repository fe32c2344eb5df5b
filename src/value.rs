use std::borrow::Cow;
use std::str::Chars;

use crate::token::{Token, TokenKind};

/// Error produced while decoding a string token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// The token is not a `String`.
    #[error("expected a string token, got '{0}'")]
    NotAString(TokenKind),
    /// Malformed escape sequence.
    #[error("invalid escape sequence in string value")]
    InvalidEscape,
    /// `\u` escape naming a surrogate that is not part of a valid pair.
    #[error("invalid unicode code point \\u{0:04X}")]
    InvalidCodePoint(u32),
}

/// Decoded value of a `String` token.
///
/// Quoted strings have their escape sequences resolved; block strings
/// get the common indentation and surrounding blank lines removed.
/// Borrows from the source when a quoted string has no escapes.
///
/// # Errors
///
/// Returns `ValueError` if `token` is not a string or carries an invalid
/// escape sequence.
pub fn string_value<'a>(token: &Token<'a>) -> Result<Cow<'a, str>, ValueError> {
    if token.kind() != TokenKind::String {
        return Err(ValueError::NotAString(token.kind()));
    }

    // block strings lose six delimiter bytes, quoted strings two
    if token.len() - token.value().len() == 6 {
        return Ok(Cow::Owned(block_string_value(token.value())));
    }

    let raw = token.value();
    if raw.contains('\\') {
        unescape(raw).map(Cow::Owned)
    } else {
        Ok(Cow::Borrowed(raw))
    }
}

fn unescape(raw: &str) -> Result<String, ValueError> {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            value.push(ch);
            continue;
        }
        let decoded = match chars.next() {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{8}',
            Some('f') => '\u{C}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => read_unicode(&mut chars)?,
            _ => return Err(ValueError::InvalidEscape),
        };
        value.push(decoded);
    }

    Ok(value)
}

/// Decode the code point after `\u`, joining a surrogate pair spelled
/// as two consecutive escapes.
fn read_unicode(chars: &mut Chars<'_>) -> Result<char, ValueError> {
    let code = read_hex4(chars)?;

    if (0xD800..0xDC00).contains(&code) {
        let mut lookahead = chars.clone();
        if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
            let low = read_hex4(&mut lookahead)?;
            if (0xDC00..0xE000).contains(&low) {
                *chars = lookahead;
                let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                return char::from_u32(combined).ok_or(ValueError::InvalidCodePoint(combined));
            }
        }
    }

    char::from_u32(code).ok_or(ValueError::InvalidCodePoint(code))
}

fn read_hex4(chars: &mut Chars<'_>) -> Result<u32, ValueError> {
    let mut code = 0;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or(ValueError::InvalidEscape)?;
        code = code * 16 + digit;
    }
    Ok(code)
}

/// Block string value from the raw text between the `"""` delimiters.
///
/// Unescapes `\"""`, strips the indentation common to all lines but the
/// first, drops leading and trailing blank lines, and joins lines with
/// `\n`.
#[must_use]
pub fn block_string_value(raw: &str) -> String {
    let raw = raw.replace("\\\"\"\"", "\"\"\"");
    let lines = split_lines(&raw);

    let common_indent = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let indent = leading_whitespace(line);
            (indent < line.len()).then_some(indent)
        })
        .min();

    let lines: Vec<&str> = lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| match common_indent {
            Some(indent) if i > 0 => &line[indent.min(line.len())..],
            _ => line,
        })
        .collect();

    let first = lines.iter().position(|line| !is_blank(line));
    let last = lines.iter().rposition(|line| !is_blank(line));
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }

    lines.push(&text[start..]);
    lines
}

fn leading_whitespace(line: &str) -> usize {
    line.bytes().take_while(|b| matches!(b, b' ' | b'\t')).count()
}

fn is_blank(line: &str) -> bool {
    leading_whitespace(line) == line.len()
}
