//! Escape codec for PO quoted strings.
//!
//! `encode` turns raw text into the body of a PO string literal and `decode`
//! reverses it. `decode(&encode(s))` yields `s` for every string.

use thiserror::Error;

/// Errors raised while decoding an escaped string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnescapeError {
    /// A backslash followed by a character that starts no known escape.
    #[error("invalid escape sequence: \\{0}")]
    InvalidSequence(char),

    /// A backslash at the very end of the input.
    #[error("unterminated escape sequence")]
    Unterminated,

    /// An octal or hexadecimal escape naming no Unicode scalar value.
    #[error("invalid character code in escape sequence: \\{0}")]
    InvalidCodePoint(String),
}

/// Escape `text` so it can be placed between double quotes.
pub fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0B}' => out.push_str("\\v"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

/// Decode the body of a PO string literal.
pub fn decode(escaped: &str) -> Result<String, UnescapeError> {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let code = chars.next().ok_or(UnescapeError::Unterminated)?;
        match code {
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '0'..='7' => {
                let mut digits = String::from(code);
                while let Some(&next) = chars.peek() {
                    if !next.is_digit(8) {
                        break;
                    }
                    digits.push(next);
                    chars.next();
                }
                out.push(code_point(&digits, 8, &digits)?);
            }
            'x' => {
                let mut digits = String::new();
                while let Some(&next) = chars.peek() {
                    if !next.is_ascii_hexdigit() {
                        break;
                    }
                    digits.push(next);
                    chars.next();
                }
                if digits.is_empty() {
                    return Err(UnescapeError::InvalidSequence('x'));
                }
                out.push(code_point(&digits, 16, &format!("x{digits}"))?);
            }
            other => return Err(UnescapeError::InvalidSequence(other)),
        }
    }

    Ok(out)
}

fn code_point(digits: &str, radix: u32, sequence: &str) -> Result<char, UnescapeError> {
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| UnescapeError::InvalidCodePoint(sequence.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(""), "");
    }

    #[test]
    fn test_encode_simple() {
        assert_eq!(encode("First\nSecond"), r"First\nSecond");
    }

    #[test]
    fn test_encode_every_escape() {
        assert_eq!(
            encode("\u{07} \u{08} \u{0C} \n \r \t \u{0B} \\ \""),
            r#"\a \b \f \n \r \t \v \\ \""#
        );
    }

    #[test]
    fn test_encode_leaves_unicode_alone() {
        assert_eq!(encode("chaîne à traduire €"), "chaîne à traduire €");
    }

    #[test]
    fn test_decode_every_escape() {
        assert_eq!(
            decode(r#"\a \b \f \n \r \t \v \\ \""#).unwrap(),
            "\u{07} \u{08} \u{0C} \n \r \t \u{0B} \\ \""
        );
    }

    #[test]
    fn test_decode_octal() {
        assert_eq!(decode(r"\145").unwrap(), "e");
        assert_eq!(decode(r"\20254").unwrap(), "€");
    }

    #[test]
    fn test_decode_hexadecimal() {
        assert_eq!(decode(r"\x65").unwrap(), "e");
        assert_eq!(decode(r"\x20ac").unwrap(), "€");
        assert_eq!(decode(r"\x20AC").unwrap(), "€");
        assert_eq!(decode(r"\x20aC").unwrap(), "€");
    }

    #[test]
    fn test_decode_unterminated() {
        assert_eq!(decode("\\"), Err(UnescapeError::Unterminated));
        assert_eq!(decode("trailing \\"), Err(UnescapeError::Unterminated));
    }

    #[test]
    fn test_decode_invalid() {
        assert_eq!(decode("\\FAIL"), Err(UnescapeError::InvalidSequence('F')));
        assert_eq!(decode("\\xZZ"), Err(UnescapeError::InvalidSequence('x')));
        assert_eq!(
            decode("\\xD800").unwrap_err().to_string(),
            "invalid character code in escape sequence: \\xD800"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            UnescapeError::InvalidSequence('q').to_string(),
            "invalid escape sequence: \\q"
        );
    }
}
