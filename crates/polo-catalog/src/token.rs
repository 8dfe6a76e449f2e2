//! Single-line recognizer for the PO grammar.
//!
//! A line is: optional whitespace, then either a `#` comment running to the
//! end of the line, or an optional keyword with an optional `[N]` index
//! followed by an optional double-quoted string, then optional whitespace.
//! The scanner is a plain left-to-right pass, so recognition is linear in
//! the length of the line and every rejection carries a column.

use crate::error::ParseErrorKind;
use std::fmt;

/// PO keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Msgctxt,
    Msgid,
    MsgidPlural,
    Msgstr,
}

impl Keyword {
    /// Recognize a keyword identifier.
    pub fn from_ident(ident: &str) -> Option<Self> {
        match ident {
            "msgctxt" => Some(Self::Msgctxt),
            "msgid" => Some(Self::Msgid),
            "msgid_plural" => Some(Self::MsgidPlural),
            "msgstr" => Some(Self::Msgstr),
            _ => None,
        }
    }

    /// The keyword as written in a PO file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Msgctxt => "msgctxt",
            Self::Msgid => "msgid",
            Self::MsgidPlural => "msgid_plural",
            Self::Msgstr => "msgstr",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized, meaningful line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub keyword: Option<Keyword>,
    pub index: Option<usize>,
    /// Body of the quoted string, still escaped.
    pub string: Option<&'a str>,
}

/// Recognize one line. Blank and comment-only lines yield `Ok(None)`.
pub fn tokenize(line: &str) -> Result<Option<Token<'_>>, ParseErrorKind> {
    let mut scanner = Scanner { line, pos: 0 };
    scanner.skip_whitespace();

    match scanner.peek() {
        None | Some('#') => return Ok(None),
        _ => {}
    }

    let mut keyword = None;
    let mut index = None;
    if scanner.peek().is_some_and(|c| c.is_ascii_alphabetic() || c == '_') {
        let ident = scanner.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        keyword = Some(
            Keyword::from_ident(ident)
                .ok_or_else(|| ParseErrorKind::UnknownKeyword(ident.to_string()))?,
        );
        if scanner.peek() == Some('[') {
            index = Some(scanner.index()?);
        }
        scanner.skip_whitespace();
    }

    let mut string = None;
    if scanner.peek() == Some('"') {
        string = Some(scanner.quoted()?);
        scanner.skip_whitespace();
    }

    if scanner.peek().is_some() {
        return Err(scanner.syntax_error(scanner.pos));
    }

    Ok(Some(Token {
        keyword,
        index,
        string,
    }))
}

struct Scanner<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn peek(&self) -> Option<char> {
        self.line[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&predicate) {
            self.bump();
        }
        &self.line[start..self.pos]
    }

    /// `[digits]`, with the scanner on the opening bracket.
    fn index(&mut self) -> Result<usize, ParseErrorKind> {
        let start = self.pos;
        self.bump();
        let digits = self.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() || self.bump() != Some(']') {
            return Err(self.syntax_error(start));
        }
        digits.parse().map_err(|_| self.syntax_error(start))
    }

    /// Body of a quoted string, with the scanner on the opening quote.
    fn quoted(&mut self) -> Result<&'a str, ParseErrorKind> {
        let start = self.pos;
        self.bump();
        let body_start = self.pos;
        loop {
            match self.bump() {
                Some('"') => return Ok(&self.line[body_start..self.pos - 1]),
                Some('\\') => {
                    if self.bump().is_none() {
                        break;
                    }
                }
                Some(_) => {}
                None => break,
            }
        }
        Err(self.syntax_error(start))
    }

    fn syntax_error(&self, at: usize) -> ParseErrorKind {
        ParseErrorKind::Syntax {
            column: self.line[..at].chars().count(),
            text: self.line[at..].trim_end().to_string(),
        }
    }
}
