//! Line-driven PO parser.
//!
//! The parser is a state machine fed one line at a time. Each meaningful line
//! is recognized by [`tokenize`] and then checked against the current state;
//! any keyword that is illegal where it appears fails the whole parse.

use crate::document::CatalogDocument;
use crate::error::{ParseError, ParseErrorKind};
use crate::escape;
use crate::lookup::Catalog;
use crate::token::{tokenize, Keyword};
use polo_common_fs::read_with_encoding_detection;
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    AfterMsgctxt,
    AfterMsgid,
    AfterMsgidPlural,
    AfterMsgstr,
    AfterMsgstrPlural,
}

impl State {
    fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::AfterMsgctxt => "after msgctxt",
            Self::AfterMsgid => "after msgid",
            Self::AfterMsgidPlural => "after msgid_plural",
            Self::AfterMsgstr => "after msgstr",
            Self::AfterMsgstrPlural => "after msgstr[N]",
        }
    }

    /// States in which the current entry still lacks its translation.
    fn is_incomplete(self) -> bool {
        matches!(
            self,
            Self::AfterMsgctxt | Self::AfterMsgid | Self::AfterMsgidPlural
        )
    }
}

/// Fields accumulated for the entry being read.
#[derive(Debug, Default)]
struct Pending {
    context: Option<String>,
    message: Option<String>,
    plural: Option<String>,
    translation: String,
    plural_index: usize,
    plural_translations: BTreeMap<usize, String>,
    start_line: Option<usize>,
}

/// Incremental PO parser producing a [`CatalogDocument`].
pub struct Parser<'a> {
    file: Option<&'a str>,
    document: CatalogDocument,
    state: State,
    pending: Pending,
}

impl<'a> Parser<'a> {
    /// Create a parser; `file` is only used in error messages.
    pub fn new(file: Option<&'a str>) -> Self {
        Self {
            file,
            document: CatalogDocument::new(),
            state: State::Start,
            pending: Pending::default(),
        }
    }

    /// Feed the line with the given 0-based number.
    pub fn feed(&mut self, line_number: usize, line: &str) -> Result<(), ParseError> {
        self.feed_line(line_number, line)
            .map_err(|kind| ParseError::new(self.file, Some(line_number), kind))
    }

    /// Finish the input and return the parsed document.
    pub fn finish(mut self) -> Result<CatalogDocument, ParseError> {
        if self.state.is_incomplete() {
            return Err(ParseError::new(
                self.file,
                self.pending.start_line,
                ParseErrorKind::UnexpectedEof,
            ));
        }
        self.flush();
        Ok(self.document)
    }

    fn feed_line(&mut self, line_number: usize, line: &str) -> Result<(), ParseErrorKind> {
        let Some(token) = tokenize(line)? else {
            return Ok(());
        };

        let Some(keyword) = token.keyword else {
            return match token.string {
                Some(text) => self.continue_string(text),
                None => Ok(()),
            };
        };

        if !self.accepts(keyword, token.index) {
            return Err(match (keyword, self.state) {
                (Keyword::Msgstr, State::AfterMsgidPlural | State::AfterMsgstrPlural) => {
                    ParseErrorKind::MissingIndex
                }
                _ => ParseErrorKind::UnexpectedKeyword(keyword),
            });
        }
        let text = token.string.ok_or(ParseErrorKind::MissingString(keyword))?;
        if token.index.is_some() && keyword != Keyword::Msgstr {
            return Err(ParseErrorKind::UnexpectedIndex(keyword));
        }
        let text = decode(text)?;

        match (keyword, token.index) {
            (Keyword::Msgctxt, _) => {
                self.flush();
                self.pending.context = Some(text);
                self.pending.start_line = Some(line_number);
                self.state = State::AfterMsgctxt;
            }
            (Keyword::Msgid, _) => {
                if self.state != State::AfterMsgctxt {
                    self.flush();
                    self.pending.start_line = Some(line_number);
                }
                self.pending.message = Some(text);
                self.state = State::AfterMsgid;
            }
            (Keyword::MsgidPlural, _) => {
                self.pending.plural = Some(text);
                self.state = State::AfterMsgidPlural;
            }
            (Keyword::Msgstr, None) => {
                self.pending.translation = text;
                self.state = State::AfterMsgstr;
            }
            (Keyword::Msgstr, Some(index)) => {
                if self.pending.plural_translations.contains_key(&index) {
                    return Err(ParseErrorKind::DuplicateIndex(index));
                }
                self.pending.plural_index = index;
                self.pending.plural_translations.insert(index, text);
                self.state = State::AfterMsgstrPlural;
            }
        }
        Ok(())
    }

    /// Whether `keyword` may appear in the current state.
    fn accepts(&self, keyword: Keyword, index: Option<usize>) -> bool {
        use State::*;
        match keyword {
            Keyword::Msgctxt => matches!(self.state, Start | AfterMsgstr | AfterMsgstrPlural),
            Keyword::Msgid => matches!(
                self.state,
                Start | AfterMsgctxt | AfterMsgstr | AfterMsgstrPlural
            ),
            Keyword::MsgidPlural => self.state == AfterMsgid,
            Keyword::Msgstr if index.is_none() => self.state == AfterMsgid,
            Keyword::Msgstr => matches!(self.state, AfterMsgid | AfterMsgidPlural | AfterMsgstrPlural),
        }
    }

    fn continue_string(&mut self, text: &str) -> Result<(), ParseErrorKind> {
        let target = match self.state {
            State::Start => return Err(ParseErrorKind::UnexpectedContinuation(self.state.name())),
            State::AfterMsgctxt => self.pending.context.get_or_insert_with(String::new),
            State::AfterMsgid => self.pending.message.get_or_insert_with(String::new),
            State::AfterMsgidPlural => self.pending.plural.get_or_insert_with(String::new),
            State::AfterMsgstr => &mut self.pending.translation,
            State::AfterMsgstrPlural => self
                .pending
                .plural_translations
                .entry(self.pending.plural_index)
                .or_default(),
        };
        target.push_str(&decode(text)?);
        Ok(())
    }

    /// Commit the pending entry, or the header if its message is empty.
    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        let state = std::mem::replace(&mut self.state, State::Start);
        let Some(message) = pending.message else {
            return;
        };

        if message.is_empty() {
            let header = match state {
                State::AfterMsgstrPlural => pending.plural_translations.get(&0).cloned().unwrap_or_default(),
                _ => pending.translation,
            };
            for line in header.split('\n').filter(|line| !line.is_empty()) {
                let (field, value) = line.split_once(':').unwrap_or((line, ""));
                self.document.add_header_field(field, value.trim());
            }
            return;
        }

        let entry = self.document.add_entry(
            &message,
            pending.plural.as_deref(),
            pending.context.as_deref(),
        );
        match state {
            State::AfterMsgstr => entry.add_translation(pending.translation),
            State::AfterMsgstrPlural => {
                for (index, text) in pending.plural_translations {
                    entry.add_plural_translation(index, text);
                }
            }
            _ => {}
        }
    }
}

fn decode(text: &str) -> Result<String, ParseErrorKind> {
    escape::decode(text).map_err(ParseErrorKind::Escape)
}

/// Parse PO content held in memory.
pub fn parse_str(content: &str, file: Option<&str>) -> Result<CatalogDocument, ParseError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut parser = Parser::new(file);
    for (line_number, line) in content.lines().enumerate() {
        parser.feed(line_number, line)?;
    }
    parser.finish()
}

/// Parse PO content from an open reader.
pub fn parse_reader<R: BufRead>(reader: R, file: Option<&str>) -> Result<CatalogDocument, ParseError> {
    let mut parser = Parser::new(file);
    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ParseError::new(file, Some(line_number), ParseErrorKind::Io(e)))?;
        let line = match line_number {
            0 => line.strip_prefix('\u{feff}').unwrap_or(&line).to_string(),
            _ => line,
        };
        parser.feed(line_number, &line)?;
    }
    parser.finish()
}

/// Parse a PO file from disk.
///
/// Content that is not valid UTF-8 is read as latin-1.
pub fn parse_file(path: impl AsRef<Path>) -> Result<CatalogDocument, ParseError> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let content = read_with_encoding_detection(path)
        .map_err(|e| ParseError::new(Some(&name), None, ParseErrorKind::Io(e.into_source())))?;
    let document = parse_str(&content, Some(&name))?;
    tracing::debug!(path = %name, entries = document.len(), "parsed catalog");
    Ok(document)
}

/// Parse a PO file and overlay it onto `document`.
///
/// `document` is left untouched when parsing fails.
pub fn parse_file_into(document: &mut CatalogDocument, path: impl AsRef<Path>) -> Result<(), ParseError> {
    let parsed = parse_file(path)?;
    document.merge(&parsed);
    Ok(())
}

/// Parse a PO file straight into a lookup table.
pub fn parse_file_to_lookup(path: impl AsRef<Path>) -> Result<Catalog, ParseError> {
    Ok(parse_file(path)?.to_lookup())
}
