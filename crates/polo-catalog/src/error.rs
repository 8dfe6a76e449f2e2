//! Parse errors.

use crate::escape::UnescapeError;
use crate::token::Keyword;
use std::fmt;
use thiserror::Error;

/// Broad classification of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The line does not match the line grammar.
    Syntax,
    /// The line is well formed but illegal where it appears.
    Structural,
    /// Input ended in the middle of an entry.
    Truncation,
    /// The input could not be read.
    Io,
}

/// What went wrong while parsing.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("invalid syntax at column {column}: {text}")]
    Syntax { column: usize, text: String },

    #[error("unknown keyword: {0}")]
    UnknownKeyword(String),

    #[error("unexpected keyword: {0}")]
    UnexpectedKeyword(Keyword),

    #[error("missing string after keyword: {0}")]
    MissingString(Keyword),

    #[error("missing plural message index after keyword")]
    MissingIndex,

    #[error("unexpected plural message index after keyword: {0}")]
    UnexpectedIndex(Keyword),

    #[error("duplicate plural message index: {0}")]
    DuplicateIndex(usize),

    #[error("unexpected string continuation after '{0}'")]
    UnexpectedContinuation(&'static str),

    #[error("malformed string: {0}")]
    Escape(#[source] UnescapeError),

    #[error("unexpected end of file")]
    UnexpectedEof,

    #[error("failed to read catalog: {0}")]
    Io(#[source] std::io::Error),
}

impl ParseErrorKind {
    /// Classify this failure.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Syntax { .. } | Self::UnknownKeyword(_) | Self::UnexpectedContinuation(_) => {
                ErrorCategory::Syntax
            }
            Self::UnexpectedEof => ErrorCategory::Truncation,
            Self::Io(_) => ErrorCategory::Io,
            _ => ErrorCategory::Structural,
        }
    }
}

/// A parse failure located in a file and on a 0-based line.
#[derive(Debug)]
pub struct ParseError {
    pub file: Option<String>,
    pub line: Option<usize>,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(file: Option<&str>, line: Option<usize>, kind: ParseErrorKind) -> Self {
        Self {
            file: file.map(str::to_string),
            line,
            kind,
        }
    }

    /// Classify this failure.
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{file}:{line}: {}", self.kind),
            (Some(file), None) => write!(f, "{file}: {}", self.kind),
            (None, Some(line)) => write!(f, "line {line}: {}", self.kind),
            (None, None) => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}
