//! PO catalog engine for polo.
//!
//! Parses gettext PO files into a [`CatalogDocument`], renders documents back
//! to canonical PO text and flattens them into [`Catalog`] lookup tables.

pub mod document;
pub mod error;
pub mod escape;
pub mod lookup;
pub mod parser;
pub mod serializer;
pub mod token;

pub use document::{message_key, CatalogDocument, Location, TranslationEntry, CONTEXT_SEPARATOR};
pub use error::{ErrorCategory, ParseError, ParseErrorKind};
pub use escape::{decode, encode, UnescapeError};
pub use lookup::{Catalog, LookupKey};
pub use parser::{parse_file, parse_file_into, parse_file_to_lookup, parse_reader, parse_str, Parser};
pub use serializer::SerializeOptions;
pub use token::Keyword;
