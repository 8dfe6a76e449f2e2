//! Canonical PO rendering of a [`CatalogDocument`].

use crate::document::{CatalogDocument, Location, TranslationEntry};
use crate::escape::encode;
use std::fmt::{self, Write};

/// Plural slots shown for plural entries when the header declares none.
const MIN_NPLURALS: usize = 2;

/// Options controlling how a document is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Emit `#: file:line` comments for referenced entries.
    pub include_locations: bool,
    /// Drop entries no longer referenced by any source.
    pub prune_obsoletes: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            include_locations: true,
            prune_obsoletes: false,
        }
    }
}

/// A document paired with the options it is rendered with.
struct Rendered<'a> {
    document: &'a CatalogDocument,
    options: &'a SerializeOptions,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.document.write_to(f, self.options)
    }
}

impl CatalogDocument {
    /// Render this document as PO text.
    pub fn serialize(&self, options: &SerializeOptions) -> String {
        Rendered {
            document: self,
            options,
        }
        .to_string()
    }

    /// Render this document into `out`.
    ///
    /// Entries are ordered by locations, then context, then message, so the
    /// output does not depend on insertion order.
    pub fn write_to<W: Write>(&self, out: &mut W, options: &SerializeOptions) -> fmt::Result {
        let mut needs_blank_line = false;
        if !self.header_fields().is_empty() {
            writeln!(out, "msgid \"\"")?;
            writeln!(out, "msgstr \"\"")?;
            for (field, value) in self.header_fields() {
                writeln!(out, "\"{}\"", encode(&format!("{field}: {value}\n")))?;
            }
            needs_blank_line = true;
        }

        let nplurals = self.get_nplurals();
        let mut entries: Vec<&TranslationEntry> = self.entries().collect();
        entries.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

        for entry in entries {
            if write_entry(out, entry, nplurals, options, needs_blank_line)? {
                needs_blank_line = true;
            }
        }
        Ok(())
    }
}

fn sort_key(entry: &TranslationEntry) -> (&[Location], &str, &str, bool) {
    (
        entry.locations.as_slice(),
        entry.context.as_deref().unwrap_or(""),
        &entry.message,
        entry.context.is_some(),
    )
}

/// Write one entry, preceded by a blank line when `separate` is set.
///
/// Returns whether the entry was written.
fn write_entry<W: Write>(
    out: &mut W,
    entry: &TranslationEntry,
    nplurals: Option<usize>,
    options: &SerializeOptions,
    separate: bool,
) -> Result<bool, fmt::Error> {
    let obsolete = entry.is_obsolete();
    if obsolete && (options.prune_obsoletes || entry.is_untranslated()) {
        return Ok(false);
    }

    if separate {
        writeln!(out)?;
    }
    if obsolete {
        writeln!(out, "#. obsolete entry")?;
    }
    if options.include_locations && !obsolete {
        let locations: Vec<String> = entry.locations.iter().map(ToString::to_string).collect();
        writeln!(out, "#: {}", locations.join(" "))?;
    }
    if let Some(context) = &entry.context {
        write_quoted(out, "msgctxt", context)?;
    }
    write_quoted(out, "msgid", &entry.message)?;

    match &entry.plural {
        Some(plural) => {
            write_quoted(out, "msgid_plural", plural)?;
            let count = nplurals.filter(|&declared| declared > 0).unwrap_or_else(|| {
                entry
                    .translations
                    .keys()
                    .next_back()
                    .map_or(MIN_NPLURALS, |&highest| (highest + 1).max(MIN_NPLURALS))
            });
            for index in 0..count {
                let text = entry.translations.get(&index).map_or("", String::as_str);
                write_quoted(out, &format!("msgstr[{index}]"), text)?;
            }
        }
        None => {
            let text = entry.translations.get(&0).map_or("", String::as_str);
            write_quoted(out, "msgstr", text)?;
        }
    }
    Ok(true)
}

/// Write `keyword "text"`, splitting text with embedded newlines one line per
/// quoted string after an empty leading string.
fn write_quoted<W: Write>(out: &mut W, keyword: &str, text: &str) -> fmt::Result {
    if !text.trim_matches('\n').contains('\n') {
        return writeln!(out, "{keyword} \"{}\"", encode(text));
    }
    writeln!(out, "{keyword} \"\"")?;
    for line in text.split_inclusive('\n') {
        writeln!(out, "\"{}\"", encode(line))?;
    }
    Ok(())
}
