//! Structured-entry detection within raw lines.
//!
//! Test-runner output multiplexes several processes into one stream, so a
//! structured entry frequently arrives behind a prefix such as
//! `[js_test:auth] d20021| `. The segmenter finds the first
//! [`ENTRY_MARKER`], keeps everything before it byte-for-byte, and hands the
//! rest to the [`entry`](crate::entry) formatter.

use std::borrow::Cow;

use crate::entry::{FormattedEntry, StructuredEntry};
use crate::error::EntryError;

/// Literal start of every structured log entry.
pub const ENTRY_MARKER: &str = r#"{"t":{"$date"#;

/// The classification of a raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Entire line is a structured entry.
    Structured(FormattedEntry),
    /// Line has non-log text before a structured entry.
    Embedded {
        prefix: String,
        entry: FormattedEntry,
    },
    /// Line contains no structured entry and is passed through unmodified.
    Raw,
}

impl LineKind {
    /// The formatted entry, if any.
    pub fn entry(&self) -> Option<&FormattedEntry> {
        match self {
            Self::Structured(entry) | Self::Embedded { entry, .. } => Some(entry),
            Self::Raw => None,
        }
    }

    /// The display text for `line` under this classification.
    pub fn into_text(self, line: &str) -> Cow<'_, str> {
        match self {
            Self::Structured(entry) => Cow::Owned(entry.text),
            Self::Embedded { prefix, entry } => Cow::Owned(prefix + &entry.text),
            Self::Raw => Cow::Borrowed(line),
        }
    }
}

/// Classify a single line (newline already stripped).
///
/// Detection strategy:
/// 1. Line starts with [`ENTRY_MARKER`] → the whole line is an entry
/// 2. Marker appears later → prefix + entry
/// 3. No marker → [`LineKind::Raw`]
///
/// Returns an error when the marker is present but the entry is malformed;
/// the caller decides how to recover.
pub fn segment_line(line: &str) -> Result<LineKind, EntryError> {
    match line.find(ENTRY_MARKER) {
        Some(0) => Ok(LineKind::Structured(StructuredEntry::parse(line)?.render())),
        Some(pos) => {
            let entry = StructuredEntry::parse(&line[pos..])?.render();
            Ok(LineKind::Embedded {
                prefix: line[..pos].to_string(),
                entry,
            })
        }
        None => Ok(LineKind::Raw),
    }
}

/// Render a line to its display form: `prefix + formatted entry`, or the
/// line itself when it holds no structured entry.
pub fn fuzzy_log_to_str(line: &str) -> Result<Cow<'_, str>, EntryError> {
    Ok(segment_line(line)?.into_text(line))
}
