//! The flat corpus format: one record per line, `title`, `content` and `url`
//! joined by [`FIELD_SEPARATOR`].

use crate::error::RecordError;
use std::io::{self, Write};

/// Reserved byte between fields of a corpus record.
pub const FIELD_SEPARATOR: char = '\x03';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusRecord {
    pub title: String,
    pub content: String,
    pub url: String,
}

impl CorpusRecord {
    pub fn new(title: impl Into<String>, content: impl Into<String>, url: impl Into<String>) -> Self {
        Self { title: title.into(), content: content.into(), url: url.into() }
    }

    /// Split one corpus line (without its trailing newline) into a record.
    /// Empty fields are kept; only the field count is validated.
    pub fn parse_line(line: &str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        match fields.as_slice() {
            [title, content, url] => Ok(Self::new(*title, *content, *url)),
            _ => Err(RecordError::FieldCount { found: fields.len() }),
        }
    }

    /// Write the record as a single newline-terminated line. Fields are
    /// sanitized so the output always parses back into three fields.
    pub fn write_line<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let sep = FIELD_SEPARATOR.to_string();
        let line = [sanitize_field(&self.title), sanitize_field(&self.content), sanitize_field(&self.url)].join(&sep);
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")
    }
}

/// Replace characters that would break the line format (newlines and the
/// reserved separator) with spaces.
pub fn sanitize_field(field: &str) -> String {
    field
        .chars()
        .map(|c| match c {
            '\n' | '\r' | FIELD_SEPARATOR => ' ',
            other => other,
        })
        .collect()
}
