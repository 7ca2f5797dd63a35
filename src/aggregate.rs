/*!
 * Content aggregation: resolves each listed file's body and formats its section
 */

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::types::{ContentMode, FileRecord};
use crate::utils::format_file_size;

/// Body shown for exist-only files
pub const EXISTENCE_PLACEHOLDER: &str = "[File exists - content not read per configuration]";

/// Body shown for allowed files that are not text
pub const BINARY_PLACEHOLDER: &str = "[Binary / asset file - content not displayed]";

/// Horizontal rule around section headers
pub const SECTION_RULE: &str =
    "################################################################################";

/// Read primitive: whole-file text or a failure
pub trait ReadText {
    /// Read `path` and decode it as UTF-8
    fn read_text(&self, path: &Path) -> io::Result<String>;

    /// Size of `path` in bytes
    fn file_size(&self, path: &Path) -> io::Result<u64> {
        fs::metadata(path).map(|m| m.len())
    }
}

/// Reads from the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl ReadText for FsReader {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        let bytes = fs::read(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// How a file's body was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Embedded verbatim
    Text,
    /// Exist-only placeholder
    ExistenceOnly,
    /// Binary placeholder
    Binary,
    /// Above the configured size ceiling
    TooLarge,
    /// Read or decode failed; reason is inline
    Unreadable,
}

/// Resolved body of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Text placed in the document
    pub body: String,
    /// How it was obtained
    pub outcome: Outcome,
}

/// One formatted file section
#[derive(Debug, Clone)]
pub struct Section {
    /// 1-based position in the file list
    pub index: usize,
    /// Relative path of the file
    pub rel_path: String,
    /// Formatted block (header, body and trailing blank lines)
    pub text: String,
    /// How the body was obtained
    pub outcome: Outcome,
    /// Lines in the embedded body (0 for placeholders)
    pub lines: usize,
}

/// Running totals over resolved sections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentStats {
    /// Files embedded as text
    pub text: usize,
    /// Exist-only files
    pub existence_only: usize,
    /// Binary placeholders
    pub binary: usize,
    /// Files above the size ceiling
    pub too_large: usize,
    /// Read or decode failures
    pub unreadable: usize,
    /// Lines of embedded text
    pub total_lines: usize,
}

impl ContentStats {
    /// Account for one section
    pub fn record(&mut self, section: &Section) {
        match section.outcome {
            Outcome::Text => self.text += 1,
            Outcome::ExistenceOnly => self.existence_only += 1,
            Outcome::Binary => self.binary += 1,
            Outcome::TooLarge => self.too_large += 1,
            Outcome::Unreadable => self.unreadable += 1,
        }
        self.total_lines += section.lines;
    }

    /// Number of sections recorded
    pub fn files(&self) -> usize {
        self.text + self.existence_only + self.binary + self.too_large + self.unreadable
    }
}

/// Resolves file bodies through a read primitive
pub struct ContentAggregator<R = FsReader> {
    reader: R,
    max_file_size: Option<u64>,
}

impl Default for ContentAggregator<FsReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentAggregator<FsReader> {
    /// Aggregator reading from the filesystem
    pub fn new() -> Self {
        Self::with_reader(FsReader)
    }
}

impl<R: ReadText> ContentAggregator<R> {
    /// Aggregator with a custom read primitive
    pub fn with_reader(reader: R) -> Self {
        Self {
            reader,
            max_file_size: None,
        }
    }

    /// Replace text bodies larger than `limit` bytes with a placeholder
    pub fn with_max_file_size(mut self, limit: Option<u64>) -> Self {
        self.max_file_size = limit;
        self
    }

    /// Resolve the body of one record. Never fails.
    pub fn resolve(&self, record: &FileRecord) -> Resolved {
        match record.mode {
            ContentMode::ExistenceOnly => Resolved {
                body: EXISTENCE_PLACEHOLDER.to_string(),
                outcome: Outcome::ExistenceOnly,
            },
            ContentMode::Binary => Resolved {
                body: BINARY_PLACEHOLDER.to_string(),
                outcome: Outcome::Binary,
            },
            ContentMode::Text => self.read(&record.path),
        }
    }

    fn read(&self, path: &Path) -> Resolved {
        if let Some(limit) = self.max_file_size {
            if let Ok(size) = self.reader.file_size(path) {
                if size > limit {
                    return Resolved {
                        body: format!(
                            "[File too large to include content - {} exceeds the {} limit]",
                            format_file_size(size),
                            format_file_size(limit)
                        ),
                        outcome: Outcome::TooLarge,
                    };
                }
            }
        }

        match self.reader.read_text(path) {
            Ok(body) => Resolved {
                body,
                outcome: Outcome::Text,
            },
            Err(e) => {
                debug!(path = %path.display(), error = %e, "content not readable");
                let kind = match e.kind() {
                    io::ErrorKind::InvalidData => "encoding error",
                    _ => "read error",
                };
                Resolved {
                    body: format!("[Could not read file content - {}: {}]", kind, e),
                    outcome: Outcome::Unreadable,
                }
            }
        }
    }

    /// Resolve and format the section for the record at 1-based `index`
    pub fn section(&self, index: usize, record: &FileRecord) -> Section {
        let resolved = self.resolve(record);
        let lines = match resolved.outcome {
            Outcome::Text => resolved.body.lines().count(),
            _ => 0,
        };
        let text = [
            SECTION_RULE.to_string(),
            format!("## FILE {}: {}", index, record.name()),
            format!("## Path: {}", record.rel_path),
            format!("{}\n", SECTION_RULE),
            resolved.body,
            "\n\n".to_string(),
        ]
        .join("\n");

        Section {
            index,
            rel_path: record.rel_path.clone(),
            text,
            outcome: resolved.outcome,
            lines,
        }
    }

    /// Lazily produce sections in list order, numbered from 1
    pub fn sections<'a>(
        &'a self,
        records: &'a [FileRecord],
    ) -> impl Iterator<Item = Section> + 'a {
        records
            .iter()
            .enumerate()
            .map(move |(i, record)| self.section(i + 1, record))
    }
}
