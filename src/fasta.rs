//! FASTA file parser.
//!
//! This module reads FASTA format text and yields records one at a time.
//! It supports both single-line and multi-line sequences.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGTACGTACGT...
//! >another_sequence
//! TGCATGCATGCA...
//! ```
//!
//! Lines before the first header and blank lines are skipped. Whatever
//! follows the identifier on a header line is dropped.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::model::Record;

/// Extensions conventionally used for FASTA files.
const FASTA_EXTENSIONS: &[&str] = &["fasta", "fa", "fna", "fas", "faa", "ffn", "frn"];

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read file: {0}")]
    Io(#[from] io::Error),

    /// A `>` line with nothing after it. Biopython-style readers keep such
    /// a record with an empty id; here it is rejected so every row has a
    /// non-empty identifier.
    #[error("Header without identifier at line {line}")]
    MissingIdentifier { line: usize },
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Lazy, forward-only iterator over the records of a FASTA source.
///
/// The iterator owns the reader; dropping it closes the underlying file.
/// After the first error it yields `None`.
pub struct FastaRecords<R: BufRead> {
    lines: Lines<R>,
    line_number: usize,
    current_id: Option<String>,
    current_seq: String,
    done: bool,
}

impl<R: BufRead> FastaRecords<R> {
    /// Creates a record iterator over any buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            current_id: None,
            current_seq: String::new(),
            done: false,
        }
    }

    /// Takes the record being accumulated, if any.
    fn finish_current(&mut self) -> Option<Record> {
        let id = self.current_id.take()?;
        let record = Record::new(id, std::mem::take(&mut self.current_seq));
        debug!("record {} ({} residues)", record.id, record.len());
        Some(record)
    }

    fn fail(&mut self, err: FastaError) -> Option<FastaResult<Record>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<R: BufRead> Iterator for FastaRecords<R> {
    type Item = FastaResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => return self.fail(FastaError::Io(e)),
                None => {
                    self.done = true;
                    return self.finish_current().map(Ok);
                }
            };
            self.line_number += 1;

            // Skip empty lines
            if line.trim().is_empty() {
                continue;
            }

            // Only a '>' in the first column opens a record
            if let Some(header) = line.trim_end_matches('\r').strip_prefix('>') {
                let Some(id) = header.split_whitespace().next() else {
                    let line = self.line_number;
                    return self.fail(FastaError::MissingIdentifier { line });
                };
                let id = id.to_string();

                let previous = self.finish_current();
                self.current_id = Some(id);
                if let Some(record) = previous {
                    return Some(Ok(record));
                }
            } else if self.current_id.is_some() {
                // Append sequence data (removing any whitespace)
                let line = line.trim();
                if line.bytes().all(|b| !b.is_ascii_whitespace()) {
                    self.current_seq.push_str(line);
                } else {
                    self.current_seq
                        .extend(line.chars().filter(|c| !c.is_whitespace()));
                }
            }
            // Text before the first header is ignored
        }
    }
}

/// Opens a FASTA file for lazy reading.
///
/// A missing path (or one that is not a regular file) gives
/// [`FastaError::NotFound`]; any other failure to open gives
/// [`FastaError::Io`].
///
/// # Examples
///
/// ```no_run
/// use fasta_analyzer::fasta::open_fasta;
///
/// for record in open_fasta("sequences.fasta").unwrap() {
///     let record = record.unwrap();
///     println!("{}\t{}", record.id, record.len());
/// }
/// ```
pub fn open_fasta<P: AsRef<Path>>(path: P) -> FastaResult<FastaRecords<BufReader<File>>> {
    let path = path.as_ref();
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(FastaError::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(FastaError::Io(e)),
    };
    if !metadata.is_file() {
        return Err(FastaError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    Ok(FastaRecords::new(BufReader::new(file)))
}

/// Parses FASTA content from a string.
///
/// Useful for testing or processing in-memory data.
pub fn parse_fasta_str(content: &str) -> FastaResult<Vec<Record>> {
    FastaRecords::new(content.as_bytes()).collect()
}

/// Returns true if the path carries a conventional FASTA extension.
///
/// Only used for diagnostics: the content decides whether a file parses.
pub fn has_fasta_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(OsStr::to_str)
        .map(|ext| FASTA_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
