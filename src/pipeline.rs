//! Parse-and-summarize pipeline.
//!
//! `convert` reads a FASTA file, builds the length table and statistics,
//! and writes the table as CSV. Parse failures abort with a
//! [`PipelineError`]; a failed export does not, and is carried in
//! [`Conversion::export`] instead.

use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::export::{export_table, ExportError, DEFAULT_OUTPUT};
use crate::fasta::{has_fasta_extension, open_fasta, FastaError};
use crate::model::{StatsSummary, Table};
use crate::stats::{summarize, SummaryError};

/// Errors that abort the pipeline. No table is produced and no file is written.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No sequences found in FASTA file: {}", .0.display())]
    EmptyInput(PathBuf),

    #[error("Malformed FASTA file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: FastaError,
    },
}

impl PipelineError {
    fn from_fasta(path: &Path, err: FastaError) -> Self {
        match err {
            FastaError::NotFound(p) => PipelineError::NotFound(p),
            FastaError::Io(source) => PipelineError::Io {
                path: path.to_path_buf(),
                source,
            },
            err @ FastaError::MissingIdentifier { .. } => PipelineError::Malformed {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Where to write the CSV table; `None` skips the export.
    pub output: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output: Some(PathBuf::from(DEFAULT_OUTPUT)),
        }
    }
}

/// Outcome of a successful conversion.
#[derive(Debug)]
pub struct Conversion {
    pub table: Table,
    pub stats: StatsSummary,
    /// Export outcome: `None` when export was disabled.
    pub export: Option<Result<PathBuf, ExportError>>,
}

/// Reads and summarizes a FASTA file without writing anything.
pub fn analyze<P: AsRef<Path>>(path: P) -> PipelineResult<(Table, StatsSummary)> {
    let path = path.as_ref();
    if !has_fasta_extension(path) {
        warn!(
            "{} does not have a FASTA extension, parsing anyway",
            path.display()
        );
    }

    let records = open_fasta(path).map_err(|e| PipelineError::from_fasta(path, e))?;
    let (table, stats) = summarize(records).map_err(|e| match e {
        SummaryError::EmptyInput => PipelineError::EmptyInput(path.to_path_buf()),
        SummaryError::Fasta(err) => PipelineError::from_fasta(path, err),
    })?;

    info!(
        "Parsed {} records from {} (mean {:.2}, median {:.2}, mode {} x{})",
        table.len(),
        path.display(),
        stats.mean,
        stats.median,
        stats.mode,
        stats.mode_count
    );
    Ok((table, stats))
}

/// Runs the full pipeline: parse, summarize, export.
///
/// # Examples
///
/// ```no_run
/// use fasta_analyzer::pipeline::{convert, Options};
///
/// let conversion = convert("sequences.fasta", &Options::default()).unwrap();
/// println!("mean length {:.2}", conversion.stats.mean);
/// if let Some(Err(e)) = &conversion.export {
///     eprintln!("{}", e);
/// }
/// ```
pub fn convert<P: AsRef<Path>>(path: P, options: &Options) -> PipelineResult<Conversion> {
    let (table, stats) = analyze(path)?;

    let export = options.output.as_ref().map(|output| {
        let result = export_table(&table, output).map(|()| output.clone());
        if let Err(e) = &result {
            warn!("{}", e);
        }
        result
    });

    Ok(Conversion {
        table,
        stats,
        export,
    })
}
