//! CSV export of the length table.
//!
//! The file has a header row `Id,Sequence,Length` and one line per record,
//! in parse order. Fields are quoted only when they contain a comma, a
//! quote or a line break.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::model::Table;

/// Default CSV destination, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "project_output.csv";

/// Writing the table failed. The computed table and statistics stay valid.
#[derive(Error, Debug)]
#[error("Failed to export table to {}: {source}", path.display())]
pub struct ExportError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

fn csv_escape(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Serializes the table as CSV into any writer.
pub fn write_table_csv<W: Write>(table: &Table, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{}", Table::COLUMNS.join(","))?;
    for row in table.rows() {
        writeln!(
            writer,
            "{},{},{}",
            csv_escape(&row.id),
            csv_escape(&row.sequence),
            row.length
        )?;
    }
    writer.flush()
}

/// Writes the table to `path`, replacing any existing file.
pub fn export_table<P: AsRef<Path>>(table: &Table, path: P) -> ExportResult<()> {
    let path = path.as_ref();
    let wrap = |source| ExportError {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(wrap)?;
    write_table_csv(table, BufWriter::new(file)).map_err(wrap)?;
    info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, Row};

    fn table(pairs: &[(&str, &str)]) -> Table {
        pairs
            .iter()
            .map(|(id, seq)| Row::from(Record::new(*id, *seq)))
            .collect()
    }

    fn to_string(table: &Table) -> String {
        let mut buf = Vec::new();
        write_table_csv(table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_csv_layout() {
        let t = table(&[("seq1", "ACGT"), ("seq2", "ACG"), ("seq3", "ACGTAC")]);
        assert_eq!(
            to_string(&t),
            "Id,Sequence,Length\nseq1,ACGT,4\nseq2,ACG,3\nseq3,ACGTAC,6\n"
        );
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_quoted_identifier_in_row() {
        let t = table(&[("gi|12,34", "AC")]);
        assert_eq!(to_string(&t), "Id,Sequence,Length\n\"gi|12,34\",AC,2\n");
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.csv");
        let err = export_table(&table(&[("a", "A")]), &path).unwrap_err();
        assert_eq!(err.path, path);
        assert!(err.to_string().contains("out.csv"));
    }

    #[test]
    fn test_export_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale content that is longer than the table\n").unwrap();

        export_table(&table(&[("a", "A")]), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Id,Sequence,Length\na,A,1\n");
    }
}
