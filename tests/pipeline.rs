use std::fs;
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use tempfile::TempDir;

use fasta_analyzer::export::ExportError;
use fasta_analyzer::pipeline::{analyze, convert, Options, PipelineError};

const REFERENCE: &str = ">seq1 desc\nACGT\n>seq2\nACG\n>seq3\nACGTAC\n";

fn write_input(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn options_in(dir: &Path) -> Options {
    Options {
        output: Some(dir.join("project_output.csv")),
    }
}

#[test]
fn reference_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "ref.fasta", REFERENCE.as_bytes());
    let options = options_in(dir.path());

    let conversion = convert(&input, &options).unwrap();

    let rows: Vec<(&str, &str, usize)> = conversion
        .table
        .rows()
        .iter()
        .map(|r| (r.id.as_str(), r.sequence.as_str(), r.length))
        .collect();
    assert_eq!(
        rows,
        vec![("seq1", "ACGT", 4), ("seq2", "ACG", 3), ("seq3", "ACGTAC", 6)]
    );
    assert_relative_eq!(conversion.stats.mean, 4.333333333333333, epsilon = 1e-12);
    assert_eq!(conversion.stats.median, 4.0);
    assert_eq!(conversion.stats.mode, 6);
    assert_eq!(conversion.stats.mode_count, 1);

    let written = conversion.export.unwrap().unwrap();
    assert_eq!(
        fs::read_to_string(written).unwrap(),
        "Id,Sequence,Length\nseq1,ACGT,4\nseq2,ACG,3\nseq3,ACGTAC,6\n"
    );
}

#[test]
fn row_count_matches_headers_and_lengths_match_sequences() {
    let dir = tempfile::tempdir().unwrap();
    let content = "junk before\n>a x y z\nAC\nGT\n\n>b\n>c\nA C G\n>d\nacgtn\nNNNN\n";
    let input = write_input(&dir, "mixed.fa", content.as_bytes());

    let (table, stats) = analyze(&input).unwrap();

    let headers = content.lines().filter(|l| l.starts_with('>')).count();
    assert_eq!(table.len(), headers);
    for row in table.rows() {
        assert_eq!(row.length, row.sequence.chars().count());
    }
    let total: usize = table.lengths().iter().sum();
    assert_relative_eq!(stats.mean, total as f64 / table.len() as f64);
}

#[test]
fn multiline_sequence_is_concatenated() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "multi.fna", b">long\nACGTACGTAC\nGTACGTACGT\nAC\n>short\nA\n");

    let (table, stats) = analyze(&input).unwrap();
    assert_eq!(table.get(0).unwrap().sequence, "ACGTACGTACGTACGTACGTAC");
    assert_eq!(table.get(0).unwrap().length, 22);
    assert_eq!(stats.median, 11.5);
}

#[test]
fn mode_tie_breaks_to_largest_length() {
    let dir = tempfile::tempdir().unwrap();
    let content = ">a\nAAA\n>b\nCCC\n>c\nGGGGG\n>d\nTTTTT\n>e\nAAAAAAA\n";
    let input = write_input(&dir, "ties.fa", content.as_bytes());

    let (_, stats) = analyze(&input).unwrap();
    assert_eq!(stats.mode, 5);
    assert_eq!(stats.mode_count, 2);
    assert_eq!(stats.median, 5.0);
}

#[test]
fn running_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "ref.fasta", REFERENCE.as_bytes());
    let options = options_in(dir.path());

    let first = convert(&input, &options).unwrap();
    let first_bytes = fs::read(first.export.unwrap().unwrap()).unwrap();
    let second = convert(&input, &options).unwrap();
    let second_bytes = fs::read(second.export.unwrap().unwrap()).unwrap();

    assert_eq!(first_bytes, second_bytes);
    assert_eq!(first.stats, second.stats);
    assert_eq!(first.table, second.table);
}

#[test]
fn empty_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "empty.fasta", b"no headers here\nACGT\n");
    let options = options_in(dir.path());

    let err = convert(&input, &options).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyInput(_)));
    assert!(err.to_string().contains("No sequences found"));
    assert!(!options.output.unwrap().exists());
}

#[test]
fn zero_byte_file_is_empty_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "zero.fa", b"");
    assert!(matches!(analyze(&input), Err(PipelineError::EmptyInput(_))));
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(dir.path());

    let err = convert(dir.path().join("absent.fasta"), &options).unwrap_err();
    assert!(matches!(err, PipelineError::NotFound(_)));
    assert!(err.to_string().starts_with("File not found"));
    assert!(!options.output.unwrap().exists());
}

#[test]
fn directory_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = analyze(dir.path()).unwrap_err();
    assert!(matches!(err, PipelineError::NotFound(_)));
}

#[test]
fn undecodable_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "binary.fa", b">seq1\nAC\xff\xfe\n");
    let options = options_in(dir.path());

    let err = convert(&input, &options).unwrap_err();
    assert!(matches!(err, PipelineError::Io { .. }));
    assert!(err.to_string().starts_with("Could not read"));
    assert!(!options.output.unwrap().exists());
}

#[test]
fn header_without_identifier_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "bad.fa", b">ok\nAC\n>\nGT\n");
    assert!(matches!(
        analyze(&input),
        Err(PipelineError::Malformed { .. })
    ));
}

#[test]
fn export_failure_keeps_results() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "ref.fasta", REFERENCE.as_bytes());
    let options = Options {
        output: Some(dir.path().join("missing_dir").join("out.csv")),
    };

    let conversion = convert(&input, &options).unwrap();
    assert_eq!(conversion.table.len(), 3);
    assert_eq!(conversion.stats.mode, 6);
    let err: ExportError = conversion.export.unwrap().unwrap_err();
    assert!(err.to_string().starts_with("Failed to export table"));
}

#[test]
fn export_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "ref.fasta", REFERENCE.as_bytes());

    let conversion = convert(&input, &Options { output: None }).unwrap();
    assert!(conversion.export.is_none());
    assert!(!dir.path().join("project_output.csv").exists());
}

#[test]
fn extension_does_not_decide_validity() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "sequences.txt", REFERENCE.as_bytes());
    let (table, _) = analyze(&input).unwrap();
    assert_eq!(table.len(), 3);
}
