//! Plain-text report for non-interactive use.

use std::io::{self, Write};

use crate::model::{StatsSummary, Table};

/// Sequences longer than this are cut in the report.
pub const SEQUENCE_PREVIEW: usize = 60;

/// Shortens a sequence for display, marking the cut with `...`.
pub fn preview(sequence: &str, max: usize) -> String {
    if sequence.chars().count() <= max {
        return sequence.to_string();
    }
    let cut: String = sequence.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}

/// Formats the statistics block shown under the table.
pub fn format_stats(stats: &StatsSummary) -> String {
    format!(
        "Mean   : {:.2}\nMedian : {:.2}\nMode   : {} (count={})",
        stats.mean, stats.median, stats.mode, stats.mode_count
    )
}

/// Writes the table (id, length, sequence preview) followed by the statistics.
pub fn write_report<W: Write>(table: &Table, stats: &StatsSummary, mut out: W) -> io::Result<()> {
    let id_width = table.max_id_length().max(Table::COLUMNS[0].len());

    writeln!(out, "{:<id_width$}\tLength\tSequence", Table::COLUMNS[0])?;
    for row in table.rows() {
        writeln!(
            out,
            "{:<id_width$}\t{}\t{}",
            row.id,
            row.length,
            preview(&row.sequence, SEQUENCE_PREVIEW)
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{}", format_stats(stats))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, Row};

    #[test]
    fn test_preview() {
        assert_eq!(preview("ACGT", 10), "ACGT");
        assert_eq!(preview("ACGTACGTAC", 10), "ACGTACGTAC");
        assert_eq!(preview("ACGTACGTACG", 10), "ACGTACG...");
    }

    #[test]
    fn test_format_stats_precision() {
        let stats = StatsSummary {
            mean: 13.0 / 3.0,
            median: 4.0,
            mode: 6,
            mode_count: 1,
        };
        assert_eq!(
            format_stats(&stats),
            "Mean   : 4.33\nMedian : 4.00\nMode   : 6 (count=1)"
        );
    }

    #[test]
    fn test_report_lists_rows_in_order() {
        let table: Table = vec![
            Row::from(Record::new("seq1", "ACGT")),
            Row::from(Record::new("seq2", "ACG")),
        ]
        .into_iter()
        .collect();
        let stats = StatsSummary::from_lengths(&table.lengths()).unwrap();

        let mut buf = Vec::new();
        write_report(&table, &stats, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Id  \tLength\tSequence");
        assert_eq!(lines[1], "seq1\t4\tACGT");
        assert_eq!(lines[2], "seq2\t3\tACG");
        assert!(text.ends_with("Mode   : 4 (count=1)\n"));
    }
}
