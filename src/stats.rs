//! Length statistics.
//!
//! Builds the length table from parsed records and computes mean, median
//! and mode over the Length column.
//!
//! ## Mode tie-break
//!
//! When several lengths share the highest count, the largest length wins.
//! Lengths `[3, 3, 5, 5, 7]` give `mode == 5`, `mode_count == 2`.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::fasta::{FastaError, FastaResult};
use crate::model::{Record, Row, StatsSummary, Table};

/// Errors that can occur while summarizing records.
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("No sequences found")]
    EmptyInput,

    #[error(transparent)]
    Fasta(#[from] FastaError),
}

/// Materializes the table in record order and computes its statistics.
///
/// The first record error aborts; an empty record stream gives
/// [`SummaryError::EmptyInput`].
pub fn summarize<I>(records: I) -> Result<(Table, StatsSummary), SummaryError>
where
    I: IntoIterator<Item = FastaResult<Record>>,
{
    let table = records
        .into_iter()
        .map(|record| record.map(Row::from))
        .collect::<FastaResult<Table>>()?;

    let stats = StatsSummary::from_lengths(&table.lengths()).ok_or(SummaryError::EmptyInput)?;
    Ok((table, stats))
}

impl StatsSummary {
    /// Computes the summary of a set of lengths, or `None` if there are none.
    pub fn from_lengths(lengths: &[usize]) -> Option<Self> {
        if lengths.is_empty() {
            return None;
        }
        let (mode, mode_count) = mode(lengths)?;
        Some(Self {
            mean: mean(lengths),
            median: median(lengths),
            mode,
            mode_count,
        })
    }
}

fn mean(lengths: &[usize]) -> f64 {
    let total: f64 = lengths.iter().map(|&l| l as f64).sum();
    total / lengths.len() as f64
}

fn median(lengths: &[usize]) -> f64 {
    let mut sorted = lengths.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}

/// Most frequent length and its count; ties go to the largest length.
fn mode(lengths: &[usize]) -> Option<(usize, usize)> {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for &length in lengths {
        *counts.entry(length).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by_key(|&(length, count)| (count, length))
}
