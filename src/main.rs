//! fasta-analyzer - FASTA length summary
//!
//! Tabulates sequence lengths, computes mean/median/mode, writes the table
//! as CSV and shows everything in a terminal viewer.
//!
//! ## Usage
//!
//! ```bash
//! fasta-analyzer <fasta_file>
//! fasta-analyzer -r <fasta_file>              # print a report, no viewer
//! fasta-analyzer -o lengths.csv -p plot.svg <fasta_file>
//! ```
//!
//! Set `RUST_LOG=info` (or `debug`) for diagnostics on stderr.

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use fasta_analyzer::controller::run_app;
use fasta_analyzer::export::DEFAULT_OUTPUT;
use fasta_analyzer::model::AppState;
use fasta_analyzer::pipeline::{convert, Options};
use fasta_analyzer::plot::{export_chart_svg, DEFAULT_PLOT_OUTPUT};
use fasta_analyzer::report::write_report;
use fasta_analyzer::ui::glyphs;

/// fasta-analyzer - sequence length statistics for a FASTA file
///
/// Writes the Id/Sequence/Length table as CSV, then opens a viewer with the
/// table, the statistics and a Mean | Median | Mode bar chart.
/// With -r/--report, prints the table and statistics instead.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// FASTA file to analyze (.fasta, .fa, .fna, ...)
    file: PathBuf,

    /// CSV destination for the length table
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Do not write the CSV table
    #[arg(long = "no-export")]
    no_export: bool,

    /// Also save the bar chart as SVG (the viewer's `s` key writes here too)
    #[arg(short = 'p', long = "plot")]
    plot: Option<PathBuf>,

    /// Print a text report to stdout instead of opening the viewer
    #[arg(short = 'r', long = "report")]
    report: bool,

    /// Use plain ASCII markers in the viewer
    #[arg(long = "ascii")]
    ascii: bool,
}

impl Args {
    fn options(&self) -> Options {
        Options {
            output: (!self.no_export).then(|| self.output.clone()),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let conversion = convert(&args.file, &args.options())
        .with_context(|| format!("Could not analyze {}", args.file.display()))?;

    // Export and plot failures are reported, never fatal
    let mut messages = Vec::new();
    match &conversion.export {
        Some(Ok(path)) => messages.push(format!(
            "Wrote {} rows to {}",
            conversion.table.len(),
            path.display()
        )),
        Some(Err(e)) => messages.push(e.to_string()),
        None => info!("CSV export disabled"),
    }
    if let Some(plot) = &args.plot {
        match export_chart_svg(&conversion.stats, plot) {
            Ok(()) => messages.push(format!("Plot saved to {}", plot.display())),
            Err(e) => {
                warn!("{}", e);
                messages.push(e.to_string());
            }
        }
    }

    if args.report {
        write_report(&conversion.table, &conversion.stats, io::stdout().lock())?;
        for message in &messages {
            eprintln!("{}", message);
        }
        return Ok(());
    }

    let file_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());
    let mut state = AppState::new(file_name, conversion.table, conversion.stats);
    state.plot_path = args
        .plot
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PLOT_OUTPUT));
    if !messages.is_empty() {
        state.status_message = Some(messages.join(" | "));
    }

    run_app(state, glyphs::select(!args.ascii))
}
