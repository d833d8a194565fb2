//! # fasta-analyzer - FASTA length summary
//!
//! Reads a FASTA file, tabulates each record's length and computes mean,
//! median and mode over the lengths.
//!
//! ## Architecture
//!
//! The pipeline is strictly sequential:
//! - `fasta`: lazy FASTA record iterator
//! - `stats`: length table and statistics
//! - `export`: CSV output of the table
//! - `pipeline`: `convert`, wiring the three together
//!
//! Presentation sits on top of the pipeline output:
//! - `report`: plain-text report
//! - `plot`: SVG bar chart of mean, median and mode
//! - `model`, `event`, `ui`, `controller`: terminal viewer

pub mod controller;
pub mod event;
pub mod export;
pub mod fasta;
pub mod model;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod stats;
pub mod ui;
