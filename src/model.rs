//! Data model for the FASTA analyzer.
//!
//! This module contains the data structures shared by the pipeline and
//! the viewer:
//! - Parsed records and the fixed-schema length table
//! - The length statistics summary
//! - Viewer state (cursor, scroll offset, messages)

/// A single parsed FASTA entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// First whitespace-delimited word of the header (without '>')
    pub id: String,
    /// Residues with all whitespace removed, case preserved
    pub sequence: String,
}

impl Record {
    /// Creates a new record.
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
        }
    }

    /// Returns the number of residues.
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    /// Returns true if the record has no residues.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// One row of the length table: `Id, Sequence, Length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    pub sequence: String,
    pub length: usize,
}

impl From<Record> for Row {
    fn from(record: Record) -> Self {
        let length = record.len();
        Self {
            id: record.id,
            sequence: record.sequence,
            length,
        }
    }
}

/// Rows in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Column names, in output order.
    pub const COLUMNS: [&'static str; 3] = ["Id", "Sequence", "Length"];

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the Length column.
    pub fn lengths(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.length).collect()
    }

    /// Returns the longest identifier (for display column widths).
    pub fn max_id_length(&self) -> usize {
        self.rows.iter().map(|r| r.id.chars().count()).max().unwrap_or(0)
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// Central-tendency measures over the Length column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSummary {
    pub mean: f64,
    pub median: f64,
    pub mode: usize,
    pub mode_count: usize,
}

/// A labelled value for charting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryPoint {
    pub label: &'static str,
    pub value: f64,
}

impl StatsSummary {
    /// Returns mean, median and mode, in that order.
    pub fn chart_points(&self) -> [SummaryPoint; 3] {
        [
            SummaryPoint {
                label: "Mean",
                value: self.mean,
            },
            SummaryPoint {
                label: "Median",
                value: self.median,
            },
            SummaryPoint {
                label: "Mode",
                value: self.mode as f64,
            },
        ]
    }
}

/// The viewport defines which table rows are currently visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Index of the first visible row
    pub first_row: usize,
    /// Number of visible rows
    pub visible_rows: usize,
}

impl Viewport {
    pub fn new(visible_rows: usize) -> Self {
        Self {
            first_row: 0,
            visible_rows,
        }
    }

    /// Returns true if the row is visible.
    pub fn is_row_visible(&self, row: usize) -> bool {
        row >= self.first_row && row < self.first_row + self.visible_rows
    }
}

/// The complete viewer state.
#[derive(Debug)]
pub struct AppState {
    /// Name of the loaded file, for the status bar
    pub file_name: String,
    /// The length table
    pub table: Table,
    /// Statistics over the table
    pub stats: StatsSummary,
    /// Visible portion of the table
    pub viewport: Viewport,
    /// Currently highlighted row
    pub cursor: usize,
    /// Whether the help overlay is shown
    pub show_help: bool,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Status message to display
    pub status_message: Option<String>,
    /// Where `s` writes the chart
    pub plot_path: std::path::PathBuf,
}

impl AppState {
    /// Creates a new viewer state for a finished conversion.
    pub fn new(file_name: impl Into<String>, table: Table, stats: StatsSummary) -> Self {
        Self {
            file_name: file_name.into(),
            table,
            stats,
            viewport: Viewport::new(0),
            cursor: 0,
            show_help: false,
            should_quit: false,
            status_message: None,
            plot_path: std::path::PathBuf::from(crate::plot::DEFAULT_PLOT_OUTPUT),
        }
    }

    /// Updates the number of visible table rows.
    pub fn update_viewport_size(&mut self, rows: usize) {
        self.viewport.visible_rows = rows;
        self.ensure_cursor_visible();
    }

    pub fn move_up(&mut self) {
        self.move_by(-1);
    }

    pub fn move_down(&mut self) {
        self.move_by(1);
    }

    pub fn page_up(&mut self) {
        self.move_by(-(self.viewport.visible_rows.max(1) as isize));
    }

    pub fn page_down(&mut self) {
        self.move_by(self.viewport.visible_rows.max(1) as isize);
    }

    pub fn goto_first(&mut self) {
        self.cursor = 0;
        self.ensure_cursor_visible();
    }

    pub fn goto_last(&mut self) {
        self.cursor = self.table.len().saturating_sub(1);
        self.ensure_cursor_visible();
    }

    /// Moves the cursor by `delta` rows, clamped to the table.
    fn move_by(&mut self, delta: isize) {
        let last = self.table.len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        self.ensure_cursor_visible();
    }

    /// Scrolls so the cursor row is inside the viewport.
    fn ensure_cursor_visible(&mut self) {
        if self.viewport.visible_rows == 0 {
            return;
        }
        if self.cursor < self.viewport.first_row {
            self.viewport.first_row = self.cursor;
        } else if self.cursor >= self.viewport.first_row + self.viewport.visible_rows {
            self.viewport.first_row = self.cursor + 1 - self.viewport.visible_rows;
        }

        // Don't scroll past the end
        let max_first = self.table.len().saturating_sub(self.viewport.visible_rows);
        self.viewport.first_row = self.viewport.first_row.min(max_first);
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}
