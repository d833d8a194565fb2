//! TUI rendering module.
//!
//! This module handles all visual rendering using ratatui:
//! - Length table on the left, with the statistics block beneath it
//! - Mean | Median | Mode bar chart on the right
//! - Status bar with file name, position and the latest message
//! - Help overlay

pub mod glyphs;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, Paragraph, Row as TableRow,
        Table as TableWidget,
    },
    Frame,
};

use crate::model::{AppState, Table};
use crate::report::{format_stats, preview};
use glyphs::Glyphs;

/// Height of the statistics panel (three lines plus borders).
const STATS_PANEL_HEIGHT: u16 = 5;
/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;
/// Rows taken by the table's borders and header.
const TABLE_CHROME: u16 = 3;
/// Width of the Length column.
const LENGTH_COL_WIDTH: u16 = 8;
/// Widest the Id column gets.
const MAX_ID_COL_WIDTH: u16 = 24;
/// Gap between bars in the chart.
const BAR_GAP: u16 = 2;
/// Bar values are stored as hundredths so fractional means keep their height.
const BAR_SCALE: f64 = 100.0;

const KEY_HELP: &[(&str, &str)] = &[
    ("j / Down", "next row"),
    ("k / Up", "previous row"),
    ("PageDown / PageUp", "scroll a page"),
    ("g / Home", "first row"),
    ("G / End", "last row"),
    ("s", "save the bar chart as SVG"),
    ("?", "toggle this help"),
    ("q / Esc / Ctrl+C", "quit"),
];

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState, glyphs: &Glyphs) {
    let area = frame.area();

    // Main layout: content area + status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(STATS_PANEL_HEIGHT + TABLE_CHROME),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    // Split content area: table + stats (left), chart (right)
    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_layout[0]);

    let left_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(TABLE_CHROME),
            Constraint::Length(STATS_PANEL_HEIGHT),
        ])
        .split(content_layout[0]);

    render_table_panel(frame, state, glyphs, left_layout[0]);
    render_stats_panel(frame, state, left_layout[1]);
    render_chart_panel(frame, state, content_layout[1]);
    render_status_bar(frame, state, glyphs, main_layout[1]);

    if state.show_help {
        render_help_overlay(frame, area);
    }
}

/// Renders the visible slice of the length table.
fn render_table_panel(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect) {
    let visible_rows = area.height.saturating_sub(TABLE_CHROME) as usize;
    let start_row = state.viewport.first_row.min(state.table.len());
    let end_row = (start_row + visible_rows).min(state.table.len());

    let marker_width = glyphs.row_marker.chars().count() as u16;
    let id_len = state.table.max_id_length().min(MAX_ID_COL_WIDTH as usize) as u16;
    let id_width = (id_len + marker_width)
        .max(Table::COLUMNS[0].len() as u16 + marker_width)
        .min(MAX_ID_COL_WIDTH);
    // Two column gaps plus the borders
    let seq_width = area
        .width
        .saturating_sub(id_width + LENGTH_COL_WIDTH + 4)
        .max(4) as usize;

    let header = TableRow::new(vec![
        Cell::from(format!("{}{}", glyphs.row_blank, Table::COLUMNS[0])),
        Cell::from(Table::COLUMNS[1]),
        Cell::from(Table::COLUMNS[2]),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<TableRow> = state.table.rows()[start_row..end_row]
        .iter()
        .enumerate()
        .map(|(offset, row)| {
            let is_current = start_row + offset == state.cursor;
            let marker = if is_current {
                glyphs.row_marker
            } else {
                glyphs.row_blank
            };
            let style = if is_current {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            TableRow::new(vec![
                Cell::from(format!("{}{}", marker, row.id)),
                Cell::from(preview(&row.sequence, seq_width)),
                Cell::from(row.length.to_string()),
            ])
            .style(style)
        })
        .collect();

    let more_above = start_row > 0;
    let more_below = end_row < state.table.len();
    let title = format!(
        "Sequences [{}-{}/{}]{}{}",
        if end_row > 0 { start_row + 1 } else { 0 },
        end_row,
        state.table.len(),
        if more_above { glyphs.arrow_up } else { "" },
        if more_below { glyphs.arrow_down } else { "" },
    );

    let widths = [
        Constraint::Length(id_width),
        Constraint::Min(4),
        Constraint::Length(LENGTH_COL_WIDTH),
    ];
    let table = TableWidget::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

/// Renders mean, median and mode under the table.
fn render_stats_panel(frame: &mut Frame, state: &AppState, area: Rect) {
    let lines: Vec<Line> = format_stats(&state.stats)
        .lines()
        .map(|l| Line::from(l.to_string()))
        .collect();
    let block = Block::default().borders(Borders::ALL).title("Statistics");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the Mean | Median | Mode bar chart.
fn render_chart_panel(frame: &mut Frame, state: &AppState, area: Rect) {
    let points = state.stats.chart_points();
    let bars: Vec<Bar> = points
        .iter()
        .map(|p| {
            Bar::default()
                .label(Line::from(p.label))
                .value((p.value * BAR_SCALE).round() as u64)
                .text_value(format!("{:.2}", p.value))
        })
        .collect();

    let inner_width = area.width.saturating_sub(2);
    let bar_width = (inner_width.saturating_sub(BAR_GAP * (points.len() as u16 - 1))
        / points.len() as u16)
        .max(1);

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Mean | Median | Mode"),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(BAR_GAP)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(chart, area);
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect) {
    let message = state.status_message.as_deref().unwrap_or("? for help");
    let left_content = format!(" {} {} {} ", state.file_name, glyphs.separator, message);
    let position_info = format!(
        "Row {}/{} ",
        (state.cursor + 1).min(state.table.len()),
        state.table.len()
    );

    let left_len = left_content.chars().count();
    let status_line = Line::from(vec![
        Span::styled(
            left_content,
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(left_len + position_info.len())),
            Style::default().bg(Color::Cyan),
        ),
        Span::styled(
            position_info,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(status_line), area);
}

/// Renders the key bindings in a centered box.
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = area.width.saturating_sub(4).min(60);
    let text_width = width.saturating_sub(4).max(10) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for (keys, action) in KEY_HELP {
        let entry = format!("{:<18} {}", keys, action);
        for wrapped in textwrap::wrap(&entry, text_width) {
            lines.push(Line::from(wrapped.into_owned()));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().add_modifier(Modifier::ITALIC),
    )));

    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let block = Block::default().borders(Borders::ALL).title("Help");
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Calculates how many table rows fit on screen.
pub fn calculate_visible_rows(terminal_height: u16) -> usize {
    terminal_height.saturating_sub(STATUS_BAR_HEIGHT + STATS_PANEL_HEIGHT + TABLE_CHROME) as usize
}
