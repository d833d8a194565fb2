use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

use fasta_analyzer::model::{AppState, Record, Row, StatsSummary, Table};
use fasta_analyzer::ui::{glyphs::Glyphs, render};

#[allow(dead_code)]
pub fn state_from(pairs: &[(&str, &str)]) -> AppState {
    let table: Table = pairs
        .iter()
        .map(|(id, seq)| Row::from(Record::new(*id, *seq)))
        .collect();
    let stats = StatsSummary::from_lengths(&table.lengths()).expect("non-empty table");
    AppState::new("TEST.fa", table, stats)
}

#[allow(dead_code)]
pub fn render_state(state: &AppState, glyphs: &Glyphs, w: u16, h: u16) -> Buffer {
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal.draw(|f| render(f, state, glyphs)).expect("draw");
    terminal.backend().buffer().clone()
}

#[allow(dead_code)]
pub fn buffer_text(buf: &Buffer) -> String {
    let width = buf.area.width as usize;
    let mut out = String::new();
    for line in buf.content.chunks(width) {
        for cell in line {
            out.push_str(cell.symbol());
        }
        out.push('\n');
    }
    out
}
