//! Application controller.
//!
//! This module orchestrates the viewer loop:
//! - Terminal initialization and cleanup
//! - Event polling and handling
//! - State updates and rendering

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::debug;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::event::{apply_action, handle_event, poll_event, Action};
use crate::model::AppState;
use crate::ui::glyphs::Glyphs;
use crate::ui::{calculate_visible_rows, render};

/// The main application controller.
pub struct App {
    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state
    state: AppState,
    /// Glyph set for markers and separators
    glyphs: Glyphs,
    /// Event poll timeout
    tick_rate: Duration,
}

impl App {
    /// Creates a new application with the given state.
    pub fn new(state: AppState, glyphs: Glyphs) -> Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            state,
            glyphs,
            tick_rate: Duration::from_millis(50),
        })
    }

    /// Runs the main application loop.
    pub fn run(&mut self) -> Result<()> {
        self.update_viewport_size()?;

        loop {
            self.terminal.draw(|frame| {
                render(frame, &self.state, &self.glyphs);
            })?;

            if let Some(event) = poll_event(self.tick_rate) {
                let action = handle_event(event, self.state.show_help);
                debug!("action {:?}", action);

                if let Action::Resize(_, _) = action {
                    self.update_viewport_size()?;
                }

                apply_action(&mut self.state, action);

                if self.state.should_quit {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Updates the viewport size based on terminal dimensions.
    fn update_viewport_size(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        self.state
            .update_viewport_size(calculate_visible_rows(size.height));
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Runs the viewer until the user quits.
pub fn run_app(state: AppState, glyphs: Glyphs) -> Result<()> {
    let mut app = App::new(state, glyphs)?;
    app.run()
}
