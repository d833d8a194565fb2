//! Keyboard event handling.
//!
//! - `j` / `Down`: next row
//! - `k` / `Up`: previous row
//! - `PageDown` / `PageUp`: scroll a page
//! - `g` / `Home`: first row
//! - `G` / `End`: last row
//! - `s`: save the bar chart as SVG
//! - `?`: toggle help
//! - `q`, `Esc`, `Ctrl+C`: quit

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::model::AppState;
use crate::plot::export_chart_svg;

/// Actions that can be triggered by keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    /// Quit the application
    Quit,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GotoFirst,
    GotoLast,
    /// Write the bar chart to the configured SVG path
    SavePlot,
    ToggleHelp,
    /// Dismiss the help overlay
    DismissHelp,
    /// Resize event (terminal resized)
    Resize(u16, u16),
}

/// Polls for keyboard events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action.
pub fn handle_event(event: Event, show_help: bool) -> Action {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            handle_key_event(key_event, show_help)
        }
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

fn handle_key_event(key: KeyEvent, show_help: bool) -> Action {
    // Handle Ctrl+C for emergency quit
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // If help is shown, any key dismisses it
    if show_help {
        return Action::DismissHelp;
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::Char('g') | KeyCode::Home => Action::GotoFirst,
        KeyCode::Char('G') | KeyCode::End => Action::GotoLast,
        KeyCode::Char('s') => Action::SavePlot,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

/// Applies an action to the application state.
pub fn apply_action(state: &mut AppState, action: Action) {
    match action {
        Action::None | Action::Resize(_, _) => {}
        Action::Quit => state.should_quit = true,
        Action::MoveUp => state.move_up(),
        Action::MoveDown => state.move_down(),
        Action::PageUp => state.page_up(),
        Action::PageDown => state.page_down(),
        Action::GotoFirst => state.goto_first(),
        Action::GotoLast => state.goto_last(),
        Action::SavePlot => {
            state.status_message = Some(match export_chart_svg(&state.stats, &state.plot_path) {
                Ok(()) => format!("Plot saved to {}", state.plot_path.display()),
                Err(e) => e.to_string(),
            });
        }
        Action::ToggleHelp => state.toggle_help(),
        Action::DismissHelp => state.show_help = false,
    }
}
