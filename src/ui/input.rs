//! Input handling for the TUI.
//!
//! Translates terminal events into screen actions. Focus changes stand in for
//! the screen becoming visible or hidden.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Actions that can be performed based on terminal input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Quit the application
    Quit,
    /// Pause if active, resume if paused
    TogglePause,
    /// The terminal gained focus
    Resume,
    /// The terminal lost focus
    Pause,
    /// Toggle help panel
    ToggleHelp,
    /// Switch label language
    ToggleLanguage,
    /// No action
    None,
}

/// Map a terminal event to an application action
pub fn map_event(event: &Event) -> InputAction {
    match event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            map_key_to_action(*key_event)
        }
        Event::FocusGained => InputAction::Resume,
        Event::FocusLost => InputAction::Pause,
        _ => InputAction::None,
    }
}

/// Map a key event to an application action
fn map_key_to_action(key_event: KeyEvent) -> InputAction {
    match key_event.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => InputAction::Quit,
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Quit
        }

        // Pause / resume
        KeyCode::Char(' ') => InputAction::TogglePause,
        KeyCode::Char('p') | KeyCode::Char('P') => InputAction::TogglePause,

        // Language
        KeyCode::Char('l') | KeyCode::Char('L') => InputAction::ToggleLanguage,

        // Help
        KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::F(1) => {
            InputAction::ToggleHelp
        }

        _ => InputAction::None,
    }
}
