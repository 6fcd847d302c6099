//! Terminal UI module using ratatui.
//!
//! One screen, redrawn after every handled event. Sensor events, terminal
//! input, OS signals and the refresh tick are serialized through a single
//! `select!` loop, so the screen state is only ever touched from one task.

pub mod app;
pub mod input;
pub mod widgets;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{DisableFocusChange, EnableFocusChange, EventStream},
    execute, terminal,
};
use futures_util::StreamExt;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
};
use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
use signal_hook_tokio::Signals;

pub use app::{Lifecycle, Screen};
pub use input::{InputAction, map_event};

use crate::error::{Result, UiError};
use crate::sensors::manager::{EventReceiver, SensorManager};
use widgets::StatusInfo;

/// Raw-mode alternate screen, restored on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()
            .map_err(|e| UiError::InitializationError(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            EnableFocusChange,
            cursor::Hide
        )
        .map_err(|e| UiError::InitializationError(e.to_string()))?;

        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .map_err(|e| UiError::InitializationError(e.to_string()))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableFocusChange,
            terminal::LeaveAlternateScreen,
            cursor::Show
        );
    }
}

/// Drive `screen` until it asks to quit, the input stream ends, or a
/// shutdown signal arrives. Listeners are released before returning.
pub async fn run<M: SensorManager>(
    screen: &mut Screen<M>,
    mut events: EventReceiver,
    refresh: Duration,
) -> Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])
        .map_err(|e| UiError::SignalError(e.to_string()))?;
    let signal_handle = signals.handle();
    let mut input = EventStream::new();
    let mut tick = tokio::time::interval(refresh);

    screen.on_resume();

    let result = loop {
        if let Err(e) = session.terminal.draw(|frame| render(frame, screen)) {
            break Err(UiError::RenderError(e.to_string()).into());
        }

        tokio::select! {
            Some(event) = events.recv() => {
                screen.on_sensor_changed(&event);
            }
            maybe_input = input.next() => match maybe_input {
                Some(Ok(event)) => screen.handle_action(map_event(&event)),
                Some(Err(e)) => break Err(UiError::InputError(e.to_string()).into()),
                None => break Ok(()),
            },
            Some(signal) = signals.next() => {
                tracing::info!(signal, "Received shutdown signal");
                screen.request_quit();
            }
            _ = tick.tick() => {}
        }

        if screen.should_quit() {
            break Ok(());
        }
    };

    signal_handle.close();
    screen.on_destroy();
    drop(session);
    result
}

/// Draw the whole screen from its current state.
pub fn render<M: SensorManager>(frame: &mut Frame, screen: &Screen<M>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(15), Constraint::Length(3)])
        .split(frame.area());

    widgets::render_readings(frame, chunks[0], screen.state(), screen.language());

    let info = StatusInfo {
        is_active: screen.lifecycle() == Lifecycle::Resumed,
        available: screen.available(),
        delay: screen.delay(),
        last_event: screen.last_event(),
        status_message: screen.status_message(),
    };
    widgets::render_status_bar(frame, chunks[1], &info);

    if screen.show_help() {
        widgets::render_help(frame, centered_rect(60, 60, frame.area()));
    }
}

/// A rectangle of `percent_x` by `percent_y` centred in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
