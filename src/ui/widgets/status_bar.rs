//! Status bar widget.

use chrono::{DateTime, Utc};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::sensors::{SensorDelay, SensorKind};

/// What the status bar shows
pub struct StatusInfo<'a> {
    pub is_active: bool,
    pub available: &'a [SensorKind],
    pub delay: SensorDelay,
    pub last_event: Option<DateTime<Utc>>,
    pub status_message: Option<&'a str>,
}

/// Render the status bar
pub fn render_status_bar(frame: &mut Frame, area: Rect, info: &StatusInfo<'_>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(status_line(info)).block(block);
    frame.render_widget(paragraph, area);
}

fn status_line(info: &StatusInfo<'_>) -> Line<'static> {
    let mut spans = vec![];

    let state_text = if info.is_active { "ACTIVE" } else { "PAUSED" };
    let state_color = if info.is_active { Color::Green } else { Color::Yellow };
    spans.push(Span::styled(
        state_text,
        Style::default().fg(state_color).add_modifier(Modifier::BOLD),
    ));

    for kind in SensorKind::ALL {
        spans.push(Span::raw(" │ "));
        let present = info.available.contains(&kind);
        let (mark, color) = if present {
            ("✓", Color::Green)
        } else {
            ("✗", Color::DarkGray)
        };
        spans.push(Span::styled(format!("{kind} {mark}"), Style::default().fg(color)));
    }

    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(
        format!("{:?}", info.delay).to_lowercase(),
        Style::default().fg(Color::Gray),
    ));

    if let Some(when) = info.last_event {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            when.format("%H:%M:%S%.3f").to_string(),
            Style::default().fg(Color::Cyan),
        ));
    }

    if let Some(status) = info.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(status.to_string(), Style::default().fg(Color::Gray)));
    }

    Line::from(spans)
}
