//! The readings panel: raw values with their classifications.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::{Headings, Language, Presentation};
use crate::state::DisplayState;

/// Panel title
pub const TITLE: &str = " Sensores ";

/// Render the six reading fields centred in `area`
pub fn render_readings(frame: &mut Frame, area: Rect, state: &DisplayState, language: Language) {
    let block = Block::default()
        .title(TITLE)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines = reading_lines(state, language);
    let inner_height = area.height.saturating_sub(2) as usize;
    let padding = inner_height.saturating_sub(lines.len()) / 2;

    let mut padded = vec![Line::from(""); padding];
    padded.extend(lines);

    let paragraph = Paragraph::new(padded)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn reading_lines(state: &DisplayState, language: Language) -> Vec<Line<'static>> {
    let headings = Headings::for_language(language);
    let presentation = Presentation::from_state(state, language);
    let [x, y, z] = presentation.axes;

    vec![
        heading(headings.proximity),
        value(presentation.proximity),
        Line::from(""),
        heading(headings.light),
        value(presentation.light),
        Line::from(""),
        heading(headings.acceleration),
        value(x),
        value(y),
        value(z),
        Line::from(""),
        heading(headings.orientation),
        value(presentation.orientation.to_string()),
    ]
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
}

fn value(text: String) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::White)))
}
