//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const BINDINGS: [(&str, &str); 5] = [
    ("  Space/p", " - Pause or resume sensors"),
    ("  l      ", " - Switch label language"),
    ("  ?/h/F1 ", " - Toggle this help"),
    ("  q/Esc  ", " - Quit application"),
    ("  focus  ", " - Losing terminal focus pauses sensors"),
];

/// Render the help panel
pub fn render_help(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let mut help_text = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "Controls",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]),
    ];
    help_text.extend(BINDINGS.iter().map(|(keys, action)| {
        Line::from(vec![
            Span::styled(*keys, Style::default().fg(Color::Cyan)),
            Span::raw(*action),
        ])
    }));
    help_text.push(Line::from(""));
    help_text.push(Line::from(vec![
        Span::styled("  ✓", Style::default().fg(Color::Green)),
        Span::raw(" - Sensor present and registered"),
    ]));
    help_text.push(Line::from(vec![
        Span::styled("  ✗", Style::default().fg(Color::DarkGray)),
        Span::raw(" - Sensor absent on this device"),
    ]));
    help_text.push(Line::from(""));
    help_text.push(Line::from(vec![
        Span::raw("Press "),
        Span::styled("?", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(" to close this help"),
    ]));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
