//! Inline alert box

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Success,
}

impl AlertKind {
    fn color(self) -> Color {
        match self {
            Self::Error => Color::Red,
            Self::Success => Color::Green,
        }
    }

    fn marker(self) -> &'static str {
        match self {
            Self::Error => "!",
            Self::Success => "✓",
        }
    }
}

/// Render a bordered, colored message
pub fn render_alert(frame: &mut Frame, area: Rect, message: &str, kind: AlertKind) {
    let color = kind.color();
    let line = Line::from(vec![
        Span::styled(
            format!("{} ", kind.marker()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(message, Style::default().fg(color)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    frame.render_widget(
        Paragraph::new(line).wrap(Wrap { trim: true }).block(block),
        area,
    );
}
