//! Layout components (header, status bar)

use crate::app::App;
use crate::form::SubmissionState;
use crate::platform::{RELOAD_SHORTCUT, SUBMIT_SHORTCUT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Split the screen into header, body and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header with progress
            Constraint::Min(0),    // Form
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the title and, once fields are known, the completion progress
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let block = Block::default()
        .title(Span::styled(
            " Dynamic Form ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let total = session.fields().len();
    if session.is_loading() || total == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let counter = Paragraph::new(format!("Completed: {} / {}", session.filled_count(), total))
        .alignment(Alignment::Center);
    frame.render_widget(counter, rows[0]);

    let ratio = session.completion_ratio();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    frame.render_widget(gauge, rows[1]);
}

/// Key hints for the current phase
fn get_hints(app: &App) -> String {
    let session = app.session();
    if session.is_loading() {
        " Loading... | Esc:quit ".to_string()
    } else if session.is_success() {
        format!(" {RELOAD_SHORTCUT}:reload | Esc:quit ")
    } else {
        format!(
            " Tab/↑↓:move | ◀▶:choose | {SUBMIT_SHORTCUT}:submit | {RELOAD_SHORTCUT}:reload | Esc:quit "
        )
    }
}

pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let state = match app.session().submission_state() {
        SubmissionState::Idle => Span::styled(" ● ", Style::default().fg(Color::Green)),
        SubmissionState::Submitting => Span::styled(" ◌ ", Style::default().fg(Color::Yellow)),
        SubmissionState::Success => Span::styled(" ✓ ", Style::default().fg(Color::Green)),
        SubmissionState::Error(_) => Span::styled(" ○ ", Style::default().fg(Color::Red)),
    };

    let spans = vec![
        state,
        Span::styled(get_hints(app), Style::default().fg(Color::Gray)),
        Span::raw("| "),
        Span::styled(&app.server_url, Style::default().fg(Color::Blue)),
    ];

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
